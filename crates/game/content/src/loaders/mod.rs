//! Content loaders for reading game data from files.
//!
//! Catalogs are RON, configuration is TOML. Loaders report failures through
//! `anyhow` with the offending path in the message.

pub mod catalog;
pub mod config;
pub mod factory;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
