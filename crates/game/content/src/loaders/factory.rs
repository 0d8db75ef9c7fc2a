//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use arena_core::GameConfig;

use crate::library::ContentLibrary;
use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── characters.ron
/// └── skills.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load and validate the template library from `characters.ron` and `skills.ron`.
    pub fn load_library(&self) -> LoadResult<ContentLibrary> {
        let characters = CatalogLoader::load_characters(&self.data_dir.join("characters.ron"))?;
        let skills = CatalogLoader::load_skills(&self.data_dir.join("skills.ron"))?;
        let library = ContentLibrary::from_templates(characters, skills)?;
        tracing::info!(data_dir = %self.data_dir.display(), "content loaded");
        Ok(library)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
