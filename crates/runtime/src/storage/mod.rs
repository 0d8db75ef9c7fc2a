//! Save-slot storage for persisted matches.
//!
//! A slot holds one opaque byte blob. Encoding lives in [`crate::save`];
//! storage only moves bytes.

mod file;
mod memory;

pub use file::FileSlotStorage;
pub use memory::InMemoryStorage;

use thiserror::Error;

/// Errors surfaced by storage implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("save slot lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Single save slot.
pub trait SaveStorage: Send + Sync {
    /// Returns `None` when the slot is empty.
    fn load(&self) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the slot contents.
    fn save(&self, bytes: &[u8]) -> Result<(), StorageError>;

    fn exists(&self) -> bool;

    /// Empties the slot. Deleting an empty slot is not an error.
    fn delete(&self) -> Result<(), StorageError>;
}
