//! File-backed save slot.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{SaveStorage, StorageError};

/// Save slot stored as a single file.
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a
/// crash mid-save leaves the previous save intact.
#[derive(Clone, Debug)]
pub struct FileSlotStorage {
    path: PathBuf,
}

impl FileSlotStorage {
    /// Creates the slot, making the parent directory if needed.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SaveStorage for FileSlotStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                tracing::debug!(path = %self.path.display(), len = bytes.len(), "loaded save slot");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, bytes: &[u8]) -> Result<(), StorageError> {
        let temp_path = self.temp_path();
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), len = bytes.len(), "saved slot");
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn delete(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "deleted save slot");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
