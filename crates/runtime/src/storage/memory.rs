//! In-memory save slot for tests and throwaway sessions.

use std::sync::RwLock;

use super::{SaveStorage, StorageError};

#[derive(Debug, Default)]
pub struct InMemoryStorage {
    slot: RwLock<Option<Vec<u8>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStorage for InMemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, StorageError> {
        let slot = self.slot.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, bytes: &[u8]) -> Result<(), StorageError> {
        let mut slot = self.slot.write().map_err(|_| StorageError::LockPoisoned)?;
        *slot = Some(bytes.to_vec());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.slot.read().map(|slot| slot.is_some()).unwrap_or(false)
    }

    fn delete(&self) -> Result<(), StorageError> {
        let mut slot = self.slot.write().map_err(|_| StorageError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}
