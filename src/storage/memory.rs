//! In-process slot store.

use super::{SlotStore, StorageError};
use std::collections::HashMap;
use std::sync::RwLock;

/// Slot store backed by a map; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one slot already written.
    pub fn with_slot(slot: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut slots) = store.slots.write() {
            slots.insert(slot.to_string(), value.to_string());
        }
        store
    }
}

impl SlotStore for MemorySlotStore {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let slots = self
            .slots
            .read()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(slots.get(slot).cloned())
    }

    fn save(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        slots.remove(slot);
        Ok(())
    }
}
