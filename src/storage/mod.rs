//! Persistence port for named state slots.
//!
//! Every piece of persisted state lives in a single named slot holding one
//! serialized string: the history log in [`HISTORY_SLOT`], the selected theme
//! in [`THEME_SLOT`]. Stores are handed a [`SlotStore`] at construction
//! instead of reaching for a global, so tests swap in [`MemorySlotStore`].

mod file;
mod memory;

pub use file::FileSlotStore;
pub use memory::MemorySlotStore;

use std::fmt;
use std::sync::Arc;

/// Slot holding the serialized history log.
pub const HISTORY_SLOT: &str = "history";

/// Slot holding the last selected theme.
pub const THEME_SLOT: &str = "theme";

/// Errors raised by a slot store.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying file I/O failed.
    Io(std::io::Error),

    /// A value could not be serialized or deserialized.
    Serialization(serde_json::Error),

    /// The backing store is not available.
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "Storage I/O error: {}", err),
            StorageError::Serialization(err) => write!(f, "Storage serialization error: {}", err),
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Serialization(err) => Some(err),
            StorageError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err)
    }
}

/// A key-value store of named string slots.
pub trait SlotStore: Send + Sync {
    /// Reads a slot. `Ok(None)` when the slot was never written.
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the content of a slot.
    fn save(&self, slot: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes a slot. Deleting a missing slot is not an error.
    fn remove(&self, slot: &str) -> Result<(), StorageError>;
}

impl<T: SlotStore + ?Sized> SlotStore for Arc<T> {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        (**self).load(slot)
    }

    fn save(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(slot, value)
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        (**self).remove(slot)
    }
}

impl<T: SlotStore + ?Sized> SlotStore for Box<T> {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        (**self).load(slot)
    }

    fn save(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(slot, value)
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        (**self).remove(slot)
    }
}
