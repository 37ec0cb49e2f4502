//! File-backed slot store.
//!
//! Each slot is one file, `<slot>.json`, inside the data directory. Writes go
//! to a temporary file first and are renamed over the old one, so a crash
//! mid-write leaves either the previous value or the new one.

use super::{SlotStore, StorageError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Slot store persisting each slot as a file in one directory.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory slots are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `slot`.
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl SlotStore for FileSlotStore {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(&path)?))
    }

    fn save(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let path = self.slot_path(slot);
        let temp_path = path.with_extension("json.tmp");

        let mut temp_file = File::create(&temp_path)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;
        drop(temp_file);

        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path)?;
        }

        Ok(())
    }
}
