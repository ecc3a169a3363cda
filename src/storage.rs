//! Named byte slots that the entry store persists into.
//!
//! A provider only needs `get`/`set` on a slot name; the store always
//! replaces a slot's contents whole.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{Config, StorageBackend};
use crate::database::{Database, DatabaseError};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Failed to create storage directory: {0}")]
    DirectoryError(String),
}

pub trait SlotStorage {
    /// Read a slot. `Ok(None)` means the slot has never been written.
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Overwrite a slot in full
    fn set(&mut self, slot: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Human-readable location, for logs and status output
    fn describe(&self) -> String;
}

impl<T: SlotStorage + ?Sized> SlotStorage for Box<T> {
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(slot)
    }

    fn set(&mut self, slot: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set(slot, value)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Slots kept in process memory only
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemoryStorage {
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.slots.get(slot).cloned())
    }

    fn set(&mut self, slot: &str, value: &[u8]) -> Result<(), StorageError> {
        self.slots.insert(slot.to_string(), value.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// One `<slot>.json` file per slot inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: &Path) -> Result<Self, StorageError> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| StorageError::DirectoryError(e.to_string()))?;
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl SlotStorage for FileStorage {
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.slot_path(slot)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn set(&mut self, slot: &str, value: &[u8]) -> Result<(), StorageError> {
        // Write beside the target and rename so readers never see a half-written slot
        let target = self.slot_path(slot);
        let staging = self.dir.join(format!(".{}.json.tmp", slot));
        fs::write(&staging, value)?;
        fs::rename(&staging, &target)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.dir.display())
    }
}

/// Open the provider selected in the config
pub fn open_storage(config: &Config) -> Result<Box<dyn SlotStorage>, StorageError> {
    let path = config.get_storage_path();
    let storage: Box<dyn SlotStorage> = match config.storage_backend {
        StorageBackend::Sqlite => Box::new(Database::new(&path)?),
        StorageBackend::File => Box::new(FileStorage::new(&path)?),
        StorageBackend::Memory => Box::new(MemoryStorage::new()),
    };
    log::info!(
        "event=storage_open module=storage status=ok location={}",
        storage.describe()
    );
    Ok(storage)
}
