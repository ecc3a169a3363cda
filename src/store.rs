use thiserror::Error;

use crate::models::{Mood, MoodEntry};
use crate::storage::{SlotStorage, StorageError};

/// Name of the slot holding the serialized entry list
pub const ENTRIES_SLOT: &str = "moodEntries";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to serialize entries: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write entries: {0}")]
    StorageWrite(#[source] StorageError),
    #[error("Entries must be loaded before they can be saved")]
    NotLoaded,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read entries: {0}")]
    StorageRead(#[source] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Unloaded,
    Loaded,
}

/// In-memory journal backed by a single storage slot.
///
/// Entries keep insertion order; `sorted_descending` derives the
/// newest-first view without touching it.
pub struct EntryStore<S: SlotStorage> {
    storage: S,
    entries: Vec<MoodEntry>,
    state: StoreState,
}

impl<S: SlotStorage> EntryStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            entries: Vec::new(),
            state: StoreState::Unloaded,
        }
    }

    /// Create a store and load whatever the slot currently holds
    pub fn open(storage: S) -> Result<Self, LoadError> {
        let mut store = Self::new(storage);
        store.load()?;
        Ok(store)
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, entry: MoodEntry) {
        log::debug!(
            "event=entry_append module=store id={} mood={}",
            entry.id(),
            entry.mood().name()
        );
        self.entries.push(entry);
    }

    /// Newest first. Entries with equal dates keep insertion order.
    pub fn sorted_descending(&self) -> Vec<MoodEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.date().cmp(&a.date()));
        sorted
    }

    /// Create an entry, append it and persist the whole collection.
    /// If the save fails the entry is dropped again.
    pub fn record(&mut self, mood: Mood, note: &str) -> Result<MoodEntry, PersistError> {
        let entry = MoodEntry::new(mood, note);
        self.append(entry.clone());
        if let Err(e) = self.save() {
            self.entries.pop();
            return Err(e);
        }
        Ok(entry)
    }

    /// Overwrite the slot with the full collection
    pub fn save(&mut self) -> Result<(), PersistError> {
        if self.state == StoreState::Unloaded {
            return Err(PersistError::NotLoaded);
        }

        let blob = serde_json::to_vec(&self.entries)?;
        self.storage
            .set(ENTRIES_SLOT, &blob)
            .map_err(PersistError::StorageWrite)?;

        log::info!(
            "event=entries_save module=store status=ok count={} bytes={}",
            self.entries.len(),
            blob.len()
        );
        Ok(())
    }

    /// Replace the in-memory collection with the slot's contents.
    ///
    /// An empty or missing slot loads as no entries. A slot that fails to
    /// decode is logged and also loads as no entries.
    pub fn load(&mut self) -> Result<(), LoadError> {
        let blob = self
            .storage
            .get(ENTRIES_SLOT)
            .map_err(LoadError::StorageRead)?;

        self.entries = match blob {
            None => Vec::new(),
            Some(bytes) if bytes.is_empty() => Vec::new(),
            Some(bytes) => match serde_json::from_slice::<Vec<MoodEntry>>(&bytes) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!(
                        "event=entries_load module=store status=recovered reason=decode_failed bytes={} error={}",
                        bytes.len(),
                        e
                    );
                    Vec::new()
                }
            },
        };
        self.state = StoreState::Loaded;

        log::info!(
            "event=entries_load module=store status=ok count={} location={}",
            self.entries.len(),
            self.storage.describe()
        );
        Ok(())
    }
}
