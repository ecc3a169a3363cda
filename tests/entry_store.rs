use chrono::{Duration, TimeZone, Utc};
use mood_tracker::store::ENTRIES_SLOT;
use mood_tracker::{
    EntryStore, MemoryStorage, Mood, MoodEntry, PersistError, SlotStorage, StorageError, StoreState,
};
use std::cell::Cell;
use std::rc::Rc;
use uuid::Uuid;

fn entry_at(minutes: i64, mood: Mood, note: &str) -> MoodEntry {
    let base = Utc.with_ymd_and_hms(2025, 12, 2, 8, 0, 0).unwrap();
    MoodEntry::with_parts(Uuid::new_v4(), base + Duration::minutes(minutes), mood, note)
}

/// Storage whose reads or writes always fail
struct BrokenStorage {
    fail_reads: bool,
}

impl SlotStorage for BrokenStorage {
    fn get(&self, _slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        if self.fail_reads {
            Err(StorageError::Io(std::io::Error::other("disk unplugged")))
        } else {
            Ok(None)
        }
    }

    fn set(&mut self, _slot: &str, _value: &[u8]) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("read-only")))
    }

    fn describe(&self) -> String {
        "broken".to_string()
    }
}

/// Memory storage whose writes fail while the shared switch is on
struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: Rc<Cell<bool>>,
}

impl SlotStorage for FlakyStorage {
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.inner.get(slot)
    }

    fn set(&mut self, slot: &str, value: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Io(std::io::Error::other("disk full")));
        }
        self.inner.set(slot, value)
    }

    fn describe(&self) -> String {
        "flaky".to_string()
    }
}

#[test]
fn empty_slot_loads_as_empty_collection() {
    let store = EntryStore::open(MemoryStorage::new()).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.state(), StoreState::Loaded);
}

#[test]
fn zero_length_blob_loads_as_empty_collection() {
    let mut storage = MemoryStorage::new();
    storage.set(ENTRIES_SLOT, b"").unwrap();
    let store = EntryStore::open(storage).unwrap();
    assert!(store.is_empty());
}

#[test]
fn corrupted_blob_loads_as_empty_collection() {
    let mut storage = MemoryStorage::new();
    storage.set(ENTRIES_SLOT, b"{not json").unwrap();
    let store = EntryStore::open(storage).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.state(), StoreState::Loaded);
}

#[test]
fn save_then_reload_round_trips_in_insertion_order() {
    let mut store = EntryStore::open(MemoryStorage::new()).unwrap();
    let originals = vec![
        entry_at(30, Mood::Great, "late"),
        entry_at(0, Mood::Angry, "early"),
        entry_at(15, Mood::Neutral, ""),
    ];
    for entry in &originals {
        store.append(entry.clone());
    }
    store.save().unwrap();

    let storage = store.storage().clone();
    let reloaded = EntryStore::open(storage).unwrap();
    assert_eq!(reloaded.entries(), originals.as_slice());
}

#[test]
fn sorted_view_is_newest_first_and_does_not_mutate() {
    let mut store = EntryStore::open(MemoryStorage::new()).unwrap();
    let happy = entry_at(0, Mood::Happy, "Good day");
    let sad = entry_at(60, Mood::Sad, "Rough one");
    store.append(happy.clone());
    store.append(sad.clone());

    assert_eq!(store.sorted_descending(), vec![sad.clone(), happy.clone()]);
    assert_eq!(store.entries(), &[happy.clone(), sad.clone()]);

    let neutral = entry_at(30, Mood::Neutral, "");
    store.append(neutral.clone());
    assert_eq!(store.entries().last(), Some(&neutral));
    assert_eq!(store.sorted_descending(), vec![sad, neutral, happy]);
}

#[test]
fn equal_dates_keep_insertion_order() {
    let mut store = EntryStore::open(MemoryStorage::new()).unwrap();
    let first = entry_at(0, Mood::Sad, "first");
    let second = entry_at(0, Mood::Great, "second");
    store.append(first.clone());
    store.append(second.clone());
    assert_eq!(store.sorted_descending(), vec![first, second]);
}

#[test]
fn record_appends_and_persists() {
    let mut store = EntryStore::open(MemoryStorage::new()).unwrap();
    let entry = store.record(Mood::Happy, "  Good day \n").unwrap();
    assert_eq!(entry.note(), "Good day");

    let reloaded = EntryStore::open(store.storage().clone()).unwrap();
    assert_eq!(reloaded.entries(), &[entry]);
}

#[test]
fn save_overwrites_previous_blob_in_full() {
    let mut storage = MemoryStorage::new();
    storage.set(ENTRIES_SLOT, b"[]").unwrap();
    let mut store = EntryStore::open(storage).unwrap();
    store.append(entry_at(0, Mood::Great, "one"));
    store.save().unwrap();

    let blob = store.storage().get(ENTRIES_SLOT).unwrap().unwrap();
    let decoded: Vec<MoodEntry> = serde_json::from_slice(&blob).unwrap();
    assert_eq!(decoded.len(), 1);
}

#[test]
fn save_before_load_is_refused() {
    let mut storage = MemoryStorage::new();
    storage.set(ENTRIES_SLOT, b"precious").unwrap();
    let mut store = EntryStore::new(storage);
    assert_eq!(store.state(), StoreState::Unloaded);

    store.append(entry_at(0, Mood::Sad, ""));
    assert!(matches!(store.save(), Err(PersistError::NotLoaded)));
    assert_eq!(store.storage().get(ENTRIES_SLOT).unwrap(), Some(b"precious".to_vec()));
}

#[test]
fn storage_write_failure_is_surfaced() {
    let mut store = EntryStore::open(BrokenStorage { fail_reads: false }).unwrap();
    store.append(entry_at(0, Mood::Happy, ""));
    assert!(matches!(store.save(), Err(PersistError::StorageWrite(_))));
    // The entry stays in memory
    assert_eq!(store.len(), 1);
}

#[test]
fn failed_record_leaves_no_entry_behind() {
    let fail_writes = Rc::new(Cell::new(true));
    let storage = FlakyStorage {
        inner: MemoryStorage::new(),
        fail_writes: Rc::clone(&fail_writes),
    };
    let mut store = EntryStore::open(storage).unwrap();

    assert!(matches!(
        store.record(Mood::Sad, "Rough one"),
        Err(PersistError::StorageWrite(_))
    ));
    assert!(store.is_empty());

    fail_writes.set(false);
    let entry = store.record(Mood::Sad, "Rough one").unwrap();
    assert_eq!(store.entries(), &[entry.clone()]);

    let reloaded = EntryStore::open(store.storage().inner.clone()).unwrap();
    assert_eq!(reloaded.entries(), &[entry]);
}

#[test]
fn storage_read_failure_is_surfaced() {
    let result = EntryStore::open(BrokenStorage { fail_reads: true });
    assert!(result.is_err());
}

#[test]
fn load_replaces_in_memory_entries() {
    let mut storage = MemoryStorage::new();
    let saved = entry_at(0, Mood::Great, "saved");
    storage
        .set(ENTRIES_SLOT, &serde_json::to_vec(&vec![saved.clone()]).unwrap())
        .unwrap();

    let mut store = EntryStore::new(storage);
    store.append(entry_at(5, Mood::Sad, "unsaved"));
    store.load().unwrap();
    assert_eq!(store.entries(), &[saved]);
}
