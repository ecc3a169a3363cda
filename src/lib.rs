pub mod cli;
pub mod config;
pub mod database;
pub mod logging;
pub mod models;
pub mod storage;
pub mod store;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use database::Database;
pub use models::{Mood, MoodEntry};
pub use storage::{FileStorage, MemoryStorage, SlotStorage, StorageError};
pub use store::{EntryStore, LoadError, PersistError, StoreState};
pub use utils::Profile;
