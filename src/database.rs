use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::storage::{SlotStorage, StorageError};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
}

/// SQLite-backed key/value slots
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open (or create) the database file and initialize the schema
    pub fn new(path: &Path) -> Result<Self, DatabaseError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(path)?;

        let db = Database {
            conn,
            path: path.to_path_buf(),
        };
        db.initialize_schema()?;

        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Database {
            conn,
            path: PathBuf::from(":memory:"),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key             TEXT PRIMARY KEY,
                value           BLOB NOT NULL,
                updated_at      TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Read the raw value stored under `key`
    pub fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>, DatabaseError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Replace the value stored under `key`
    pub fn set_value(&self, key: &str, value: &[u8]) -> Result<(), DatabaseError> {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value, now],
        )?;
        Ok(())
    }
}

impl SlotStorage for Database {
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.get_value(slot)?)
    }

    fn set(&mut self, slot: &str, value: &[u8]) -> Result<(), StorageError> {
        Ok(self.set_value(slot, value)?)
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let db = Database::in_memory().unwrap();
        assert_eq!(db.get_value("moodEntries").unwrap(), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let db = Database::in_memory().unwrap();
        db.set_value("moodEntries", b"first").unwrap();
        db.set_value("moodEntries", b"second").unwrap();
        assert_eq!(db.get_value("moodEntries").unwrap(), Some(b"second".to_vec()));

        let count: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
