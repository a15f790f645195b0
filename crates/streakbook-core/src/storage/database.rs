//! SQLite-backed key-value store.
//!
//! One `kv` table, one row per record key. Every write replaces the whole
//! value for its key. Two processes sharing a database file can still lose
//! each other's updates: each loads all records at start and writes its own
//! copy back, and nothing coordinates them.

use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

use super::{data_dir, KeyValueStore};
use crate::error::{CoreError, StoreError};

const DB_FILE: &str = "streakbook.db";

/// SQLite database holding the `kv` table.
pub struct KvDatabase {
    conn: Connection,
}

impl KvDatabase {
    /// Open the database at `<data_dir>/streakbook.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unusable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join(DB_FILE);
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let open_failed = |e: rusqlite::Error| StoreError::OpenFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let conn = Connection::open(path).map_err(open_failed)?;
        let db = Self { conn };
        db.migrate().map_err(open_failed)?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self, StoreError> {
        let open_failed = |e: rusqlite::Error| StoreError::OpenFailed {
            path: PathBuf::from(":memory:"),
            message: e.to_string(),
        };
        let conn = Connection::open_in_memory().map_err(open_failed)?;
        let db = Self { conn };
        db.migrate().map_err(open_failed)?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl KeyValueStore for KvDatabase {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.kv_get(key).map_err(|e| StoreError::ReadFailed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.kv_set(key, value).map_err(|e| StoreError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}
