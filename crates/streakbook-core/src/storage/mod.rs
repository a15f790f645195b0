//! Persistence: a string-keyed JSON store plus the TOML config file.
//!
//! Reads are fail-soft. A missing, unreadable, or corrupt record yields the
//! caller's fallback value and a `warn` log, never an error. Writes are
//! best-effort: a failure is logged at `error` and the in-memory state stays
//! authoritative until the next successful write.

mod config;
pub mod database;
mod memory;

pub use config::{ClockConfig, Config, DisplayConfig};
pub use database::KvDatabase;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, warn};

use crate::error::{ConfigError, StoreError};

/// Record keys.
pub mod keys {
    pub const ACTIVITIES: &str = "activities";
    pub const FINANCES: &str = "finances";
    pub const HABIT_LOGS: &str = "habitLogs";
    pub const MONTHLY_BUDGET: &str = "monthlyBudget";
}

/// Raw key-value access. Values are JSON text.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Reads and decodes `key`, returning `fallback` on any failure.
pub fn load<T, S>(store: &S, key: &str, fallback: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return fallback,
        Err(e) => {
            warn!(key, error = %e, "store read failed, using default");
            return fallback;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "stored value is corrupt, using default");
            fallback
        }
    }
}

/// Encodes and writes `value` under `key`. Returns whether the write landed.
pub fn save<T, S>(store: &mut S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            error!(key, error = %e, "failed to encode value");
            return false;
        }
    };
    match store.set(key, &json) {
        Ok(()) => true,
        Err(e) => {
            error!(key, error = %e, "store write failed");
            false
        }
    }
}

/// Returns the data directory, creating it if needed.
///
/// `STREAKBOOK_DATA_DIR` wins when set. Otherwise `~/.config/streakbook/`, or
/// `~/.config/streakbook-dev/` when `STREAKBOOK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STREAKBOOK_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STREAKBOOK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("streakbook-dev")
            } else {
                base_dir.join("streakbook")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
