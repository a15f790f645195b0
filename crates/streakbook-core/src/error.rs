//! Core error types for streakbook-core.
//!
//! Only validation failures ever reach the user. Store failures are recovered
//! or logged inside the storage layer; they are still typed here so the
//! adapters can report them precisely.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for streakbook-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Key-value store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Validation errors.
///
/// An operation that returns one of these has not changed any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Habit name was empty after trimming
    #[error("Habit name must not be empty")]
    EmptyHabitName,

    /// Another habit already uses this name (case-insensitive)
    #[error("Habit already exists: {0}")]
    DuplicateHabit(String),

    /// Finance entry description was empty after trimming
    #[error("Description must not be empty")]
    EmptyDescription,

    /// Amount was not a number, rounded to zero or less, or exceeded the cap
    #[error("Invalid amount '{0}': must be a positive number up to 1000000000000")]
    InvalidAmount(String),

    /// Date string was not `YYYY-MM-DD`
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Month string was not `YYYY-MM`
    #[error("Invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Stored value could not be read
    #[error("Failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Value could not be written
    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// Store directory is unusable
    #[error("Failed to open store at {path}: {message}")]
    OpenFailed { path: PathBuf, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be determined or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
