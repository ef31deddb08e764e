//! Core error types for habitpool-core.
//!
//! The modeling engines (streak, pool, analytics, reward) are total functions
//! and never fail. Errors only come from persisting the user document, loading
//! configuration, or rejecting an invalid mutation of the document.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitpool-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Coach collaborator failures
    #[error("Coach error: {0}")]
    Coach(String),
}

/// Errors raised while reading or writing the user document.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The document could not be read
    #[error("Failed to read user data from {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },

    /// The document could not be written
    #[error("Failed to write user data to {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    /// The document exists but is not valid JSON for the schema
    #[error("Corrupt user data at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDirUnavailable(String),
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

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors for document mutations.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Habit id does not exist in the document
    #[error("Unknown habit: {0}")]
    UnknownHabit(String),

    /// Nothing to undo for the habit on the given day
    #[error("No completion to undo for habit {habit_id} on {date}")]
    NothingToUndo {
        habit_id: String,
        date: chrono::NaiveDate,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
