//! Core error types for chaff-core.
//!
//! Failures are split into what the control surface reports back to a
//! caller ([`CoreError`]) and what the persistence layer can fail with
//! ([`StoreError`]). Tick-internal failures are logged and swallowed by
//! the scheduler; they never escalate past it.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for chaff-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Start or simulation attempted without an active profile.
    #[error("no active profile")]
    NoProfile,

    /// The activity generator failed or timed out.
    #[error("activity generator failed: {0}")]
    Generator(String),

    /// Persistent store errors
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Unknown inbound control request kind.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistent-store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Read or write failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Store is locked by another writer
    #[error("store is locked")]
    Locked,

    /// A persisted record exists but cannot be decoded
    #[error("corrupt record for key '{key}': {message}")]
    CorruptRecord { key: String, message: String },

    /// IO errors (data directory creation and friends)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
