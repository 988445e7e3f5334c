//! Weight log error types
//!
//! Defines all errors that can occur in the storage layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or appending the weight log
#[derive(Error, Debug)]
pub enum StorageError {
    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(String),

    /// Log file cannot be opened, read, or written
    #[error("Weight log unavailable at {path:?}: {reason}")]
    LogUnavailable { path: PathBuf, reason: String },

    /// Log file contents could not be parsed
    #[error("Corrupt weight log at line {line}: {reason}")]
    Corruption { line: u64, reason: String },

    /// Entry rejected before it was written
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

impl StorageError {
    /// Whether the log itself is unreachable, as opposed to a bad entry
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StorageError::LogUnavailable { .. } | StorageError::Lock(_)
        )
    }
}

impl From<csv::Error> for StorageError {
    fn from(err: csv::Error) -> Self {
        StorageError::Csv(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
