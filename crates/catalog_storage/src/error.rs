//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Another process holds the document lock.
    #[error("document locked: {path} is owned by another process")]
    Locked {
        /// Path of the lock file that could not be acquired.
        path: PathBuf,
    },
}

impl StorageError {
    /// Returns true if this error came from lock contention.
    pub fn is_locked(&self) -> bool {
        matches!(self, StorageError::Locked { .. })
    }
}
