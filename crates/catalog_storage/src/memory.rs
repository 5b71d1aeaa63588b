//! In-memory storage backend for testing.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::io;
use std::sync::Arc;

/// An in-memory storage backend.
///
/// Clones share the same underlying buffer, so a test can keep one handle
/// while the store owns another and still observe (or sabotage) what gets
/// written.
///
/// # Failure Injection
///
/// [`fail_writes`](Self::fail_writes) makes every subsequent `replace`
/// fail with an I/O error while keeping the last good content, which is how
/// persist-failure handling is exercised in tests.
///
/// # Example
///
/// ```rust
/// use catalog_storage::{StorageBackend, InMemoryBackend};
///
/// let handle = InMemoryBackend::new();
/// let mut backend = handle.clone();
/// backend.replace(b"test data").unwrap();
/// assert_eq!(handle.data().unwrap(), b"test data");
///
/// handle.fail_writes(true);
/// assert!(backend.replace(b"lost").is_err());
/// assert_eq!(handle.data().unwrap(), b"test data");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    data: Option<Vec<u8>>,
    fail_writes: bool,
    writes: u64,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory backend with pre-existing data.
    ///
    /// Useful for testing load of existing (or corrupt) documents.
    #[must_use]
    pub fn with_data(data: impl Into<Vec<u8>>) -> Self {
        let backend = Self::default();
        backend.inner.write().data = Some(data.into());
        backend
    }

    /// Returns a copy of the stored document, if any.
    #[must_use]
    pub fn data(&self) -> Option<Vec<u8>> {
        self.inner.read().data.clone()
    }

    /// Makes subsequent writes fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.inner.write().fail_writes = fail;
    }

    /// Returns the number of successful replacements so far.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.inner.read().writes
    }
}

impl StorageBackend for InMemoryBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.inner.read().data.clone())
    }

    fn replace(&mut self, data: &[u8]) -> StorageResult<()> {
        let mut state = self.inner.write();
        if state.fail_writes {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::Other,
                "injected write failure",
            )));
        }
        state.data = Some(data.to_vec());
        state.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reads_none() {
        let backend = InMemoryBackend::new();
        assert!(backend.read().unwrap().is_none());
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn replace_overwrites() {
        let mut backend = InMemoryBackend::with_data(b"old".to_vec());
        backend.replace(b"new").unwrap();
        assert_eq!(backend.read().unwrap().unwrap(), b"new");
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn clones_share_state() {
        let handle = InMemoryBackend::new();
        let mut owned = handle.clone();
        owned.replace(b"shared").unwrap();
        assert_eq!(handle.data().unwrap(), b"shared");
    }

    #[test]
    fn injected_failure_keeps_content() {
        let handle = InMemoryBackend::with_data(b"kept".to_vec());
        let mut owned = handle.clone();

        handle.fail_writes(true);
        let err = owned.replace(b"dropped").unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
        assert_eq!(handle.data().unwrap(), b"kept");

        handle.fail_writes(false);
        owned.replace(b"recovered").unwrap();
        assert_eq!(handle.data().unwrap(), b"recovered");
    }
}
