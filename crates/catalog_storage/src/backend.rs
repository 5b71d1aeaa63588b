//! Storage backend trait definition.

use crate::error::StorageResult;

/// A whole-document storage backend.
///
/// Backends store **one opaque blob**. The document store serializes its
/// entire state on every mutation and hands the bytes to [`replace`], so a
/// backend never sees partial updates.
///
/// # Invariants
///
/// - `read` returns `None` until the first successful `replace`
/// - after a successful `replace(data)`, `read` returns exactly `data`
/// - after a failed `replace`, `read` returns the previous content unchanged
/// - Backends must be `Send + Sync` for concurrent access
///
/// # Implementors
///
/// - [`super::FileBackend`] - For persistent storage
/// - [`super::InMemoryBackend`] - For testing
///
/// [`replace`]: StorageBackend::replace
pub trait StorageBackend: Send + Sync {
    /// Reads the whole stored document.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read.
    fn read(&self) -> StorageResult<Option<Vec<u8>>>;

    /// Atomically replaces the stored document with `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot complete. The previously stored
    /// content is left intact in that case.
    fn replace(&mut self, data: &[u8]) -> StorageResult<()>;

    /// Returns a human-readable description of where the document lives.
    fn location(&self) -> String;
}
