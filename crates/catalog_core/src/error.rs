//! Error types for the catalog core.

use crate::types::CollectionName;
use catalog_storage::StorageError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in catalog core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The backing document exists but is not a valid catalog document.
    ///
    /// Fatal to store initialization; the store never falls back to an
    /// empty document in this case.
    #[error("corrupt store at {location}: {source}")]
    CorruptStore {
        /// Where the document was read from.
        location: String,
        /// The parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// Writing the document failed.
    ///
    /// The in-memory mutation that triggered the write has already been
    /// applied and is kept.
    #[error("failed to persist document: {source}")]
    PersistFailure {
        /// The underlying storage failure.
        #[source]
        source: StorageError,
    },

    /// Lookup or removal target is absent.
    #[error("{} not found: {key}", .collection.record_noun())]
    NotFound {
        /// The collection searched.
        collection: CollectionName,
        /// The key that was looked up.
        key: String,
    },

    /// A uniqueness constraint would be violated.
    #[error("{} already exists: {key}", .collection.record_noun())]
    Conflict {
        /// The collection holding the constraint.
        collection: CollectionName,
        /// The conflicting key.
        key: String,
    },

    /// No further id fits in the collection's id type.
    #[error("no {} ids left", .collection.record_noun())]
    IdExhausted {
        /// The collection allocating the id.
        collection: CollectionName,
    },

    /// No collection with this name exists in a document.
    #[error("unknown collection: {name}")]
    UnknownCollection {
        /// The requested name.
        name: String,
    },

    /// Storage backend error outside of a persist (open, read, lock).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The in-memory document could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CoreError {
    /// Creates a not found error.
    pub fn not_found(collection: CollectionName, key: impl ToString) -> Self {
        Self::NotFound {
            collection,
            key: key.to_string(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(collection: CollectionName, key: impl ToString) -> Self {
        Self::Conflict {
            collection,
            key: key.to_string(),
        }
    }

    /// Returns true for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }

    /// Returns true for `Conflict`.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CoreError::Conflict { .. })
    }

    /// Returns true for `PersistFailure`.
    pub fn is_persist_failure(&self) -> bool {
        matches!(self, CoreError::PersistFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_record() {
        let err = CoreError::not_found(CollectionName::Categories, 7);
        assert_eq!(err.to_string(), "category not found: 7");

        let err = CoreError::conflict(CollectionName::Categories, "Shoes");
        assert_eq!(err.to_string(), "category already exists: Shoes");
    }

    #[test]
    fn classification() {
        assert!(CoreError::not_found(CollectionName::Categories, "x").is_not_found());
        assert!(CoreError::conflict(CollectionName::Categories, "x").is_conflict());
        assert!(!CoreError::conflict(CollectionName::Categories, "x").is_not_found());
    }
}
