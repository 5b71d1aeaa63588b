//! The document store: one in-memory document plus its durable copy.

use crate::collection::{Categories, Favorites, Products};
use crate::config::StoreConfig;
use crate::document::Document;
use crate::error::{CoreError, CoreResult};
use crate::types::CollectionName;
use catalog_storage::{FileBackend, StorageBackend};
use parking_lot::RwLock;
use serde_json::Value;
use std::path::Path;

/// Owns the canonical in-memory [`Document`] and persists it through a
/// [`StorageBackend`].
///
/// # Lifecycle
///
/// A store only exists once its document has been loaded: [`open`] and
/// [`load`] either return a ready store or an error, so there is no way to
/// reach an accessor before the document is in memory.
///
/// # Thread Safety
///
/// The document and its backend sit behind one `RwLock`. Every mutation
/// holds the write lock across check, mutate and persist, so concurrent
/// writers are serialized and cannot lose each other's updates. Reads take
/// the read lock, run concurrently, and never see a half-applied mutation.
/// Share a store across threads as `Arc<DocumentStore>`.
///
/// # Persist failures
///
/// A mutation is applied in memory before it is written. If the write
/// fails the mutation stays, the caller gets
/// [`CoreError::PersistFailure`], and the store is marked dirty until a
/// later persist succeeds.
///
/// [`open`]: DocumentStore::open
/// [`load`]: DocumentStore::load
pub struct DocumentStore {
    config: StoreConfig,
    location: String,
    inner: RwLock<Inner>,
}

struct Inner {
    document: Document,
    backend: Box<dyn StorageBackend>,
    dirty: bool,
}

impl Inner {
    fn persist(&mut self, pretty: bool, location: &str) -> CoreResult<()> {
        let data = self.document.encode(pretty)?;

        match self.backend.replace(&data) {
            Ok(()) => {
                self.dirty = false;
                tracing::debug!(location, bytes = data.len(), "persisted catalog document");
                Ok(())
            }
            Err(source) => {
                self.dirty = true;
                tracing::warn!(location, error = %source, "failed to persist catalog document");
                Err(CoreError::PersistFailure { source })
            }
        }
    }
}

impl DocumentStore {
    /// Opens the document stored at `path`.
    ///
    /// Parent directories are created as needed. If the file does not exist
    /// an empty document is created and written immediately.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Storage`] if the file is locked by another owner or unreadable
    /// - [`CoreError::CorruptStore`] if the file exists but is not a valid document
    /// - [`CoreError::PersistFailure`] if the empty document cannot be written
    pub fn open(path: &Path, config: StoreConfig) -> CoreResult<Self> {
        let backend =
            FileBackend::open_with_create_dirs(path)?.sync_on_write(config.sync_on_write);
        Self::load(backend, config)
    }

    /// Loads the document held by `backend`.
    ///
    /// # Errors
    ///
    /// Same as [`open`](Self::open), minus the path handling.
    pub fn load<B>(backend: B, config: StoreConfig) -> CoreResult<Self>
    where
        B: StorageBackend + 'static,
    {
        let location = backend.location();

        let inner = match backend.read()? {
            Some(data) => {
                let document = Document::decode(&data, &location)?;
                tracing::info!(
                    location = %location,
                    products = document.products.len(),
                    categories = document.categories.len(),
                    favorites = document.favorites.len(),
                    "loaded catalog document"
                );
                Inner {
                    document,
                    backend: Box::new(backend),
                    dirty: false,
                }
            }
            None => {
                tracing::info!(
                    location = %location,
                    "no catalog document found, creating an empty one"
                );
                let mut inner = Inner {
                    document: Document::new(),
                    backend: Box::new(backend),
                    dirty: true,
                };
                inner.persist(config.pretty, &location)?;
                inner
            }
        };

        Ok(Self {
            config,
            location,
            inner: RwLock::new(inner),
        })
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns where the document is persisted.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Runs `f` against the document under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        let inner = self.inner.read();
        f(&inner.document)
    }

    /// Runs `f` against the document under the write lock, then persists.
    ///
    /// `f` must leave the document untouched when it returns an error; the
    /// accessors check their preconditions before mutating.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or [`CoreError::PersistFailure`] if the
    /// mutation was applied but could not be written.
    pub fn write<R>(&self, f: impl FnOnce(&mut Document) -> CoreResult<R>) -> CoreResult<R> {
        let mut inner = self.inner.write();
        let result = f(&mut inner.document)?;
        inner.dirty = true;
        inner.persist(self.config.pretty, &self.location)?;
        Ok(result)
    }

    /// Writes the current document to the backend.
    ///
    /// Useful to retry after a [`CoreError::PersistFailure`].
    pub fn persist(&self) -> CoreResult<()> {
        let mut inner = self.inner.write();
        inner.persist(self.config.pretty, &self.location)
    }

    /// Returns true if the in-memory document has changes the backend
    /// does not hold.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.inner.read().dirty
    }

    /// Returns a copy of the whole document.
    #[must_use]
    pub fn snapshot(&self) -> Document {
        self.read(Document::clone)
    }

    /// Returns a copy of the named collection as JSON values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCollection`] for names other than
    /// `products`, `categories` and `favorites`.
    pub fn collection(&self, name: &str) -> CoreResult<Vec<Value>> {
        let name: CollectionName = name.parse()?;
        self.read(|doc| doc.collection_values(name))
    }

    /// Accessor for the `categories` collection.
    #[must_use]
    pub fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }

    /// Accessor for the `favorites` collection.
    #[must_use]
    pub fn favorites(&self) -> Favorites<'_> {
        Favorites::new(self)
    }

    /// Accessor for the `products` collection.
    #[must_use]
    pub fn products(&self) -> Products<'_> {
        Products::new(self)
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("location", &self.location)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_storage::InMemoryBackend;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn missing_document_is_created_and_persisted() {
        let backend = InMemoryBackend::new();
        let store = DocumentStore::load(backend.clone(), StoreConfig::default()).unwrap();

        assert!(store.snapshot().is_empty());
        assert!(!store.is_dirty());

        let written: Value = serde_json::from_slice(&backend.data().unwrap()).unwrap();
        assert_eq!(
            written,
            json!({"products": [], "categories": [], "favorites": []})
        );
    }

    #[test]
    fn open_creates_file_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("db.json");

        let store = DocumentStore::open(&path, StoreConfig::default()).unwrap();
        assert!(path.exists());
        assert_eq!(store.location(), path.display().to_string());
    }

    #[test]
    fn corrupt_document_fails_load() {
        let backend = InMemoryBackend::with_data(b"{not json".to_vec());
        let result = DocumentStore::load(backend.clone(), StoreConfig::default());

        assert!(matches!(result, Err(CoreError::CorruptStore { .. })));
        // Nothing was overwritten.
        assert_eq!(backend.data().unwrap(), b"{not json");
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn bootstrap_write_failure_is_reported() {
        let backend = InMemoryBackend::new();
        backend.fail_writes(true);

        let result = DocumentStore::load(backend, StoreConfig::default());
        assert!(matches!(result, Err(CoreError::PersistFailure { .. })));
    }

    #[test]
    fn second_open_of_same_path_is_locked() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");

        let _store = DocumentStore::open(&path, StoreConfig::default()).unwrap();
        let second = DocumentStore::open(&path, StoreConfig::default());
        assert!(matches!(second, Err(CoreError::Storage(ref e)) if e.is_locked()));
    }

    #[test]
    fn collection_by_name() {
        let raw = br#"{"products": [{"name": "lamp"}], "categories": [{"id": 1, "name": "Home"}], "favorites": []}"#;
        let store =
            DocumentStore::load(InMemoryBackend::with_data(raw.to_vec()), StoreConfig::default())
                .unwrap();

        assert_eq!(store.collection("products").unwrap(), vec![json!({"name": "lamp"})]);
        assert_eq!(
            store.collection("categories").unwrap(),
            vec![json!({"id": 1, "name": "Home"})]
        );
        assert!(store.collection("favorites").unwrap().is_empty());
        assert!(matches!(
            store.collection("orders"),
            Err(CoreError::UnknownCollection { .. })
        ));
    }

    #[test]
    fn failed_write_keeps_mutation_and_marks_dirty() {
        let backend = InMemoryBackend::new();
        let store = DocumentStore::load(backend.clone(), StoreConfig::default()).unwrap();
        let before = backend.data().unwrap();

        backend.fail_writes(true);
        let err = store
            .write(|doc| {
                doc.products.push(json!({"name": "chair"}));
                Ok(())
            })
            .unwrap_err();
        assert!(err.is_persist_failure());
        assert!(store.is_dirty());
        assert_eq!(store.snapshot().products.len(), 1);
        assert_eq!(backend.data().unwrap(), before);

        backend.fail_writes(false);
        store.persist().unwrap();
        assert!(!store.is_dirty());

        let reloaded = DocumentStore::load(backend, StoreConfig::default()).unwrap();
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[test]
    fn rejected_write_does_not_persist() {
        let backend = InMemoryBackend::new();
        let store = DocumentStore::load(backend.clone(), StoreConfig::default()).unwrap();
        let writes = backend.write_count();

        let result: CoreResult<()> =
            store.write(|_| Err(CoreError::not_found(CollectionName::Categories, "x")));
        assert!(result.unwrap_err().is_not_found());
        assert_eq!(backend.write_count(), writes);
        assert!(!store.is_dirty());
    }
}
