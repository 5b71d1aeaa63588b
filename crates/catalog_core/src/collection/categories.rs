//! Category accessor.

use crate::document::Category;
use crate::error::{CoreError, CoreResult};
use crate::store::DocumentStore;
use crate::types::CollectionName;

/// Typed view over the `categories` collection.
///
/// Category names are unique (case-sensitive exact match). Ids follow the
/// store's [`IdPolicy`](crate::IdPolicy).
///
/// # Example
///
/// ```rust
/// use catalog_core::{DocumentStore, StoreConfig};
/// use catalog_storage::InMemoryBackend;
///
/// let store = DocumentStore::load(InMemoryBackend::new(), StoreConfig::default())?;
///
/// let shoes = store.categories().add("Shoes")?;
/// assert_eq!(store.categories().get(shoes.id)?.name, "Shoes");
///
/// assert!(store.categories().add("Shoes").unwrap_err().is_conflict());
/// # Ok::<(), catalog_core::CoreError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Categories<'a> {
    store: &'a DocumentStore,
}

impl<'a> Categories<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Returns every category in document order.
    #[must_use]
    pub fn list(&self) -> Vec<Category> {
        self.store.read(|doc| doc.categories.clone())
    }

    /// Returns the number of categories.
    #[must_use]
    pub fn count(&self) -> usize {
        self.store.read(|doc| doc.categories.len())
    }

    /// Returns the category with the given id.
    ///
    /// If legacy data holds duplicate ids, the first match wins.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if no category has this id.
    pub fn get(&self, id: i64) -> CoreResult<Category> {
        self.store.read(|doc| {
            doc.categories
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| CoreError::not_found(CollectionName::Categories, id))
        })
    }

    /// Returns the category with the given name, if any.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Category> {
        self.store
            .read(|doc| doc.categories.iter().find(|c| c.name == name).cloned())
    }

    /// Creates a category and persists the document.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Conflict`] if a category with this name exists
    /// - [`CoreError::IdExhausted`] if no id is left to assign
    /// - [`CoreError::PersistFailure`] if the category was added in memory
    ///   but could not be written
    pub fn add(&self, name: &str) -> CoreResult<Category> {
        let policy = self.store.config().id_policy;

        self.store.write(|doc| {
            if doc.categories.iter().any(|c| c.name == name) {
                return Err(CoreError::conflict(CollectionName::Categories, name));
            }

            let category = Category {
                id: doc.allocate_category_id(policy)?,
                name: name.to_string(),
            };
            doc.categories.push(category.clone());

            tracing::debug!(id = category.id, name, "added category");
            Ok(category)
        })
    }

    /// Removes the category with the given name and persists the document.
    ///
    /// Returns the removed record.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if no category has this name
    /// - [`CoreError::PersistFailure`] if the removal could not be written
    pub fn remove(&self, name: &str) -> CoreResult<Category> {
        self.store.write(|doc| {
            let index = doc
                .categories
                .iter()
                .position(|c| c.name == name)
                .ok_or_else(|| CoreError::not_found(CollectionName::Categories, name))?;

            let removed = doc.categories.remove(index);
            tracing::debug!(id = removed.id, name, "removed category");
            Ok(removed)
        })
    }
}
