//! Favorite accessor.

use crate::document::Favorite;
use crate::error::CoreResult;
use crate::store::DocumentStore;

/// Typed view over the `favorites` collection.
///
/// Favorites carry no uniqueness constraint: adding the same pair twice
/// stores two records. Removal deletes every record matching the pair and
/// treats "nothing matched" as success.
#[derive(Debug, Clone, Copy)]
pub struct Favorites<'a> {
    store: &'a DocumentStore,
}

impl<'a> Favorites<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Returns every favorite in document order.
    #[must_use]
    pub fn list(&self) -> Vec<Favorite> {
        self.store.read(|doc| doc.favorites.clone())
    }

    /// Returns the favorites held by one user.
    #[must_use]
    pub fn for_user(&self, user_id: i64) -> Vec<Favorite> {
        self.store.read(|doc| {
            doc.favorites
                .iter()
                .filter(|f| f.user_id == user_id)
                .copied()
                .collect()
        })
    }

    /// Appends a favorite and persists the document.
    ///
    /// # Errors
    ///
    /// [`CoreError::PersistFailure`](crate::CoreError::PersistFailure) if the
    /// record was appended in memory but could not be written.
    pub fn add(&self, user_id: i64, product_id: i64) -> CoreResult<Favorite> {
        let favorite = Favorite::new(user_id, product_id);
        self.store.write(|doc| {
            doc.favorites.push(favorite);
            Ok(favorite)
        })
    }

    /// Removes every favorite matching `(user_id, product_id)` and persists
    /// the document.
    ///
    /// Returns how many records were removed; zero is not an error.
    ///
    /// # Errors
    ///
    /// [`CoreError::PersistFailure`](crate::CoreError::PersistFailure) if the
    /// removal could not be written.
    pub fn remove(&self, user_id: i64, product_id: i64) -> CoreResult<usize> {
        let target = Favorite::new(user_id, product_id);
        self.store.write(|doc| {
            let before = doc.favorites.len();
            doc.favorites.retain(|f| *f != target);
            let removed = before - doc.favorites.len();
            tracing::debug!(user_id, product_id, removed, "removed favorites");
            Ok(removed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use catalog_storage::InMemoryBackend;

    fn create_store() -> DocumentStore {
        DocumentStore::load(InMemoryBackend::new(), StoreConfig::default()).unwrap()
    }

    #[test]
    fn duplicates_accumulate_and_remove_together() {
        let store = create_store();
        store.favorites().add(7, 3).unwrap();
        store.favorites().add(1, 3).unwrap();
        store.favorites().add(7, 3).unwrap();

        assert_eq!(store.favorites().list().len(), 3);

        let removed = store.favorites().remove(7, 3).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.favorites().list(), vec![Favorite::new(1, 3)]);
    }

    #[test]
    fn removing_unknown_favorite_is_a_no_op() {
        let store = create_store();
        store.favorites().add(1, 1).unwrap();

        assert_eq!(store.favorites().remove(9, 9).unwrap(), 0);
        assert_eq!(store.favorites().list(), vec![Favorite::new(1, 1)]);
    }

    #[test]
    fn match_requires_both_ids() {
        let store = create_store();
        store.favorites().add(7, 3).unwrap();
        store.favorites().add(7, 4).unwrap();
        store.favorites().add(8, 3).unwrap();

        store.favorites().remove(7, 3).unwrap();
        assert_eq!(
            store.favorites().list(),
            vec![Favorite::new(7, 4), Favorite::new(8, 3)]
        );
        assert_eq!(store.favorites().for_user(7), vec![Favorite::new(7, 4)]);
    }
}
