//! Product accessor.

use crate::document::Product;
use crate::store::DocumentStore;

/// Read-only view over the `products` collection.
///
/// Product records are opaque JSON and are returned exactly as stored.
#[derive(Debug, Clone, Copy)]
pub struct Products<'a> {
    store: &'a DocumentStore,
}

impl<'a> Products<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Returns every product in document order.
    #[must_use]
    pub fn list(&self) -> Vec<Product> {
        self.store.read(|doc| doc.products.clone())
    }

    /// Returns the number of products.
    #[must_use]
    pub fn count(&self) -> usize {
        self.store.read(|doc| doc.products.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use catalog_storage::InMemoryBackend;
    use serde_json::json;

    #[test]
    fn products_pass_through_unchanged() {
        let raw = br#"{"products": [{"id": 1, "name": "Lamp", "tags": ["home"]}, "loose"]}"#;
        let store =
            DocumentStore::load(InMemoryBackend::with_data(raw.to_vec()), StoreConfig::default())
                .unwrap();

        assert_eq!(
            store.products().list(),
            vec![json!({"id": 1, "name": "Lamp", "tags": ["home"]}), json!("loose")]
        );
        assert_eq!(store.products().count(), 2);
    }
}
