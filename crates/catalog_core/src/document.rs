//! The catalog document and its record types.
//!
//! A document is one JSON object holding three ordered collections:
//!
//! ```text
//! {
//!   "products":   [ <opaque object>, ... ],
//!   "categories": [ {"id": <int>, "name": <string>}, ... ],
//!   "favorites":  [ {"user_id": <int>, "product_id": <int>}, ... ]
//! }
//! ```
//!
//! Missing collections decode as empty, unknown top-level fields are kept
//! as-is, and `next_category_id` appears once the monotonic id policy has
//! handed out an id.

use crate::config::IdPolicy;
use crate::error::{CoreError, CoreResult};
use crate::types::CollectionName;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A product record. Products are opaque pass-through data.
pub type Product = Value;

/// A category record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id.
    pub id: i64,
    /// Category name, unique within a document.
    pub name: String,
}

/// A favorite record: one user marking one product.
///
/// Favorites have no surrogate id; the full tuple is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Favorite {
    /// The user holding the favorite.
    pub user_id: i64,
    /// The favorited product.
    pub product_id: i64,
}

impl Favorite {
    /// Creates a favorite record.
    #[must_use]
    pub const fn new(user_id: i64, product_id: i64) -> Self {
        Self {
            user_id,
            product_id,
        }
    }
}

/// The root document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Product records.
    #[serde(default)]
    pub products: Vec<Product>,

    /// Category records.
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Favorite records.
    #[serde(default)]
    pub favorites: Vec<Favorite>,

    /// Next category id under [`IdPolicy::Monotonic`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_category_id: Option<i64>,

    /// Top-level fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a document from JSON bytes.
    ///
    /// `location` only feeds the error message.
    pub fn decode(data: &[u8], location: &str) -> CoreResult<Self> {
        serde_json::from_slice(data).map_err(|source| CoreError::CorruptStore {
            location: location.to_string(),
            source,
        })
    }

    /// Encodes the document as JSON.
    ///
    /// Pretty output uses four-space indentation.
    pub fn encode(&self, pretty: bool) -> CoreResult<Vec<u8>> {
        if !pretty {
            return serde_json::to_vec(self).map_err(CoreError::Encode);
        }

        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer).map_err(CoreError::Encode)?;
        Ok(out)
    }

    /// Returns the number of records in a collection.
    #[must_use]
    pub fn len(&self, name: CollectionName) -> usize {
        match name {
            CollectionName::Products => self.products.len(),
            CollectionName::Categories => self.categories.len(),
            CollectionName::Favorites => self.favorites.len(),
        }
    }

    /// Returns true if every collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        CollectionName::ALL.into_iter().all(|name| self.len(name) == 0)
    }

    /// Returns a collection as generic JSON values.
    pub fn collection_values(&self, name: CollectionName) -> CoreResult<Vec<Value>> {
        let encoded = match name {
            CollectionName::Products => return Ok(self.products.clone()),
            CollectionName::Categories => serde_json::to_value(&self.categories),
            CollectionName::Favorites => serde_json::to_value(&self.favorites),
        };

        match encoded.map_err(CoreError::Encode)? {
            Value::Array(values) => Ok(values),
            _ => Ok(Vec::new()),
        }
    }

    /// Allocates the id for a new category.
    ///
    /// Under [`IdPolicy::Monotonic`] this advances the persisted counter,
    /// seeding it from the existing records the first time so documents
    /// written without a counter never reissue a live id.
    ///
    /// # Errors
    ///
    /// [`CoreError::IdExhausted`] if the next id, or the counter after it,
    /// does not fit in an `i64`. The document is unchanged in that case.
    pub fn allocate_category_id(&mut self, policy: IdPolicy) -> CoreResult<i64> {
        let id = self.peek_category_id(policy)?;
        if policy == IdPolicy::Monotonic {
            let next = id.checked_add(1).ok_or(CoreError::IdExhausted {
                collection: CollectionName::Categories,
            })?;
            self.next_category_id = Some(next);
        }
        Ok(id)
    }

    /// Returns the id the next [`allocate_category_id`](Self::allocate_category_id)
    /// call would hand out, without advancing anything.
    ///
    /// # Errors
    ///
    /// [`CoreError::IdExhausted`] exactly when that call would fail.
    pub fn peek_category_id(&self, policy: IdPolicy) -> CoreResult<i64> {
        let id = match policy {
            IdPolicy::CountPlusOne => i64::try_from(self.categories.len())
                .ok()
                .and_then(|count| count.checked_add(1)),
            IdPolicy::Monotonic => self
                .next_category_id
                .or_else(|| self.seed_category_id())
                .filter(|id| id.checked_add(1).is_some()),
        };
        id.ok_or(CoreError::IdExhausted {
            collection: CollectionName::Categories,
        })
    }

    /// Checks category invariants.
    ///
    /// Returns one message per violation: repeated names, repeated ids, and
    /// a stored counter that would reissue a live id.
    #[must_use]
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut names = HashSet::new();
        let mut ids = HashSet::new();

        for category in &self.categories {
            if !names.insert(category.name.as_str()) {
                problems.push(format!("duplicate category name: {}", category.name));
            }
            if !ids.insert(category.id) {
                problems.push(format!("duplicate category id: {}", category.id));
            }
        }

        if let Some(next) = self.next_category_id {
            if let Some(max) = self.categories.iter().map(|c| c.id).max() {
                if next <= max {
                    problems.push(format!(
                        "next_category_id {next} is not above the highest id {max}"
                    ));
                }
            }
        }

        problems
    }

    fn seed_category_id(&self) -> Option<i64> {
        let max_id = self.categories.iter().map(|c| c.id).max().unwrap_or(0);
        let count = i64::try_from(self.categories.len()).ok()?;
        max_id.max(count).checked_add(1)
    }
}
