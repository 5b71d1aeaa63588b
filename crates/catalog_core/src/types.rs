//! Core type definitions for the catalog store.

use crate::error::CoreError;
use std::fmt;
use std::str::FromStr;

/// Name of one of the collections held by a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectionName {
    /// Opaque product records.
    Products,
    /// `{id, name}` category records.
    Categories,
    /// `{user_id, product_id}` favorite records.
    Favorites,
}

impl CollectionName {
    /// All collections, in document order.
    pub const ALL: [CollectionName; 3] = [
        CollectionName::Products,
        CollectionName::Categories,
        CollectionName::Favorites,
    ];

    /// Returns the JSON field name of the collection.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CollectionName::Products => "products",
            CollectionName::Categories => "categories",
            CollectionName::Favorites => "favorites",
        }
    }

    /// Returns the singular noun used in messages ("category", ...).
    #[must_use]
    pub const fn record_noun(self) -> &'static str {
        match self {
            CollectionName::Products => "product",
            CollectionName::Categories => "category",
            CollectionName::Favorites => "favorite",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| CoreError::UnknownCollection { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_names() {
        for name in CollectionName::ALL {
            assert_eq!(name.as_str().parse::<CollectionName>().unwrap(), name);
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        let err = "Categories".parse::<CollectionName>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownCollection { .. }));
    }

    #[test]
    fn display_uses_field_name() {
        assert_eq!(format!("{}", CollectionName::Favorites), "favorites");
        assert_eq!(CollectionName::Categories.record_noun(), "category");
    }
}
