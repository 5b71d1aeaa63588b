//! # Catalog Core
//!
//! File-backed JSON document store for the catalog service.
//!
//! This crate provides:
//! - [`Document`]: the single JSON document holding `products`,
//!   `categories` and `favorites`
//! - [`DocumentStore`]: loads the document, serializes concurrent access,
//!   and persists the whole document after every mutation
//! - Typed accessors ([`Categories`], [`Favorites`], [`Products`]) carrying
//!   each collection's identity and uniqueness rules
//!
//! ## Example
//!
//! ```rust,no_run
//! use catalog_core::{DocumentStore, StoreConfig};
//! use std::path::Path;
//!
//! let store = DocumentStore::open(Path::new("db.json"), StoreConfig::default())?;
//!
//! store.categories().add("Kitchen")?;
//! store.favorites().add(7, 3)?;
//!
//! for category in store.categories().list() {
//!     println!("{} {}", category.id, category.name);
//! }
//! # Ok::<(), catalog_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
// Production code MUST NOT use panic!/unwrap()/expect()
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod collection;
mod config;
mod document;
mod error;
mod store;
mod types;

pub use collection::{Categories, Favorites, Products};
pub use config::{IdPolicy, StoreConfig};
pub use document::{Category, Document, Favorite, Product};
pub use error::{CoreError, CoreResult};
pub use store::DocumentStore;
pub use types::CollectionName;

/// Crate version, as reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
