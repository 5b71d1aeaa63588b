//! # Catalog Storage
//!
//! Storage backends for the catalog document store.
//!
//! A backend holds exactly one document as an **opaque byte blob**. It does
//! not parse JSON or know about collections; the store above it owns the
//! format. Backends only need two operations: read the whole blob, and
//! replace it atomically.
//!
//! ## Design Principles
//!
//! - One backend instance owns one document
//! - `replace` is all-or-nothing: a failed write never leaves a truncated document
//! - Must be `Send + Sync` so the store can be shared across threads
//!
//! ## Available Backends
//!
//! - [`FileBackend`] - Persistent storage using write-then-rename
//! - [`InMemoryBackend`] - For testing, with write-failure injection
//!
//! ## Example
//!
//! ```rust
//! use catalog_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! assert!(backend.read().unwrap().is_none());
//!
//! backend.replace(b"{\"products\":[]}").unwrap();
//! assert_eq!(backend.read().unwrap().unwrap(), b"{\"products\":[]}");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
