//! # Catalog Server
//!
//! HTTP surface for the catalog document store.
//!
//! This crate provides:
//! - REST routes for products, categories and favorites
//! - A static-token gate on every resource route
//! - A login route exchanging configured credentials for the token
//! - Mapping of store errors onto HTTP status codes
//!
//! # Architecture
//!
//! [`RequestHandler`] holds the resource logic and knows nothing about
//! HTTP beyond status codes. [`CatalogServer`] wraps it in an axum
//! router; handlers run on the blocking pool because the store is
//! synchronous.
//!
//! # Authentication
//!
//! Protected routes read the `Authorization` header, either the bare token
//! or `Bearer <token>`. The check is injectable:
//!
//! ```rust,ignore
//! use catalog_server::{CatalogServer, ServerConfig, TokenAuthorizer};
//!
//! let authorizer: Arc<dyn TokenAuthorizer> = Arc::new(|t: &str| t == "secret");
//! let server = CatalogServer::with_authorizer(ServerConfig::default(), store, authorizer);
//! ```
//!
//! With no token configured every protected request is rejected.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod auth;
mod config;
mod error;
mod handler;
mod http;
mod server;

pub use auth::{token_from_header, Credentials, StaticTokenValidator, TokenAuthorizer};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{
    CategoryRequest, CategoryResponse, FavoriteRemoval, FavoriteRequest, FavoriteResponse,
    HandlerContext, HealthResponse, LoginRequest, MessageResponse, RequestHandler, TokenResponse,
};
pub use server::CatalogServer;
