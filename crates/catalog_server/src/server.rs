//! The catalog HTTP server.

use crate::auth::{StaticTokenValidator, TokenAuthorizer};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::{HandlerContext, RequestHandler};
use axum::Router;
use catalog_core::DocumentStore;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// The catalog server.
///
/// Owns the request handler and builds the axum router around it. The
/// store is shared, so the same [`DocumentStore`] can back a server and
/// other in-process users.
///
/// # Example
///
/// ```
/// use catalog_core::{DocumentStore, StoreConfig};
/// use catalog_server::{CatalogServer, ServerConfig};
/// use std::sync::Arc;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = DocumentStore::open(&dir.path().join("db.json"), StoreConfig::default()).unwrap();
///
/// let config = ServerConfig::default().with_access_token("secret");
/// let server = Arc::new(CatalogServer::new(config, Arc::new(store)));
/// let _router = server.router();
/// ```
pub struct CatalogServer {
    handler: RequestHandler,
}

impl CatalogServer {
    /// Creates a server whose protected routes accept the configured token.
    pub fn new(config: ServerConfig, store: Arc<DocumentStore>) -> Self {
        let authorizer = Arc::new(StaticTokenValidator::new(config.access_token.clone()));
        Self::with_authorizer(config, store, authorizer)
    }

    /// Creates a server with a custom token check.
    pub fn with_authorizer(
        config: ServerConfig,
        store: Arc<DocumentStore>,
        authorizer: Arc<dyn TokenAuthorizer>,
    ) -> Self {
        let context = Arc::new(HandlerContext::new(config, store, authorizer));
        Self {
            handler: RequestHandler::new(context),
        }
    }

    /// Returns the request handler.
    pub fn handler(&self) -> &RequestHandler {
        &self.handler
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.handler.context().config
    }

    /// Returns the backing store.
    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.handler.context().store
    }

    /// Builds the HTTP router.
    pub fn router(self: &Arc<Self>) -> Router {
        crate::http::router(Arc::clone(self))
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    pub async fn serve<F>(self: Arc<Self>, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config().bind_addr).await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(
        self: Arc<Self>,
        listener: TcpListener,
        shutdown: F,
    ) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(%addr, store = self.store().location(), "catalog server listening");

        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        // In-memory state may be ahead of disk after a failed persist.
        let store = Arc::clone(self.store());
        tokio::task::spawn_blocking(move || {
            if store.is_dirty() {
                tracing::warn!("store has unpersisted changes, retrying persist on shutdown");
                if let Err(err) = store.persist() {
                    tracing::error!(error = %err, "final persist failed");
                }
            }
        })
        .await
        .map_err(|e| ServerError::Internal(format!("shutdown persist task failed: {e}")))?;

        tracing::info!("catalog server stopped");
        Ok(())
    }
}

impl std::fmt::Debug for CatalogServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogServer")
            .field("bind_addr", &self.config().bind_addr)
            .field("store", self.store())
            .finish()
    }
}
