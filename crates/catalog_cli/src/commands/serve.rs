//! Serve command implementation.

use catalog_core::{DocumentStore, IdPolicy, StoreConfig};
use catalog_server::{CatalogServer, ServerConfig};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

/// Options for the serve command.
#[derive(Debug)]
pub struct ServeOptions {
    /// Address to listen on.
    pub bind: SocketAddr,
    /// Static access token.
    pub token: Option<String>,
    /// Login username and password.
    pub credentials: Option<(String, String)>,
    /// Use count + 1 id assignment.
    pub legacy_ids: bool,
    /// Fsync after each write.
    pub sync_on_write: bool,
}

impl ServeOptions {
    fn store_config(&self) -> StoreConfig {
        let policy = if self.legacy_ids {
            IdPolicy::CountPlusOne
        } else {
            IdPolicy::Monotonic
        };
        StoreConfig::new()
            .id_policy(policy)
            .sync_on_write(self.sync_on_write)
    }

    fn server_config(&self) -> ServerConfig {
        let mut config = ServerConfig::new(self.bind);
        if let Some(token) = &self.token {
            config = config.with_access_token(token.clone());
        }
        if let Some((username, password)) = &self.credentials {
            config = config.with_credentials(username.clone(), password.clone());
        }
        config
    }
}

/// Runs the serve command.
pub fn run(path: &Path, options: ServeOptions) -> Result<(), Box<dyn std::error::Error>> {
    if options.token.is_none() {
        tracing::warn!("no access token configured, every protected route will answer 401");
    }

    let store = Arc::new(DocumentStore::open(path, options.store_config())?);
    let server = Arc::new(CatalogServer::new(options.server_config(), store));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve(shutdown_signal()))?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown requested"),
        Err(err) => tracing::error!(error = %err, "failed to listen for ctrl-c"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_map_to_configs() {
        let options = ServeOptions {
            bind: "127.0.0.1:8080".parse().unwrap(),
            token: Some("tok".into()),
            credentials: Some(("student".into(), "pw".into())),
            legacy_ids: true,
            sync_on_write: false,
        };

        let store = options.store_config();
        assert_eq!(store.id_policy, IdPolicy::CountPlusOne);
        assert!(!store.sync_on_write);

        let server = options.server_config();
        assert_eq!(server.bind_addr.port(), 8080);
        assert_eq!(server.access_token.as_deref(), Some("tok"));
        assert!(server.credentials.unwrap().verify("student", "pw"));
    }
}
