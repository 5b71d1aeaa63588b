//! Server configuration.

use crate::auth::Credentials;
use std::net::SocketAddr;

/// Configuration for the catalog server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Static token protected routes require. `None` rejects every request.
    pub access_token: Option<String>,
    /// Login credentials exchanged for the token at `POST /auth`.
    pub credentials: Option<Credentials>,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Creates a new server configuration.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            access_token: None,
            credentials: None,
            max_body_bytes: 64 * 1024,
        }
    }

    /// Sets the static access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the login credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Sets the maximum request body size.
    #[must_use]
    pub fn with_max_body_bytes(mut self, max: usize) -> Self {
        self.max_body_bytes = max;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 5000)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 5000);
        assert!(config.access_token.is_none());
        assert!(config.credentials.is_none());
    }

    #[test]
    fn config_builder() {
        let config = ServerConfig::new("0.0.0.0:9000".parse().unwrap())
            .with_access_token("s3cret")
            .with_credentials("student", "pass")
            .with_max_body_bytes(1024);

        assert_eq!(config.access_token.as_deref(), Some("s3cret"));
        assert!(config.credentials.unwrap().verify("student", "pass"));
        assert_eq!(config.max_body_bytes, 1024);
    }
}
