//! Error types for the catalog server.

use catalog_core::CoreError;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the catalog server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Missing or malformed request fields.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or rejected credentials.
    #[error("not authorized: {0}")]
    NotAuthorized(String),

    /// Lookup or removal target is absent.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness rule would be violated.
    #[error("{0}")]
    Conflict(String),

    /// The mutation was applied in memory but could not be persisted.
    #[error("{0}")]
    Persist(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::InvalidRequest(_) | ServerError::Conflict(_) => 400,
            ServerError::NotAuthorized(_) => 401,
            ServerError::NotFound(_) => 404,
            ServerError::Persist(_) | ServerError::Internal(_) | ServerError::Io(_) => 500,
        }
    }

    /// Returns the message sent to clients, without the category prefix.
    pub fn message(&self) -> String {
        match self {
            ServerError::InvalidRequest(msg)
            | ServerError::NotAuthorized(msg)
            | ServerError::NotFound(msg)
            | ServerError::Conflict(msg)
            | ServerError::Persist(msg)
            | ServerError::Internal(msg) => msg.clone(),
            ServerError::Io(err) => err.to_string(),
        }
    }

    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<CoreError> for ServerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } => ServerError::NotFound(err.to_string()),
            CoreError::Conflict { .. } => ServerError::Conflict(err.to_string()),
            CoreError::PersistFailure { .. } => ServerError::Persist(err.to_string()),
            CoreError::UnknownCollection { .. } => ServerError::NotFound(err.to_string()),
            CoreError::IdExhausted { .. } => ServerError::Internal(err.to_string()),
            other => ServerError::Internal(other.to_string()),
        }
    }
}
