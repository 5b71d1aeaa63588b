//! Authentication support for the catalog server.
//!
//! Protected routes require a pre-shared static token in the
//! `Authorization` header, sent either raw or as `Bearer <token>`. The
//! check itself is a predicate ([`TokenAuthorizer`]) injected into the
//! handler context; [`StaticTokenValidator`] is the default.
//!
//! There are no sessions, no expiry and no revocation: a token is valid
//! exactly when it equals the configured one.

use std::fmt;

/// Decides whether a presented token grants access.
pub trait TokenAuthorizer: Send + Sync {
    /// Returns true if `token` is accepted.
    fn is_authorized(&self, token: &str) -> bool;
}

impl<F> TokenAuthorizer for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_authorized(&self, token: &str) -> bool {
        self(token)
    }
}

/// Validator comparing against one configured token.
///
/// With no token configured, nothing is authorized.
#[derive(Clone, Default)]
pub struct StaticTokenValidator {
    token: Option<String>,
}

impl StaticTokenValidator {
    /// Creates a validator for the given token.
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl TokenAuthorizer for StaticTokenValidator {
    fn is_authorized(&self, token: &str) -> bool {
        self.token.as_deref() == Some(token)
    }
}

impl fmt::Debug for StaticTokenValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenValidator")
            .field("configured", &self.token.is_some())
            .finish()
    }
}

/// Username/password pair accepted by the login route.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns true if both fields match exactly.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Extracts the token from an `Authorization` header value.
///
/// Accepts `Bearer <token>` and the bare token. Returns `None` for an
/// empty value.
pub fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim_start();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
