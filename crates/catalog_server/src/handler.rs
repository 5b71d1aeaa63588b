//! Request handlers for catalog resources.
//!
//! Handlers are transport-agnostic: they take typed requests, call the
//! store's accessors, and return typed responses or a [`ServerError`]
//! carrying the HTTP status. The axum binding in [`crate::http`] only
//! extracts inputs and serializes outputs.

use crate::auth::{token_from_header, TokenAuthorizer};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use catalog_core::{Category, DocumentStore, Favorite, Product};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Body of `POST /categories` and `DELETE /categories`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRequest {
    /// Category name.
    pub name: Option<String>,
}

impl CategoryRequest {
    /// Creates a request for the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    fn validated_name(&self) -> ServerResult<&str> {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ServerError::InvalidRequest(
                "Name of the category is required".into(),
            )),
        }
    }
}

/// Body of `POST /favorites` and `DELETE /favorites`.
///
/// Ids may be sent as JSON integers or integer strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FavoriteRequest {
    /// User id.
    pub user_id: Option<Value>,
    /// Product id.
    pub product_id: Option<Value>,
}

impl FavoriteRequest {
    /// Creates a request for the given pair.
    pub fn new(user_id: i64, product_id: i64) -> Self {
        Self {
            user_id: Some(user_id.into()),
            product_id: Some(product_id.into()),
        }
    }

    fn validated_ids(&self) -> ServerResult<(i64, i64)> {
        let user_id = parse_id(self.user_id.as_ref());
        let product_id = parse_id(self.product_id.as_ref());

        match (user_id, product_id) {
            // Zero counts as missing.
            (Some(user_id), Some(product_id)) if user_id != 0 && product_id != 0 => {
                Ok((user_id, product_id))
            }
            _ => Err(ServerError::InvalidRequest(
                "User ID and Product ID are required".into(),
            )),
        }
    }
}

fn parse_id(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Body of `POST /auth`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
}

/// Plain message response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Response to a category mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResponse {
    /// Human-readable message.
    pub message: String,
    /// The created or removed record.
    pub category: Category,
}

/// Response to `POST /favorites`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteResponse {
    /// Human-readable message.
    pub message: String,
    /// The stored record.
    pub favorite: Favorite,
}

/// Response to `DELETE /favorites`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRemoval {
    /// Human-readable message.
    pub message: String,
    /// Number of records removed.
    pub removed: usize,
}

/// Response to a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The static access token.
    pub token: String,
}

/// Response to `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server runs.
    pub status: String,
    /// False if the last persist failed and memory is ahead of disk.
    pub persisted: bool,
}

/// Context for request handling.
pub struct HandlerContext {
    /// Server configuration.
    pub config: ServerConfig,
    /// The document store (shared across all handlers).
    pub store: Arc<DocumentStore>,
    authorizer: Arc<dyn TokenAuthorizer>,
}

impl HandlerContext {
    /// Creates a new handler context.
    pub fn new(
        config: ServerConfig,
        store: Arc<DocumentStore>,
        authorizer: Arc<dyn TokenAuthorizer>,
    ) -> Self {
        Self {
            config,
            store,
            authorizer,
        }
    }
}

/// Handler for catalog requests.
pub struct RequestHandler {
    context: Arc<HandlerContext>,
}

impl RequestHandler {
    /// Creates a new request handler.
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self { context }
    }

    /// Returns the handler context.
    pub fn context(&self) -> &HandlerContext {
        &self.context
    }

    fn store(&self) -> &DocumentStore {
        &self.context.store
    }

    /// Checks the `Authorization` header value of a request.
    pub fn authorize(&self, header: Option<&str>) -> ServerResult<()> {
        let Some(token) = header.and_then(token_from_header) else {
            return Err(ServerError::NotAuthorized(
                "Unauthorized, invalid or missing token".into(),
            ));
        };

        if self.context.authorizer.is_authorized(token) {
            Ok(())
        } else {
            tracing::warn!("rejected request with invalid token");
            Err(ServerError::NotAuthorized(
                "Unauthorized, invalid or missing token".into(),
            ))
        }
    }

    /// Handles a login request.
    pub fn login(&self, request: LoginRequest) -> ServerResult<TokenResponse> {
        let (Some(username), Some(password)) = (
            request.username.as_deref().filter(|s| !s.is_empty()),
            request.password.as_deref().filter(|s| !s.is_empty()),
        ) else {
            return Err(ServerError::InvalidRequest(
                "Missing username or password".into(),
            ));
        };

        let config = &self.context.config;
        let accepted = config
            .credentials
            .as_ref()
            .is_some_and(|creds| creds.verify(username, password));
        if !accepted {
            tracing::warn!(username, "rejected login");
            return Err(ServerError::NotAuthorized("Unauthorized".into()));
        }

        let token = config
            .access_token
            .clone()
            .ok_or_else(|| ServerError::Internal("no access token configured".into()))?;
        Ok(TokenResponse { token })
    }

    /// Lists all products.
    pub fn list_products(&self) -> ServerResult<Vec<Product>> {
        Ok(self.store().products().list())
    }

    /// Lists all categories.
    pub fn list_categories(&self) -> ServerResult<Vec<Category>> {
        Ok(self.store().categories().list())
    }

    /// Returns one category by id.
    pub fn get_category(&self, id: i64) -> ServerResult<Category> {
        Ok(self.store().categories().get(id)?)
    }

    /// Adds a category.
    pub fn add_category(&self, request: CategoryRequest) -> ServerResult<CategoryResponse> {
        let name = request.validated_name()?;
        let category = self.store().categories().add(name)?;
        tracing::info!(id = category.id, name, "category added");

        Ok(CategoryResponse {
            message: "Category added successfully".into(),
            category,
        })
    }

    /// Removes a category by name.
    pub fn remove_category(&self, request: CategoryRequest) -> ServerResult<CategoryResponse> {
        let name = request.validated_name()?;
        let category = self.store().categories().remove(name)?;
        tracing::info!(id = category.id, name, "category removed");

        Ok(CategoryResponse {
            message: "Category removed successfully".into(),
            category,
        })
    }

    /// Lists all favorites.
    pub fn list_favorites(&self) -> ServerResult<Vec<Favorite>> {
        Ok(self.store().favorites().list())
    }

    /// Adds a favorite.
    pub fn add_favorite(&self, request: FavoriteRequest) -> ServerResult<FavoriteResponse> {
        let (user_id, product_id) = request.validated_ids()?;
        let favorite = self.store().favorites().add(user_id, product_id)?;

        Ok(FavoriteResponse {
            message: "Product added to favorites".into(),
            favorite,
        })
    }

    /// Removes every favorite matching the pair.
    pub fn remove_favorite(&self, request: FavoriteRequest) -> ServerResult<FavoriteRemoval> {
        let (user_id, product_id) = request.validated_ids()?;
        let removed = self.store().favorites().remove(user_id, product_id)?;

        Ok(FavoriteRemoval {
            message: "Product removed from favorites".into(),
            removed,
        })
    }

    /// Reports liveness and whether memory and disk agree.
    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "ok".into(),
            persisted: !self.store().is_dirty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenValidator;
    use catalog_core::StoreConfig;
    use catalog_storage::InMemoryBackend;
    use serde_json::json;

    fn create_handler_with(backend: InMemoryBackend) -> RequestHandler {
        let config = ServerConfig::default()
            .with_access_token("tok")
            .with_credentials("student", "desingp");
        let store = Arc::new(DocumentStore::load(backend, StoreConfig::default()).unwrap());
        let authorizer = Arc::new(StaticTokenValidator::new(config.access_token.clone()));
        let context = Arc::new(HandlerContext::new(config, store, authorizer));
        RequestHandler::new(context)
    }

    fn create_handler() -> RequestHandler {
        create_handler_with(InMemoryBackend::new())
    }

    #[test]
    fn authorize_accepts_raw_and_bearer() {
        let handler = create_handler();
        assert!(handler.authorize(Some("tok")).is_ok());
        assert!(handler.authorize(Some("Bearer tok")).is_ok());
        assert_eq!(handler.authorize(Some("nope")).unwrap_err().status_code(), 401);
        assert_eq!(handler.authorize(None).unwrap_err().status_code(), 401);
    }

    #[test]
    fn login_flow() {
        let handler = create_handler();

        let ok = handler
            .login(LoginRequest {
                username: Some("student".into()),
                password: Some("desingp".into()),
            })
            .unwrap();
        assert_eq!(ok.token, "tok");

        let bad = handler
            .login(LoginRequest {
                username: Some("student".into()),
                password: Some("wrong".into()),
            })
            .unwrap_err();
        assert_eq!(bad.status_code(), 401);

        let missing = handler.login(LoginRequest::default()).unwrap_err();
        assert_eq!(missing.status_code(), 400);
    }

    #[test]
    fn category_lifecycle() {
        let handler = create_handler();

        let created = handler.add_category(CategoryRequest::new("Books")).unwrap();
        assert_eq!(created.category.id, 1);
        assert_eq!(handler.get_category(1).unwrap().name, "Books");

        let dup = handler.add_category(CategoryRequest::new("Books")).unwrap_err();
        assert_eq!(dup.status_code(), 400);

        handler.remove_category(CategoryRequest::new("Books")).unwrap();
        let gone = handler.remove_category(CategoryRequest::new("Books")).unwrap_err();
        assert_eq!(gone.status_code(), 404);
        assert_eq!(handler.get_category(1).unwrap_err().status_code(), 404);
    }

    #[test]
    fn category_name_is_required() {
        let handler = create_handler();
        let err = handler.add_category(CategoryRequest::default()).unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = handler.add_category(CategoryRequest::new("")).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(handler.list_categories().unwrap().is_empty());
    }

    #[test]
    fn favorite_ids_validation() {
        let handler = create_handler();

        let from_strings = FavoriteRequest {
            user_id: Some(json!("7")),
            product_id: Some(json!(3)),
        };
        assert_eq!(
            handler.add_favorite(from_strings).unwrap().favorite,
            Favorite::new(7, 3)
        );

        for bad in [
            FavoriteRequest::default(),
            FavoriteRequest::new(0, 3),
            FavoriteRequest {
                user_id: Some(json!("seven")),
                product_id: Some(json!(3)),
            },
            FavoriteRequest {
                user_id: Some(json!(1.5)),
                product_id: Some(json!(3)),
            },
        ] {
            assert_eq!(handler.add_favorite(bad).unwrap_err().status_code(), 400);
        }
        assert_eq!(handler.list_favorites().unwrap().len(), 1);
    }

    #[test]
    fn favorite_removal_is_idempotent() {
        let handler = create_handler();
        handler.add_favorite(FavoriteRequest::new(7, 3)).unwrap();
        handler.add_favorite(FavoriteRequest::new(7, 3)).unwrap();

        let removed = handler.remove_favorite(FavoriteRequest::new(7, 3)).unwrap();
        assert_eq!(removed.removed, 2);

        let again = handler.remove_favorite(FavoriteRequest::new(7, 3)).unwrap();
        assert_eq!(again.removed, 0);
    }

    #[test]
    fn persist_failure_is_a_server_error() {
        let backend = InMemoryBackend::new();
        let handler = create_handler_with(backend.clone());

        backend.fail_writes(true);
        let err = handler.add_category(CategoryRequest::new("Toys")).unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(!handler.health().persisted);

        // The mutation is still visible in memory.
        assert_eq!(handler.list_categories().unwrap().len(), 1);
    }

    #[test]
    fn exhausted_category_ids_are_a_server_error() {
        let raw = br#"{"categories": [{"id": 9223372036854775807, "name": "big"}]}"#;
        let handler = create_handler_with(InMemoryBackend::with_data(raw.to_vec()));

        let err = handler.add_category(CategoryRequest::new("next")).unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(handler.list_categories().unwrap().len(), 1);
        assert!(handler.health().persisted);
    }
}
