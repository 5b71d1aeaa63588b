//! axum binding for the request handlers.
//!
//! | Route               | Method | Auth | Handler                              |
//! |---------------------|--------|------|--------------------------------------|
//! | `/auth`             | POST   | no   | [`RequestHandler::login`]            |
//! | `/health`           | GET    | no   | [`RequestHandler::health`]           |
//! | `/products`         | GET    | yes  | [`RequestHandler::list_products`]    |
//! | `/categories`       | GET    | yes  | [`RequestHandler::list_categories`]  |
//! | `/categories`       | POST   | yes  | [`RequestHandler::add_category`]     |
//! | `/categories`       | DELETE | yes  | [`RequestHandler::remove_category`]  |
//! | `/categories/{id}`  | GET    | yes  | [`RequestHandler::get_category`]     |
//! | `/favorites`        | GET    | yes  | [`RequestHandler::list_favorites`]   |
//! | `/favorites`        | POST   | yes  | [`RequestHandler::add_favorite`]     |
//! | `/favorites`        | DELETE | yes  | [`RequestHandler::remove_favorite`]  |
//!
//! Store calls take a blocking lock and may fsync, so every handler runs
//! on the blocking pool.

use crate::error::{ServerError, ServerResult};
use crate::handler::{
    CategoryRequest, FavoriteRequest, LoginRequest, MessageResponse, RequestHandler,
};
use crate::server::CatalogServer;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

type AppState = Arc<CatalogServer>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(MessageResponse { message: self.message() })).into_response()
    }
}

/// Builds the router for a server.
pub(crate) fn router(server: AppState) -> Router {
    let protected = Router::new()
        .route("/products", get(list_products))
        .route(
            "/categories",
            get(list_categories)
                .post(add_category)
                .delete(remove_category),
        )
        .route("/categories/{id}", get(get_category))
        .route(
            "/favorites",
            get(list_favorites).post(add_favorite).delete(remove_favorite),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&server),
            require_token,
        ));

    let body_limit = server.config().max_body_bytes;

    Router::new()
        .route("/auth", post(login))
        .route("/health", get(health))
        .merge(protected)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

async fn require_token(State(server): State<AppState>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match server.handler().authorize(header) {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

/// Runs a handler call on the blocking pool.
async fn blocking<T, F>(server: AppState, f: F) -> ServerResult<T>
where
    F: FnOnce(&RequestHandler) -> ServerResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(server.handler()))
        .await
        .map_err(|e| ServerError::Internal(format!("handler task failed: {e}")))?
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ServerResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ServerError::InvalidRequest(rejection.body_text()))
}

async fn login(
    State(server): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let request = json_body(payload)?;
    let response = blocking(server, move |h| h.login(request)).await?;
    Ok(Json(response))
}

async fn health(State(server): State<AppState>) -> ServerResult<impl IntoResponse> {
    Ok(Json(blocking(server, |h| Ok(h.health())).await?))
}

async fn list_products(State(server): State<AppState>) -> ServerResult<impl IntoResponse> {
    Ok(Json(blocking(server, |h| h.list_products()).await?))
}

async fn list_categories(State(server): State<AppState>) -> ServerResult<impl IntoResponse> {
    Ok(Json(blocking(server, |h| h.list_categories()).await?))
}

async fn get_category(
    State(server): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    // Non-integer ids never match a route target.
    let id: i64 = id
        .parse()
        .map_err(|_| ServerError::NotFound(format!("category not found: {id}")))?;
    Ok(Json(blocking(server, move |h| h.get_category(id)).await?))
}

async fn add_category(
    State(server): State<AppState>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let request = json_body(payload)?;
    let response = blocking(server, move |h| h.add_category(request)).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn remove_category(
    State(server): State<AppState>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let request = json_body(payload)?;
    Ok(Json(blocking(server, move |h| h.remove_category(request)).await?))
}

async fn list_favorites(State(server): State<AppState>) -> ServerResult<impl IntoResponse> {
    Ok(Json(blocking(server, |h| h.list_favorites()).await?))
}

async fn add_favorite(
    State(server): State<AppState>,
    payload: Result<Json<FavoriteRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let request = json_body(payload)?;
    let response = blocking(server, move |h| h.add_favorite(request)).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn remove_favorite(
    State(server): State<AppState>,
    payload: Result<Json<FavoriteRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let request = json_body(payload)?;
    Ok(Json(blocking(server, move |h| h.remove_favorite(request)).await?))
}

async fn not_found() -> ServerError {
    ServerError::NotFound("Not found".into())
}
