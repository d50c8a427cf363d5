//! HTTP route handlers for the mock server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - API index (endpoint docs)
//! GET  /health                 - Health check
//!
//! # Users
//! GET  /api/users              - List users
//! POST /api/users              - Create user (201)
//! GET  /api/users/{id}         - User detail
//! PUT  /api/users/{id}         - Merge fields into user
//! DELETE /api/users/{id}       - Delete user
//!
//! # Products
//! GET  /api/products           - List products
//! POST /api/products           - Create product (201)
//! GET  /api/products/{id}      - Product detail
//! PUT  /api/products/{id}      - Merge fields into product
//! DELETE /api/products/{id}    - Delete product
//!
//! # Utilities
//! POST,PUT /api/echo           - Echo method, headers and body
//! GET,POST,PUT,DELETE /api/test - Per-method canned responses
//! GET  /api/data               - Dump the whole store
//! GET  /api/counter            - Read counter
//! POST /api/counter            - Add `increment` (default 1)
//! ```
//!
//! Unknown paths answer 404 and known paths with the wrong method answer 405,
//! both with the JSON failure envelope.

pub mod counter;
pub mod data;
pub mod echo;
pub mod fallback;
pub mod index;
pub mod products;
pub mod test_api;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Local wall-clock time in ISO 8601 with microseconds, no offset.
#[must_use]
pub fn timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// `{success, data, count, timestamp}` for collection listings.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
    pub timestamp: String,
}

impl<T> ListResponse<T> {
    #[must_use]
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
            timestamp: timestamp(),
        }
    }
}

/// `{success, message?, data}` for single-record responses.
#[derive(Debug, Serialize)]
pub struct RecordResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T> RecordResponse<T> {
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    #[must_use]
    pub const fn with_message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
        }
    }
}

/// `{success, message}` for responses without a payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(users::index).post(users::create))
        .route(
            "/api/users/{id}",
            get(users::show).put(users::update).delete(users::destroy),
        )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::index).post(products::create))
        .route(
            "/api/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
}

/// Create the echo/test/data/counter utility routes router.
pub fn utility_routes() -> Router<AppState> {
    Router::new()
        .route("/api/echo", post(echo::echo).put(echo::echo))
        .route(
            "/api/test",
            get(test_api::get)
                .post(test_api::post)
                .put(test_api::put)
                .delete(test_api::delete),
        )
        .route("/api/data", get(data::dump))
        .route("/api/counter", get(counter::show).post(counter::increment))
}

/// Create all routes for the mock server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index::index))
        .route("/health", get(health))
        .merge(user_routes())
        .merge(product_routes())
        .merge(utility_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    //! Helpers for driving the router in-process.

    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode, header::CONTENT_TYPE},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::state::AppState;

    /// Send one request to a fresh clone of `app`, returning status and JSON.
    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// The full app over seed data.
    pub fn seeded_app() -> Router {
        crate::app(AppState::seeded())
    }
}
