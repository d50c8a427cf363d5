//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Errors render as the JSON
//! failure envelope:
//!
//! ```text
//! {"success": false, "error": "<message>", ...extra fields}
//! ```

use axum::{
    Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use mock_api_core::{ProductId, StoreError, UserId};
use serde::Serialize;
use thiserror::Error;

/// Client-facing message for a missing user.
pub const USER_NOT_FOUND: &str = "用户不存在";
/// Client-facing message for a missing product.
pub const PRODUCT_NOT_FOUND: &str = "产品不存在";
/// Client-facing message for an unknown route.
pub const ROUTE_NOT_FOUND: &str = "接口不存在";
/// Client-facing message for a known route hit with the wrong method.
pub const METHOD_NOT_ALLOWED: &str = "请求方法不允许";
/// Client-facing message for server faults.
pub const INTERNAL_ERROR: &str = "服务器内部错误";

/// Application-level error type for the mock server.
#[derive(Debug, Error)]
pub enum AppError {
    /// No user with this id.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// No product with this id.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// No route matches the path (includes non-integer id segments).
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    /// The route exists but does not accept this method.
    #[error("Method {method} not allowed on {path}")]
    MethodNotAllowed { method: Method, path: String },

    /// Body could not be read or parsed.
    #[error("{0}")]
    BadRequest(String),

    /// Store rejected the mutation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// The failure envelope.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            path: None,
            method: None,
            message: None,
        }
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound(_) | Self::ProductNotFound(_) | Self::RouteNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) | Self::Store(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::UserNotFound(_) => ErrorBody::new(USER_NOT_FOUND),
            Self::ProductNotFound(_) => ErrorBody::new(PRODUCT_NOT_FOUND),
            Self::RouteNotFound(path) => ErrorBody {
                path: Some(path.clone()),
                ..ErrorBody::new(ROUTE_NOT_FOUND)
            },
            Self::MethodNotAllowed { method, path } => ErrorBody {
                path: Some(path.clone()),
                method: Some(method.to_string()),
                ..ErrorBody::new(METHOD_NOT_ALLOWED)
            },
            Self::BadRequest(msg) => ErrorBody::new(msg.clone()),
            Self::Store(err) => ErrorBody::new(err.to_string()),
            Self::Internal(msg) => ErrorBody {
                message: Some(msg.clone()),
                ..ErrorBody::new(INTERNAL_ERROR)
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Client error");
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
