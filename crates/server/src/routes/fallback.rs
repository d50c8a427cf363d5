//! Fallback handlers for unmatched routes and methods.

use axum::http::{Method, Uri};

use crate::error::AppError;

/// No route matches the path.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

/// The path matches a route that does not accept this method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed {
        method,
        path: uri.path().to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::error::{METHOD_NOT_ALLOWED, ROUTE_NOT_FOUND};
    use crate::routes::test_support::{seeded_app, send};

    #[tokio::test]
    async fn test_unknown_path() {
        let app = seeded_app();
        let (status, body) = send(&app, Method::GET, "/api/nothing", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"success": false, "error": ROUTE_NOT_FOUND, "path": "/api/nothing"})
        );
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let app = seeded_app();
        let (status, body) = send(&app, Method::DELETE, "/api/counter", None).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": METHOD_NOT_ALLOWED,
                "method": "DELETE",
                "path": "/api/counter"
            })
        );
    }
}
