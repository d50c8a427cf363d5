//! Panic handler for `tower_http::catch_panic::CatchPanicLayer`.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Render a handler panic as the JSON 500 envelope.
///
/// The panic payload is surfaced as the envelope's `message`. The fixture
/// only runs locally, so nothing is redacted.
#[allow(clippy::needless_pass_by_value)] // signature required by CatchPanicLayer::custom
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let details = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    AppError::Internal(details).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use super::*;
    use crate::error::INTERNAL_ERROR;

    #[tokio::test]
    async fn test_panic_payload_becomes_message() {
        let response = handle_panic(Box::new("store exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], INTERNAL_ERROR);
        assert_eq!(body["message"], "store exploded");
    }
}
