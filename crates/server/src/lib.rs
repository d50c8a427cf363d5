//! Mock API server library.
//!
//! A JSON fixture server for exercising HTTP clients: CRUD over in-memory
//! users and products, plus echo, test and counter utilities. Exposed as a
//! library so the router can be driven in-process by tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod startup;
pub mod state;

use axum::{Router, middleware::from_fn};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Build the complete application router over `state`.
///
/// Sentry layers are not included; the binary wraps them around this router.
pub fn app(state: AppState) -> Router {
    with_layers(routes::routes()).with_state(state)
}

/// Fallbacks and middleware shared by every route, innermost first.
fn with_layers(router: Router<AppState>) -> Router<AppState> {
    router
        .method_not_allowed_fallback(routes::fallback::method_not_allowed)
        .fallback(routes::fallback::not_found)
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        // Any origin, method and header on every route
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
        routing::get,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::error::INTERNAL_ERROR;
    use crate::middleware::REQUEST_ID_HEADER;

    async fn explode() -> &'static str {
        panic!("store exploded")
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(AppState::seeded())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::get("/api/users")
            .header(header::ORIGIN, "http://example.test")
            .body(Body::empty())
            .unwrap();
        let response = app(AppState::seeded()).oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/users/1")
            .header(header::ORIGIN, "http://example.test")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .body(Body::empty())
            .unwrap();
        let response = app(AppState::seeded()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS)
        );
    }

    #[tokio::test]
    async fn test_request_id_is_echoed_or_generated() {
        let request = Request::get("/api/counter")
            .header(REQUEST_ID_HEADER, "client-123")
            .body(Body::empty())
            .unwrap();
        let response = app(AppState::seeded()).oneshot(request).await.unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "client-123");

        let response = app(AppState::seeded())
            .oneshot(Request::get("/api/counter").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let generated = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert_eq!(generated.len(), 36);
    }

    #[tokio::test]
    async fn test_blank_request_id_is_replaced() {
        let request = Request::get("/api/counter")
            .header(REQUEST_ID_HEADER, "   ")
            .body(Body::empty())
            .unwrap();
        let response = app(AppState::seeded()).oneshot(request).await.unwrap();

        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_not_found_carries_request_id() {
        let response = app(AppState::seeded())
            .oneshot(Request::get("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_500_envelope() {
        let app = with_layers(Router::new().route("/explode", get(explode)))
            .with_state(AppState::seeded());
        let response = app
            .oneshot(Request::get("/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], INTERNAL_ERROR);
        assert_eq!(body["message"], "store exploded");
    }
}
