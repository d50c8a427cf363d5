//! Request correlation ids.
//!
//! Clients under test often tag their calls with an `x-request-id`. A usable
//! tag comes back untouched so the client can match responses to requests;
//! a missing, blank or non-text tag is replaced with a UUID v4.

use std::fmt;

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The id a request is correlated by in logs, Sentry and the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// The client's tag, trimmed, or a fresh UUID if there is none.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map_or_else(Self::generate, |tag| Self(tag.to_owned()))
    }

    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag the request span and Sentry scope, and return the id on the response.
///
/// Server errors are logged again here with the id and status, since the
/// panic handler has no access to the request.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers());

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", &request_id));

    let mut response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() {
        tracing::warn!(%request_id, status = status.as_u16(), "request failed");
    }

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(tag: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static(tag));
        headers
    }

    #[test]
    fn test_client_tag_is_kept() {
        let id = RequestId::from_headers(&headers_with("client-123"));
        assert_eq!(id.as_str(), "client-123");
    }

    #[test]
    fn test_client_tag_is_trimmed() {
        let id = RequestId::from_headers(&headers_with("  run-7  "));
        assert_eq!(id.to_string(), "run-7");
    }

    #[test]
    fn test_blank_or_missing_tag_is_generated() {
        let blank = RequestId::from_headers(&headers_with("   "));
        assert!(Uuid::parse_str(blank.as_str()).is_ok());

        let missing = RequestId::from_headers(&HeaderMap::new());
        assert!(Uuid::parse_str(missing.as_str()).is_ok());
        assert_ne!(blank, missing);
    }
}
