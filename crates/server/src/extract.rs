//! Request extractors that reject with [`AppError`].
//!
//! Axum's built-in `Json` and `Path` extractors reject with plain-text bodies
//! and their own status codes. The fixture answers every failure with the
//! JSON envelope, so bodies and id segments go through these instead.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// The raw request body.
#[derive(Debug, Clone)]
pub struct RawBody(pub Bytes);

impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(bytes))
    }
}

impl RawBody {
    /// Parse the body as optional JSON. See [`parse_json`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<Option<T>, AppError> {
        parse_json(&self.0)
    }

    /// Parse the body as an optional JSON object. See [`parse_object`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the body is not a JSON object that
    /// fits `T`.
    pub fn object<T: DeserializeOwned>(&self) -> Result<Option<T>, AppError> {
        parse_object(&self.0)
    }
}

/// An optional JSON body, parsed eagerly.
///
/// `None` when the body is empty or the literal `null`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub Option<T>);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let RawBody(bytes) = RawBody::from_request(req, state).await?;
        parse_json(&bytes).map(Self)
    }
}

/// An optional JSON object body, parsed eagerly.
///
/// Like [`JsonBody`], but arrays and scalars are rejected with 400 instead of
/// being mapped onto `T`'s fields by position.
#[derive(Debug, Clone)]
pub struct JsonObject<T>(pub Option<T>);

impl<S, T> FromRequest<S> for JsonObject<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let RawBody(bytes) = RawBody::from_request(req, state).await?;
        parse_object(&bytes).map(Self)
    }
}

/// Parse `bytes` as optional JSON.
///
/// The content type is not checked. Whitespace-only bodies and `null` both
/// yield `None`.
///
/// # Errors
///
/// Returns `AppError::BadRequest` carrying the parser's message.
pub fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(bytes).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Parse `bytes` as an optional JSON object.
///
/// Whitespace-only bodies and `null` yield `None`. Any other non-object value
/// is a 400.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for malformed JSON, a non-object body, or
/// fields of the wrong type.
pub fn parse_object<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>, AppError> {
    match parse_json::<Value>(bytes)? {
        None => Ok(None),
        Some(value @ Value::Object(_)) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| AppError::BadRequest(e.to_string())),
        Some(_) => Err(AppError::BadRequest(NOT_AN_OBJECT.to_string())),
    }
}

/// Message for record and counter bodies that are not JSON objects.
pub const NOT_AN_OBJECT: &str = "request body must be a JSON object";

/// An integer `{id}` path segment.
///
/// Anything other than plain ASCII digits that fit in an `i64` is treated as
/// an unmatched route, so `/api/users/abc` and `/api/users/-1` answer 404
/// before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct ItemId<I>(pub I);

impl<S, I> FromRequestParts<S> for ItemId<I>
where
    S: Send + Sync,
    I: From<i64> + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_owned();
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::RouteNotFound(path.clone()))?;

        parse_id(&raw)
            .map(|id| Self(I::from(id)))
            .ok_or(AppError::RouteNotFound(path))
    }
}

/// Parse an id segment the way an `int` route converter would.
fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mock_api_core::UserFields;
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("007"), Some(7));
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("+1"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("1.5"), None);
        assert_eq!(parse_id("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_json_empty_and_null_are_absent() {
        assert!(parse_json::<Value>(b"").unwrap().is_none());
        assert!(parse_json::<Value>(b"  \n").unwrap().is_none());
        assert!(parse_json::<UserFields>(b"null").unwrap().is_none());
    }

    #[test]
    fn test_parse_json_object() {
        let value = parse_json::<Value>(br#"{"a": 1}"#).unwrap();
        assert_eq!(value, Some(json!({"a": 1})));
    }

    #[test]
    fn test_parse_json_malformed_is_bad_request() {
        let err = parse_json::<Value>(b"{not json").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_parse_json_wrong_shape_is_bad_request() {
        let err = parse_json::<UserFields>(b"[1, 2]").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_parse_object_rejects_positional_arrays() {
        // Derived `Deserialize` would accept this as name/age/email.
        let err = parse_object::<UserFields>(br#"["Zed", 40, "z@x.com"]"#).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg == NOT_AN_OBJECT));

        let err = parse_object::<UserFields>(b"[null, null, null]").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = parse_object::<UserFields>(b"42").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_parse_object_accepts_objects_and_absent() {
        assert!(parse_object::<UserFields>(b"").unwrap().is_none());
        assert!(parse_object::<UserFields>(b"null").unwrap().is_none());

        let fields = parse_object::<UserFields>(br#"{"name": "Zed", "age": 40}"#)
            .unwrap()
            .unwrap();
        assert_eq!(fields.name.as_deref(), Some("Zed"));
        assert_eq!(fields.age, Some(40));
        assert!(fields.email.is_none());

        let err = parse_object::<UserFields>(br#"{"age": "forty"}"#).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
