//! Echo handler: reflects the request back to the client.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::{HeaderMap, Method, header::CONTENT_TYPE},
};
use serde::Serialize;
use serde_json::Value;

use super::timestamp;
use crate::extract::RawBody;

/// Echo response.
#[derive(Debug, Serialize)]
pub struct EchoResponse {
    pub success: bool,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub data: Value,
    pub timestamp: String,
}

/// Return the method, headers and body of the request.
///
/// JSON bodies (by content type) come back parsed; anything else, including
/// JSON that fails to parse, comes back as the raw text. A body that cannot
/// be read is rejected by [`RawBody`] with 400.
pub async fn echo(method: Method, headers: HeaderMap, RawBody(body): RawBody) -> Json<EchoResponse> {
    let data = if is_json(&headers) {
        serde_json::from_slice(&body).unwrap_or_else(|_| raw_text(&body))
    } else {
        raw_text(&body)
    };

    Json(EchoResponse {
        success: true,
        method: method.to_string(),
        headers: header_map(&headers),
        data,
        timestamp: timestamp(),
    })
}

fn raw_text(body: &[u8]) -> Value {
    Value::String(String::from_utf8_lossy(body).into_owned())
}

/// `application/json` or any `+json` media type.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|essence| essence.trim().to_ascii_lowercase())
        .is_some_and(|essence| essence == "application/json" || essence.ends_with("+json"))
}

/// Flatten headers to one string per name; repeated values are joined.
///
/// Names come back in canonical casing (`Content-Type`), not the lowercase
/// form `http` stores them in.
fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        map.entry(canonical_name(name.as_str()))
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    map
}

/// Uppercase every letter that follows a non-letter, lowercase the rest.
fn canonical_name(name: &str) -> String {
    let mut after_letter = false;
    name.chars()
        .map(|c| {
            let out = if after_letter {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            };
            after_letter = c.is_ascii_alphabetic();
            out
        })
        .collect()
}
