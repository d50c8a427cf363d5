//! Counter handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Deserializer, Serialize};

use super::timestamp;
use crate::error::Result;
use crate::extract::JsonObject;
use crate::state::AppState;

/// Body accepted by `POST /api/counter`.
///
/// A missing `increment` defaults to 1; an explicit `null` is a 400.
#[derive(Debug, Default, Deserialize)]
pub struct IncrementRequest {
    #[serde(default, deserialize_with = "present_integer")]
    pub increment: Option<i64>,
}

fn present_integer<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(Some)
}

/// `GET /api/counter` response.
#[derive(Debug, Serialize)]
pub struct CounterResponse {
    pub success: bool,
    pub counter: i64,
    pub timestamp: String,
}

/// `POST /api/counter` response.
#[derive(Debug, Serialize)]
pub struct IncrementResponse {
    pub success: bool,
    pub counter: i64,
    pub increment: i64,
    pub timestamp: String,
}

/// Read the counter.
pub async fn show(State(state): State<AppState>) -> Json<CounterResponse> {
    let counter = state.read().await.counter;
    Json(CounterResponse {
        success: true,
        counter,
        timestamp: timestamp(),
    })
}

/// Add `increment` (default 1) to the counter.
///
/// # Errors
///
/// Returns `Store(CounterOverflow)` if the new value does not fit in an `i64`.
pub async fn increment(
    State(state): State<AppState>,
    JsonObject(body): JsonObject<IncrementRequest>,
) -> Result<Json<IncrementResponse>> {
    let increment = body.and_then(|b| b.increment).unwrap_or(1);
    let counter = state.write().await.increment_counter(increment)?;
    tracing::info!(counter, increment, "counter incremented");

    Ok(Json(IncrementResponse {
        success: true,
        counter,
        increment,
        timestamp: timestamp(),
    }))
}
