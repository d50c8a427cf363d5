//! Store dump handler.

use axum::{Json, extract::State};
use mock_api_core::Store;
use serde::Serialize;

use super::timestamp;
use crate::state::AppState;

/// `GET /api/data` response.
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub success: bool,
    pub data: Store,
    pub timestamp: String,
}

/// Return the entire store verbatim.
pub async fn dump(State(state): State<AppState>) -> Json<DataResponse> {
    let data = state.read().await.clone();
    Json(DataResponse {
        success: true,
        data,
        timestamp: timestamp(),
    })
}
