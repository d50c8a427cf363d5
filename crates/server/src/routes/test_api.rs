//! Generic `/api/test` endpoint with one canned response shape per method.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, rejection::QueryRejection},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{Value, json};

use super::timestamp;
use crate::error::{AppError, Result};
use crate::extract::JsonBody;

/// `GET /api/test` response.
#[derive(Debug, Serialize)]
pub struct QueryEcho {
    pub success: bool,
    pub method: &'static str,
    pub message: &'static str,
    pub query_params: BTreeMap<String, String>,
    pub timestamp: String,
}

/// `POST`/`PUT /api/test` response.
#[derive(Debug, Serialize)]
pub struct BodyEcho {
    pub success: bool,
    pub method: &'static str,
    pub message: &'static str,
    pub received_data: Value,
    pub timestamp: String,
}

/// `DELETE /api/test` response.
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub success: bool,
    pub method: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

/// Echo the query string. When a key repeats, the first value wins.
///
/// # Errors
///
/// Returns `BadRequest` if the query string cannot be decoded.
pub async fn get(
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<QueryEcho>> {
    let Query(pairs) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let mut query_params = BTreeMap::new();
    for (key, value) in pairs {
        query_params.entry(key).or_insert(value);
    }

    Ok(Json(QueryEcho {
        success: true,
        method: "GET",
        message: "GET请求成功",
        query_params,
        timestamp: timestamp(),
    }))
}

/// Echo the JSON body with 201.
pub async fn post(JsonBody(data): JsonBody<Value>) -> (StatusCode, Json<BodyEcho>) {
    (
        StatusCode::CREATED,
        Json(body_echo("POST", "POST请求成功", data)),
    )
}

/// Echo the JSON body with 200.
pub async fn put(JsonBody(data): JsonBody<Value>) -> Json<BodyEcho> {
    Json(body_echo("PUT", "PUT请求成功", data))
}

/// Acknowledge a delete.
pub async fn delete() -> Json<DeleteAck> {
    Json(DeleteAck {
        success: true,
        method: "DELETE",
        message: "DELETE请求成功",
        timestamp: timestamp(),
    })
}

fn body_echo(method: &'static str, message: &'static str, data: Option<Value>) -> BodyEcho {
    BodyEcho {
        success: true,
        method,
        message,
        received_data: data.unwrap_or_else(|| json!({})),
        timestamp: timestamp(),
    }
}
