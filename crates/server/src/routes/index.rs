//! API index: a machine-readable list of the endpoints.

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

/// Endpoint paths with a short description and the methods they accept.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("/api/users", "用户列表 (GET, POST)"),
    ("/api/users/<id>", "用户详情 (GET, PUT, DELETE)"),
    ("/api/products", "产品列表 (GET, POST)"),
    ("/api/products/<id>", "产品详情 (GET, PUT, DELETE)"),
    ("/api/echo", "回显请求数据 (POST, PUT)"),
    ("/api/test", "测试接口 (GET, POST, PUT, DELETE)"),
    ("/api/data", "获取测试数据 (GET)"),
    ("/api/counter", "计数器 (GET, POST)"),
];

/// `GET /` response.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub success: bool,
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Describe the API.
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        success: true,
        message: "测试API服务器",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS.iter().copied().collect(),
    })
}
