//! Product route handlers.
//!
//! Same contract as the user routes, over `Product` records.

use axum::{Json, extract::State, http::StatusCode};
use mock_api_core::{Product, ProductFields, ProductId};

use super::{ListResponse, MessageResponse, RecordResponse};
use crate::error::{AppError, Result};
use crate::extract::{ItemId, JsonObject, RawBody};
use crate::state::AppState;

const CREATED: &str = "产品创建成功";
const UPDATED: &str = "产品更新成功";
const DELETED: &str = "产品删除成功";

/// List all products in insertion order.
pub async fn index(State(state): State<AppState>) -> Json<ListResponse<Product>> {
    let store = state.read().await;
    Json(ListResponse::new(store.products.all().to_vec()))
}

/// Create a product; absent fields take their defaults.
pub async fn create(
    State(state): State<AppState>,
    JsonObject(fields): JsonObject<ProductFields>,
) -> (StatusCode, Json<RecordResponse<Product>>) {
    let product = state
        .write()
        .await
        .products
        .insert(fields.unwrap_or_default());
    tracing::info!(product_id = %product.id, "product created");

    (
        StatusCode::CREATED,
        Json(RecordResponse::with_message(CREATED, product)),
    )
}

/// Show a single product.
///
/// # Errors
///
/// Returns `ProductNotFound` if no product has this id.
pub async fn show(
    State(state): State<AppState>,
    ItemId(id): ItemId<ProductId>,
) -> Result<Json<RecordResponse<Product>>> {
    let store = state.read().await;
    let product = store
        .products
        .find(id)
        .ok_or(AppError::ProductNotFound(id))?;
    Ok(Json(RecordResponse::new(product.clone())))
}

/// Merge the body's fields into an existing product.
///
/// # Errors
///
/// Returns `ProductNotFound` for an unknown id (checked first),
/// `BadRequest` for a malformed body.
pub async fn update(
    State(state): State<AppState>,
    ItemId(id): ItemId<ProductId>,
    body: RawBody,
) -> Result<Json<RecordResponse<Product>>> {
    let mut store = state.write().await;
    if store.products.find(id).is_none() {
        return Err(AppError::ProductNotFound(id));
    }

    let fields = body.object::<ProductFields>()?.unwrap_or_default();
    let product = store
        .products
        .update(id, fields)
        .ok_or(AppError::ProductNotFound(id))?;
    tracing::info!(product_id = %id, "product updated");

    Ok(Json(RecordResponse::with_message(UPDATED, product)))
}

/// Delete the first product with this id.
///
/// # Errors
///
/// Returns `ProductNotFound` if no product has this id.
pub async fn destroy(
    State(state): State<AppState>,
    ItemId(id): ItemId<ProductId>,
) -> Result<Json<MessageResponse>> {
    state
        .write()
        .await
        .products
        .remove(id)
        .ok_or(AppError::ProductNotFound(id))?;
    tracing::info!(product_id = %id, "product deleted");

    Ok(Json(MessageResponse::new(DELETED)))
}
