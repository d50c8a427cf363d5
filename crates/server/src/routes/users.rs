//! User route handlers.

use axum::{Json, extract::State, http::StatusCode};
use mock_api_core::{User, UserFields, UserId};

use super::{ListResponse, MessageResponse, RecordResponse};
use crate::error::{AppError, Result};
use crate::extract::{ItemId, JsonObject, RawBody};
use crate::state::AppState;

const CREATED: &str = "用户创建成功";
const UPDATED: &str = "用户更新成功";
const DELETED: &str = "用户删除成功";

/// List all users in insertion order.
pub async fn index(State(state): State<AppState>) -> Json<ListResponse<User>> {
    let store = state.read().await;
    Json(ListResponse::new(store.users.all().to_vec()))
}

/// Create a user; absent fields take their defaults.
///
/// A body that is not a JSON object of user fields is rejected by
/// [`JsonObject`] with 400 before anything is inserted.
pub async fn create(
    State(state): State<AppState>,
    JsonObject(fields): JsonObject<UserFields>,
) -> (StatusCode, Json<RecordResponse<User>>) {
    let user = state.write().await.users.insert(fields.unwrap_or_default());
    tracing::info!(user_id = %user.id, "user created");

    (
        StatusCode::CREATED,
        Json(RecordResponse::with_message(CREATED, user)),
    )
}

/// Show a single user.
///
/// # Errors
///
/// Returns `UserNotFound` if no user has this id.
pub async fn show(
    State(state): State<AppState>,
    ItemId(id): ItemId<UserId>,
) -> Result<Json<RecordResponse<User>>> {
    let store = state.read().await;
    let user = store.users.find(id).ok_or(AppError::UserNotFound(id))?;
    Ok(Json(RecordResponse::new(user.clone())))
}

/// Merge the body's fields into an existing user.
///
/// The id is checked before the body is parsed, so a missing user answers
/// 404 whatever the payload.
///
/// # Errors
///
/// Returns `UserNotFound` for an unknown id, `BadRequest` for a malformed body.
pub async fn update(
    State(state): State<AppState>,
    ItemId(id): ItemId<UserId>,
    body: RawBody,
) -> Result<Json<RecordResponse<User>>> {
    let mut store = state.write().await;
    if store.users.find(id).is_none() {
        return Err(AppError::UserNotFound(id));
    }

    let fields = body.object::<UserFields>()?.unwrap_or_default();
    let user = store
        .users
        .update(id, fields)
        .ok_or(AppError::UserNotFound(id))?;
    tracing::info!(user_id = %id, "user updated");

    Ok(Json(RecordResponse::with_message(UPDATED, user)))
}

/// Delete the first user with this id.
///
/// # Errors
///
/// Returns `UserNotFound` if no user has this id.
pub async fn destroy(
    State(state): State<AppState>,
    ItemId(id): ItemId<UserId>,
) -> Result<Json<MessageResponse>> {
    state
        .write()
        .await
        .users
        .remove(id)
        .ok_or(AppError::UserNotFound(id))?;
    tracing::info!(user_id = %id, "user deleted");

    Ok(Json(MessageResponse::new(DELETED)))
}
