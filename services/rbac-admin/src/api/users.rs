//! User API handlers.
use crate::api::error::{ApiError, api_directory_error};
use crate::api::types::{MessageResponse, UserCreateRequest, UserListResponse};
use crate::app::AppState;
use crate::model::{UserId, UserPatchRequest};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/users/all",
    tag = "users",
    responses(
        (status = 200, description = "List users with role names", body = UserListResponse),
        (status = 500, description = "Store failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>, ApiError> {
    let data = state
        .directory
        .list_users()
        .await
        .map_err(|err| api_directory_error("Error fetching users", err))?;
    Ok(Json(UserListResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = UserCreateRequest,
    responses(
        (status = 201, description = "User added", body = MessageResponse),
        (status = 400, description = "Duplicate email or missing field", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<UserCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .directory
        .create_user(body.name, body.email, body.roles, body.status)
        .await
        .map_err(|err| api_directory_error("Error adding user", err))?;
    Ok((StatusCode::CREATED, Json(MessageResponse::ok("User added"))))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = uuid::Uuid, Path, description = "User identifier")
    ),
    request_body = UserPatchRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Duplicate email or unknown status", body = crate::api::types::ErrorResponse),
        (status = 404, description = "User not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn edit_user(
    Path(id): Path<UserId>,
    State(state): State<AppState>,
    Json(body): Json<UserPatchRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .directory
        .edit_user(id, body)
        .await
        .map_err(|err| api_directory_error("Error updating user", err))?;
    Ok(Json(MessageResponse::ok("User updated")))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = uuid::Uuid, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 500, description = "Store failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_user(
    Path(id): Path<UserId>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .directory
        .delete_user(id)
        .await
        .map_err(|err| api_directory_error("Error deleting user", err))?;
    Ok(Json(MessageResponse::ok("User deleted")))
}
