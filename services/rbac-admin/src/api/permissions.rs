//! Permission API handlers.
//!
//! # Purpose
//! Lists, adds and deletes permissions through the directory, wrapping each
//! result in the response envelope.
use crate::api::error::{ApiError, api_directory_error};
use crate::api::types::{MessageResponse, PermissionCreateRequest, PermissionListResponse};
use crate::app::AppState;
use crate::model::PermissionId;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/permissions/all",
    tag = "permissions",
    responses(
        (status = 200, description = "List permissions", body = PermissionListResponse),
        (status = 500, description = "Store failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_permissions(
    State(state): State<AppState>,
) -> Result<Json<PermissionListResponse>, ApiError> {
    let data = state
        .directory
        .list_permissions()
        .await
        .map_err(|err| api_directory_error("Error fetching permissions", err))?;
    Ok(Json(PermissionListResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/api/permissions",
    tag = "permissions",
    request_body = PermissionCreateRequest,
    responses(
        (status = 201, description = "Permission added", body = MessageResponse),
        (status = 400, description = "Duplicate or missing name", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_permission(
    State(state): State<AppState>,
    Json(body): Json<PermissionCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .directory
        .create_permission(body.name, body.description)
        .await
        .map_err(|err| api_directory_error("Error adding permission", err))?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("Permission added")),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/permissions/{id}",
    tag = "permissions",
    params(
        ("id" = uuid::Uuid, Path, description = "Permission identifier")
    ),
    responses(
        (status = 200, description = "Permission deleted", body = MessageResponse),
        (status = 400, description = "Permission is assigned to roles", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_permission(
    Path(id): Path<PermissionId>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .directory
        .delete_permission(id)
        .await
        .map_err(|err| api_directory_error("Error deleting permission", err))?;
    Ok(Json(MessageResponse::ok("Permission deleted")))
}
