//! Role API handlers.
//!
//! # Purpose
//! Lists roles with their permissions expanded, and adds, edits and deletes
//! roles through the directory.
use crate::api::error::{ApiError, api_directory_error};
use crate::api::types::{MessageResponse, RoleCreateRequest, RoleListResponse};
use crate::app::AppState;
use crate::model::{RoleId, RolePatchRequest};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/roles/all",
    tag = "roles",
    responses(
        (status = 200, description = "List roles with permission names", body = RoleListResponse),
        (status = 500, description = "Store failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_roles(
    State(state): State<AppState>,
) -> Result<Json<RoleListResponse>, ApiError> {
    let data = state
        .directory
        .list_roles()
        .await
        .map_err(|err| api_directory_error("Error fetching roles", err))?;
    Ok(Json(RoleListResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/api/roles",
    tag = "roles",
    request_body = RoleCreateRequest,
    responses(
        (status = 201, description = "Role added", body = MessageResponse),
        (status = 400, description = "Duplicate or missing name", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_role(
    State(state): State<AppState>,
    Json(body): Json<RoleCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .directory
        .create_role(body.name, body.permissions)
        .await
        .map_err(|err| api_directory_error("Error adding role", err))?;
    Ok((StatusCode::CREATED, Json(MessageResponse::ok("Role added"))))
}

#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    tag = "roles",
    params(
        ("id" = uuid::Uuid, Path, description = "Role identifier")
    ),
    request_body = RolePatchRequest,
    responses(
        (status = 200, description = "Role updated", body = MessageResponse),
        (status = 400, description = "Duplicate name", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Role not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn edit_role(
    Path(id): Path<RoleId>,
    State(state): State<AppState>,
    Json(body): Json<RolePatchRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .directory
        .edit_role(id, body)
        .await
        .map_err(|err| api_directory_error("Error updating role", err))?;
    Ok(Json(MessageResponse::ok("Role updated")))
}

#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    tag = "roles",
    params(
        ("id" = uuid::Uuid, Path, description = "Role identifier")
    ),
    responses(
        (status = 200, description = "Role deleted", body = MessageResponse),
        (status = 400, description = "Role is assigned to users", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_role(
    Path(id): Path<RoleId>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .directory
        .delete_role(id)
        .await
        .map_err(|err| api_directory_error("Error deleting role", err))?;
    Ok(Json(MessageResponse::ok("Role deleted")))
}
