//! HTTP API request/response types.
//!
//! # Purpose
//! Defines the request bodies and the `{ success, data?, message?, error? }`
//! response envelope shapes used by the admin REST API and its OpenAPI schema.
use crate::model::{Permission, PermissionId, RoleId, RoleView, UserStatus, UserView};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PermissionCreateRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RoleCreateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<PermissionId>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserCreateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    pub status: Option<UserStatus>,
}

/// Write confirmation: `{ success: true, message }`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Failure envelope: `{ success: false, message, error? }`.
///
/// `error` carries the underlying cause of store failures only.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PermissionListResponse {
    pub success: bool,
    pub data: Vec<Permission>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RoleListResponse {
    pub success: bool,
    pub data: Vec<RoleView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserListResponse {
    pub success: bool,
    pub data: Vec<UserView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SystemInfo {
    pub api_version: String,
    pub storage_backend: String,
    pub durable_storage: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
}
