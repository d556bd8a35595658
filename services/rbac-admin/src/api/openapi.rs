//! OpenAPI schema aggregation for the admin API.
//!
//! # Purpose
//! Collects all routes and schema types into a single OpenAPI document for docs
//! and client generation.
use crate::api::{
    permissions, roles, system,
    types::{
        ErrorResponse, HealthStatus, MessageResponse, PermissionCreateRequest,
        PermissionListResponse, RoleCreateRequest, RoleListResponse, SystemInfo,
        UserCreateRequest, UserListResponse,
    },
    users,
};
use crate::model::{
    Permission, PermissionId, PermissionRef, RoleId, RolePatchRequest, RoleRef, RoleView,
    UserId, UserPatchRequest, UserStatus, UserView,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "rbac-admin",
        version = "v1",
        description = "RBAC administration HTTP API"
    ),
    paths(
        system::system_info,
        system::system_health,
        permissions::list_permissions,
        permissions::create_permission,
        permissions::delete_permission,
        roles::list_roles,
        roles::create_role,
        roles::edit_role,
        roles::delete_role,
        users::list_users,
        users::create_user,
        users::edit_user,
        users::delete_user
    ),
    components(schemas(
        SystemInfo,
        HealthStatus,
        ErrorResponse,
        MessageResponse,
        Permission,
        PermissionId,
        PermissionRef,
        PermissionCreateRequest,
        PermissionListResponse,
        RoleId,
        RoleRef,
        RoleView,
        RoleCreateRequest,
        RolePatchRequest,
        RoleListResponse,
        UserId,
        UserStatus,
        UserView,
        UserCreateRequest,
        UserPatchRequest,
        UserListResponse
    )),
    tags(
        (name = "system", description = "System and discovery endpoints"),
        (name = "permissions", description = "Permission management"),
        (name = "roles", description = "Role management"),
        (name = "users", description = "User management")
    )
)]
pub struct ApiDoc;
