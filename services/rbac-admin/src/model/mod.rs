//! Directory data model.
//!
//! # Purpose
//! Re-exports the permission/role/user records, their typed identifiers, the
//! expanded list views, and the partial-update payloads used by the directory
//! core, the store backends, and the HTTP API.
mod permission;
mod role;
mod user;

pub use permission::{Permission, PermissionId, PermissionRef};
pub use role::{Role, RoleId, RolePatchRequest, RoleRef, RoleView};
pub use user::{User, UserId, UserPatchRequest, UserStatus, UserView};
