//! Record store abstraction for the directory.
//!
//! # Purpose
//! Defines the persistence collaborator the directory core runs against: plain
//! per-collection CRUD plus a reference-existence query. Backends hold no
//! cross-entity rules of their own; uniqueness and referential integrity live
//! in [`crate::directory`].
//!
//! # Notes
//! - `insert_*` reports `Conflict` only on an id collision, never on a
//!   duplicate name or email.
//! - `update_*`/`delete_*`/`get_*` report `NotFound` for an absent id; callers
//!   decide whether that is an error.
use crate::model::{Permission, PermissionId, Role, RoleId, User, UserId};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A collection field holding a set of ids of another collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceField {
    /// `roles.permissions` → permission ids.
    RolePermissions,
    /// `users.roles` → role ids.
    UserRoles,
}

impl ReferenceField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceField::RolePermissions => "roles.permissions",
            ReferenceField::UserRoles => "users.roles",
        }
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_permissions(&self) -> StoreResult<Vec<Permission>>;
    async fn find_permission_by_name(&self, name: &str) -> StoreResult<Option<Permission>>;
    async fn insert_permission(&self, permission: Permission) -> StoreResult<Permission>;
    async fn delete_permission(&self, id: PermissionId) -> StoreResult<()>;

    async fn list_roles(&self) -> StoreResult<Vec<Role>>;
    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>>;
    async fn get_role(&self, id: RoleId) -> StoreResult<Role>;
    async fn insert_role(&self, role: Role) -> StoreResult<Role>;
    async fn update_role(&self, role: Role) -> StoreResult<Role>;
    async fn delete_role(&self, id: RoleId) -> StoreResult<()>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;
    /// Exact match against the stored (already lowercased) email.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn get_user(&self, id: UserId) -> StoreResult<User>;
    async fn insert_user(&self, user: User) -> StoreResult<User>;
    async fn update_user(&self, user: User) -> StoreResult<User>;
    async fn delete_user(&self, id: UserId) -> StoreResult<()>;

    /// Whether any record's `field` set contains `id`.
    async fn is_referenced(&self, field: ReferenceField, id: Uuid) -> StoreResult<bool>;

    async fn health_check(&self) -> StoreResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;

    /// Release backend resources. The store must not be used afterwards.
    async fn close(&self) {}
}
