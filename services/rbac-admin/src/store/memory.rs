//! In-memory implementation of the record store.
//!
//! # Purpose
//! Implements [`RecordStore`] with one insertion-ordered `Vec` per collection,
//! each guarded by a `tokio::sync::RwLock`. It exists for:
//! - local development and tests (no external dependencies)
//! - deployments where durability is not required
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - Each call takes the lock of one collection only. Nothing spans the
//!   directory's check and its write, so the check-then-act races of the
//!   directory core are reproduced faithfully here.
//!
//! # Performance characteristics
//! Lookups are linear scans. This is fine for the admin-panel sizes the
//! backend targets and keeps listings in insertion order.
//!
//! # Metrics
//! Updates the `rbac_admin_records` gauge per collection after each mutation,
//! mirroring the durable backend.
use super::{RecordStore, ReferenceField, StoreError, StoreResult};
use crate::model::{Permission, PermissionId, Role, RoleId, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory record store.
///
/// Collections are wrapped in `Arc<RwLock<...>>` so the store can be shared
/// across request handlers; reads proceed concurrently, writes serialize per
/// collection.
#[derive(Default)]
pub struct InMemoryStore {
    permissions: Arc<RwLock<Vec<Permission>>>,
    roles: Arc<RwLock<Vec<Role>>>,
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn record_count(collection: &'static str, len: usize) {
    metrics::gauge!("rbac_admin_records", "collection" => collection).set(len as f64);
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_permissions(&self) -> StoreResult<Vec<Permission>> {
        Ok(self.permissions.read().await.clone())
    }

    async fn find_permission_by_name(&self, name: &str) -> StoreResult<Option<Permission>> {
        let permissions = self.permissions.read().await;
        Ok(permissions.iter().find(|p| p.name == name).cloned())
    }

    async fn insert_permission(&self, permission: Permission) -> StoreResult<Permission> {
        let mut permissions = self.permissions.write().await;
        if permissions.iter().any(|p| p.id == permission.id) {
            return Err(StoreError::Conflict("permission id exists".into()));
        }
        permissions.push(permission.clone());
        record_count("permissions", permissions.len());
        Ok(permission)
    }

    async fn delete_permission(&self, id: PermissionId) -> StoreResult<()> {
        let mut permissions = self.permissions.write().await;
        let before = permissions.len();
        permissions.retain(|p| p.id != id);
        if permissions.len() == before {
            return Err(StoreError::NotFound("permission".into()));
        }
        record_count("permissions", permissions.len());
        Ok(())
    }

    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        Ok(self.roles.read().await.clone())
    }

    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.iter().find(|r| r.name == name).cloned())
    }

    async fn get_role(&self, id: RoleId) -> StoreResult<Role> {
        let roles = self.roles.read().await;
        roles
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("role".into()))
    }

    async fn insert_role(&self, role: Role) -> StoreResult<Role> {
        let mut roles = self.roles.write().await;
        if roles.iter().any(|r| r.id == role.id) {
            return Err(StoreError::Conflict("role id exists".into()));
        }
        roles.push(role.clone());
        record_count("roles", roles.len());
        Ok(role)
    }

    async fn update_role(&self, role: Role) -> StoreResult<Role> {
        let mut roles = self.roles.write().await;
        let slot = roles
            .iter_mut()
            .find(|r| r.id == role.id)
            .ok_or_else(|| StoreError::NotFound("role".into()))?;
        *slot = role.clone();
        Ok(role)
    }

    async fn delete_role(&self, id: RoleId) -> StoreResult<()> {
        let mut roles = self.roles.write().await;
        let before = roles.len();
        roles.retain(|r| r.id != id);
        if roles.len() == before {
            return Err(StoreError::NotFound("role".into()));
        }
        record_count("roles", roles.len());
        Ok(())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("user".into()))
    }

    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::Conflict("user id exists".into()));
        }
        users.push(user.clone());
        record_count("users", users.len());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| StoreError::NotFound("user".into()))?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(StoreError::NotFound("user".into()));
        }
        record_count("users", users.len());
        Ok(())
    }

    async fn is_referenced(&self, field: ReferenceField, id: Uuid) -> StoreResult<bool> {
        let referenced = match field {
            ReferenceField::RolePermissions => {
                let target = PermissionId(id);
                self.roles
                    .read()
                    .await
                    .iter()
                    .any(|r| r.permissions.contains(&target))
            }
            ReferenceField::UserRoles => {
                let target = RoleId(id);
                self.users
                    .read()
                    .await
                    .iter()
                    .any(|u| u.roles.contains(&target))
            }
        };
        Ok(referenced)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
