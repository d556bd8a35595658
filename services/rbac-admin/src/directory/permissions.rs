//! Permission lifecycle.
use super::error::{DirectoryError, DirectoryResult, Entity};
use super::{Directory, absent_is_deleted, observed, patch};
use crate::model::{Permission, PermissionId};
use crate::store::ReferenceField;

impl Directory {
    /// All permissions, in store order.
    pub async fn list_permissions(&self) -> DirectoryResult<Vec<Permission>> {
        observed(Entity::Permission, "list", async {
            Ok(self.store.list_permissions().await?)
        })
        .await
    }

    /// Add a permission. Names are unique by exact, case-sensitive match.
    pub async fn create_permission(
        &self,
        name: String,
        description: Option<String>,
    ) -> DirectoryResult<Permission> {
        observed(Entity::Permission, "create", async {
            let name = patch::require("name", name)?;
            // Check-then-act: not atomic with the insert below.
            if self.store.find_permission_by_name(&name).await?.is_some() {
                return Err(DirectoryError::DuplicateName(Entity::Permission));
            }
            let permission = self
                .store
                .insert_permission(Permission {
                    id: PermissionId::generate(),
                    name,
                    description,
                })
                .await?;
            tracing::info!(permission_id = %permission.id, name = %permission.name, "permission added");
            Ok(permission)
        })
        .await
    }

    /// Remove a permission unless a role still references it.
    ///
    /// Deleting an id that does not exist succeeds.
    pub async fn delete_permission(&self, id: PermissionId) -> DirectoryResult<()> {
        observed(Entity::Permission, "delete", async {
            if self
                .store
                .is_referenced(ReferenceField::RolePermissions, id.0)
                .await?
            {
                return Err(DirectoryError::InUse {
                    entity: Entity::Permission,
                    referrer: Entity::Role,
                });
            }
            let removed = absent_is_deleted(self.store.delete_permission(id).await)?;
            tracing::info!(permission_id = %id, removed, "permission deleted");
            Ok(())
        })
        .await
    }
}
