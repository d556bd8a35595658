//! Role lifecycle.
use super::error::{DirectoryError, DirectoryResult, Entity};
use super::{Directory, absent_is_deleted, missing_as, observed, patch};
use crate::model::{
    PermissionId, PermissionRef, Role, RoleId, RolePatchRequest, RoleView,
};
use crate::store::ReferenceField;
use std::collections::HashMap;

impl Directory {
    /// All roles with their permission ids resolved to `{ _id, name }`.
    ///
    /// Ids that no longer resolve are left out of the expansion.
    pub async fn list_roles(&self) -> DirectoryResult<Vec<RoleView>> {
        observed(Entity::Role, "list", async {
            let roles = self.store.list_roles().await?;
            let permissions = self.store.list_permissions().await?;
            let by_id: HashMap<PermissionId, PermissionRef> = permissions
                .iter()
                .map(|permission| (permission.id, PermissionRef::from(permission)))
                .collect();
            Ok(roles
                .into_iter()
                .map(|role| RoleView {
                    id: role.id,
                    name: role.name,
                    permissions: role
                        .permissions
                        .iter()
                        .filter_map(|id| by_id.get(id).cloned())
                        .collect(),
                })
                .collect())
        })
        .await
    }

    /// Add a role. Permission ids are stored as given, without resolving them.
    pub async fn create_role(
        &self,
        name: String,
        permissions: Vec<PermissionId>,
    ) -> DirectoryResult<Role> {
        observed(Entity::Role, "create", async {
            let name = patch::require("name", name)?;
            // Check-then-act: not atomic with the insert below.
            if self.store.find_role_by_name(&name).await?.is_some() {
                return Err(DirectoryError::DuplicateName(Entity::Role));
            }
            let role = self
                .store
                .insert_role(Role {
                    id: RoleId::generate(),
                    name,
                    permissions: patch::dedup(permissions),
                })
                .await?;
            tracing::info!(role_id = %role.id, name = %role.name, "role added");
            Ok(role)
        })
        .await
    }

    /// Apply a merge-on-falsy edit to a role.
    ///
    /// An empty `permissions` list is indistinguishable from an absent one and
    /// leaves the stored set unchanged.
    pub async fn edit_role(&self, id: RoleId, request: RolePatchRequest) -> DirectoryResult<Role> {
        observed(Entity::Role, "edit", async {
            let current = self
                .store
                .get_role(id)
                .await
                .map_err(missing_as(Entity::Role))?;
            let name = patch::supplied(request.name);
            if let Some(name) = &name {
                if *name != current.name && self.store.find_role_by_name(name).await?.is_some() {
                    return Err(DirectoryError::DuplicateName(Entity::Role));
                }
            }
            let updated = Role {
                id,
                name: patch::merge(current.name, name),
                permissions: patch::merge(
                    current.permissions,
                    request.permissions.map(patch::dedup),
                ),
            };
            let role = self
                .store
                .update_role(updated)
                .await
                .map_err(missing_as(Entity::Role))?;
            tracing::info!(role_id = %role.id, "role updated");
            Ok(role)
        })
        .await
    }

    /// Remove a role unless a user still holds it.
    ///
    /// Deleting an id that does not exist succeeds.
    pub async fn delete_role(&self, id: RoleId) -> DirectoryResult<()> {
        observed(Entity::Role, "delete", async {
            if self.store.is_referenced(ReferenceField::UserRoles, id.0).await? {
                return Err(DirectoryError::InUse {
                    entity: Entity::Role,
                    referrer: Entity::User,
                });
            }
            let removed = absent_is_deleted(self.store.delete_role(id).await)?;
            tracing::info!(role_id = %id, removed, "role deleted");
            Ok(())
        })
        .await
    }
}
