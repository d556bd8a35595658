//! User lifecycle.
use super::error::{DirectoryError, DirectoryResult, Entity};
use super::{Directory, absent_is_deleted, missing_as, observed, patch};
use crate::model::{RoleId, RoleRef, User, UserId, UserPatchRequest, UserStatus, UserView};
use std::collections::HashMap;

impl Directory {
    /// All users with their role ids resolved to `{ _id, name }`.
    pub async fn list_users(&self) -> DirectoryResult<Vec<UserView>> {
        observed(Entity::User, "list", async {
            let users = self.store.list_users().await?;
            let roles = self.store.list_roles().await?;
            let by_id: HashMap<RoleId, RoleRef> = roles
                .iter()
                .map(|role| (role.id, RoleRef::from(role)))
                .collect();
            Ok(users
                .into_iter()
                .map(|user| UserView {
                    id: user.id,
                    name: user.name,
                    email: user.email,
                    roles: user
                        .roles
                        .iter()
                        .filter_map(|id| by_id.get(id).cloned())
                        .collect(),
                    status: user.status,
                })
                .collect())
        })
        .await
    }

    /// Add a user. The email is lowercased before the uniqueness check and
    /// before it is stored; role ids are stored as given.
    pub async fn create_user(
        &self,
        name: String,
        email: String,
        roles: Vec<RoleId>,
        status: Option<UserStatus>,
    ) -> DirectoryResult<User> {
        observed(Entity::User, "create", async {
            let name = patch::require("name", name)?;
            let email = patch::normalize_email(&patch::require("email", email)?);
            // Check-then-act: not atomic with the insert below.
            if self.store.find_user_by_email(&email).await?.is_some() {
                return Err(DirectoryError::DuplicateEmail);
            }
            let user = self
                .store
                .insert_user(User {
                    id: UserId::generate(),
                    name,
                    email,
                    roles: patch::dedup(roles),
                    status: status.unwrap_or_default(),
                })
                .await?;
            tracing::info!(user_id = %user.id, "user added");
            Ok(user)
        })
        .await
    }

    /// Apply a merge-on-falsy edit to a user.
    ///
    /// `status: ""` and an empty role list are no-ops on their fields. A
    /// non-empty status must name a known value.
    pub async fn edit_user(&self, id: UserId, request: UserPatchRequest) -> DirectoryResult<User> {
        observed(Entity::User, "edit", async {
            let current = self
                .store
                .get_user(id)
                .await
                .map_err(missing_as(Entity::User))?;
            let email = patch::supplied(request.email).map(|email| patch::normalize_email(&email));
            if let Some(email) = &email {
                if *email != current.email && self.store.find_user_by_email(email).await?.is_some()
                {
                    return Err(DirectoryError::EmailInUse);
                }
            }
            let status = match patch::supplied(request.status) {
                Some(raw) => raw.parse::<UserStatus>().map_err(DirectoryError::Validation)?,
                None => current.status,
            };
            let updated = User {
                id,
                name: patch::merge(current.name, request.name),
                email: patch::merge(current.email, email),
                roles: patch::merge(current.roles, request.roles.map(patch::dedup)),
                status,
            };
            let user = self
                .store
                .update_user(updated)
                .await
                .map_err(missing_as(Entity::User))?;
            tracing::info!(user_id = %user.id, "user updated");
            Ok(user)
        })
        .await
    }

    /// Remove a user. Nothing references users, so this never reports `InUse`;
    /// deleting an id that does not exist succeeds.
    pub async fn delete_user(&self, id: UserId) -> DirectoryResult<()> {
        observed(Entity::User, "delete", async {
            let removed = absent_is_deleted(self.store.delete_user(id).await)?;
            tracing::info!(user_id = %id, removed, "user deleted");
            Ok(())
        })
        .await
    }
}
