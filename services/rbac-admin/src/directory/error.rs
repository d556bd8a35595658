//! Directory error types.
//!
//! # Purpose
//! Classifies every way a directory operation can fail so the HTTP layer can
//! report it without inspecting store internals.
//!
//! # Key invariants
//! - Every variant except [`DirectoryError::Store`] is caller-correctable.
//! - Display strings are user-facing and end up in response envelopes.
use crate::store::StoreError;
use std::fmt;
use thiserror::Error;

/// The three directory collections, used to label errors and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Permission,
    Role,
    User,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Permission => "permission",
            Entity::Role => "role",
            Entity::User => "user",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Entity::Permission => "Permission",
            Entity::Role => "Role",
            Entity::User => "User",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Entity::Permission => "permissions",
            Entity::Role => "roles",
            Entity::User => "users",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("{} with this name already exists", .0.title())]
    DuplicateName(Entity),
    #[error("User with this email already exists")]
    DuplicateEmail,
    /// Edit-time email collision; same rule as `DuplicateEmail`, own wording.
    #[error("Email already in use")]
    EmailInUse,
    #[error("Cannot delete {entity} as it is assigned to {}", .referrer.plural())]
    InUse { entity: Entity, referrer: Entity },
    #[error("{} not found", .0.title())]
    NotFound(Entity),
    #[error("{0}")]
    Validation(String),
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl DirectoryError {
    /// Stable, machine-readable kind used for metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            DirectoryError::DuplicateName(_) => "duplicate_name",
            DirectoryError::DuplicateEmail | DirectoryError::EmailInUse => "duplicate_email",
            DirectoryError::InUse { .. } => "in_use",
            DirectoryError::NotFound(_) => "not_found",
            DirectoryError::Validation(_) => "validation",
            DirectoryError::Store(_) => "store_failure",
        }
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
