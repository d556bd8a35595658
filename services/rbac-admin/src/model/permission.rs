//! Permission records.
//!
//! # Purpose
//! Defines the leaf entity of the access model and the compact reference shape
//! used when a role's permission set is expanded for display.
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PermissionId(pub Uuid);

impl PermissionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Permission {
    #[serde(rename = "_id")]
    pub id: PermissionId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A permission reduced to its id and name, as embedded in role listings.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct PermissionRef {
    #[serde(rename = "_id")]
    pub id: PermissionId,
    pub name: String,
}

impl From<&Permission> for PermissionRef {
    fn from(permission: &Permission) -> Self {
        Self {
            id: permission.id,
            name: permission.name.clone(),
        }
    }
}
