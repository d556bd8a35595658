//! Role records, listing views, and edit payloads.
//!
//! # Purpose
//! A role is a named bundle of permission ids. Stored roles hold bare ids;
//! listings expand them into [`PermissionRef`]s.
use crate::model::{PermissionId, PermissionRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RoleId(pub Uuid);

impl RoleId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<PermissionId>,
}

/// Role as returned by the listing endpoint, with permissions resolved to names.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct RoleView {
    #[serde(rename = "_id")]
    pub id: RoleId,
    pub name: String,
    pub permissions: Vec<PermissionRef>,
}

/// A role reduced to its id and name, as embedded in user listings.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct RoleRef {
    #[serde(rename = "_id")]
    pub id: RoleId,
    pub name: String,
}

impl From<&Role> for RoleRef {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
        }
    }
}

/// Partial update for a role.
///
/// Absent fields, empty names and empty permission sets all leave the stored
/// value untouched (see [`crate::directory::patch`]).
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct RolePatchRequest {
    pub name: Option<String>,
    pub permissions: Option<Vec<PermissionId>>,
}
