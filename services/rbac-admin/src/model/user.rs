//! User records, status, listing views, and edit payloads.
use crate::model::{RoleId, RoleRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Activity flag on a user. Any value may be replaced by any other.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Active" => Ok(UserStatus::Active),
            "Inactive" => Ok(UserStatus::Inactive),
            other => Err(format!("unknown user status: {other}")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    /// Always stored lowercase.
    pub email: String,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    #[serde(default)]
    pub status: UserStatus,
}

/// User as returned by the listing endpoint, with roles resolved to names.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub roles: Vec<RoleRef>,
    pub status: UserStatus,
}

/// Partial update for a user.
///
/// `status` is carried as raw text so that an empty string can be told apart
/// from a malformed value: the former is a no-op, the latter is rejected.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct UserPatchRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub roles: Option<Vec<RoleId>>,
    pub status: Option<String>,
}
