//! Admin HTTP API module.
//!
//! # Purpose
//! Exposes one handler module per resource plus the shared envelope types and
//! error mapping. Handlers call exactly one directory operation each.
pub mod error;
pub mod openapi;
pub mod permissions;
pub mod roles;
pub mod system;
pub mod types;
pub mod users;
