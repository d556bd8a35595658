//! RBAC administration service library crate.
//!
//! # Purpose
//! Exposes the directory core, its record stores, the HTTP API surface and
//! configuration for use by the binary and tests.
pub mod api;
pub mod app;
pub mod config;
pub mod directory;
pub mod model;
pub mod observability;
pub mod store;
