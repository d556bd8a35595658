//! Directory consistency core.
//!
//! # Purpose
//! Implements the permission, role and user lifecycles on top of a
//! [`RecordStore`], and owns every cross-entity rule:
//! - permission and role names, and user emails, are unique per collection;
//! - a permission cannot be deleted while a role references it;
//! - a role cannot be deleted while a user references it.
//!
//! # Concurrency
//! Each rule is a read followed by a separate write, with nothing spanning the
//! two. Concurrent requests can therefore both pass a check: two creates with
//! the same name may both land, and a role deleted while a user referencing
//! it is being created leaves a dangling id. Listings tolerate dangling ids by
//! dropping them from the expansion.
//!
//! # Errors
//! Operations return [`DirectoryError`]. Store failures are wrapped, never
//! retried, and leave no state behind in the core.
pub mod error;
pub mod patch;
mod permissions;
mod roles;
mod users;

use crate::store::{RecordStore, StoreError};
use error::{DirectoryError, DirectoryResult, Entity};
use std::future::Future;
use std::sync::Arc;

/// Handle to the directory. Cheap to clone; all clones share one store.
#[derive(Clone)]
pub struct Directory {
    store: Arc<dyn RecordStore>,
}

impl Directory {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }
}

/// Run one directory operation and count its outcome.
async fn observed<T, F>(entity: Entity, op: &'static str, operation: F) -> DirectoryResult<T>
where
    F: Future<Output = DirectoryResult<T>>,
{
    let result = operation.await;
    let outcome = match &result {
        Ok(_) => "ok",
        Err(err) => {
            match err {
                DirectoryError::Store(cause) => {
                    tracing::error!(entity = %entity, op, error = ?cause, "directory store failure");
                }
                other => {
                    tracing::debug!(entity = %entity, op, reason = %other, "directory operation rejected");
                }
            }
            err.kind()
        }
    };
    metrics::counter!(
        "rbac_directory_ops_total",
        "entity" => entity.as_str(),
        "op" => op,
        "outcome" => outcome
    )
    .increment(1);
    result
}

/// Map a store `NotFound` to the entity-level error, passing anything else through.
fn missing_as(entity: Entity) -> impl Fn(StoreError) -> DirectoryError {
    move |err| match err {
        StoreError::NotFound(_) => DirectoryError::NotFound(entity),
        other => DirectoryError::Store(other),
    }
}

/// Deleting an absent record is treated as done.
fn absent_is_deleted(result: Result<(), StoreError>) -> DirectoryResult<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(StoreError::NotFound(_)) => Ok(false),
        Err(err) => Err(err.into()),
    }
}
