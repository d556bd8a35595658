//! System/health API handlers.
//!
//! # Purpose and responsibility
//! Provides lightweight endpoints for service metadata and health checks.
//!
//! # Key invariants and assumptions
//! - Health checks must be fast and side-effect free.
//! - System info is derived from in-memory state.
use crate::api::error::{ApiError, api_internal};
use crate::api::types::{HealthStatus, SystemInfo};
use crate::app::AppState;
use axum::Json;
use axum::extract::State;

#[utoipa::path(
    get,
    path = "/api/system/info",
    tag = "system",
    responses(
        (status = 200, description = "API version and storage backend", body = SystemInfo)
    )
)]
/// Return the API version and the active storage backend.
///
/// # Errors
/// - Does not return errors.
pub(crate) async fn system_info(State(state): State<AppState>) -> Json<SystemInfo> {
    let store = state.directory.store();
    Json(SystemInfo {
        api_version: state.api_version.clone(),
        storage_backend: store.backend_name().to_string(),
        durable_storage: store.is_durable(),
    })
}

#[utoipa::path(
    get,
    path = "/api/system/health",
    tag = "system",
    responses(
        (status = 200, description = "Service health", body = HealthStatus),
        (status = 500, description = "Storage unavailable", body = crate::api::types::ErrorResponse)
    )
)]
/// Return service health status.
///
/// # What it does
/// Probes the backing store and returns `ok` if healthy.
///
/// # Errors
/// - Returns 500 if the storage health check fails.
pub(crate) async fn system_health(
    State(state): State<AppState>,
) -> Result<Json<HealthStatus>, ApiError> {
    if let Err(err) = state.directory.store().health_check().await {
        return Err(api_internal("storage unavailable", &err));
    }
    Ok(Json(HealthStatus {
        status: "ok".to_string(),
    }))
}
