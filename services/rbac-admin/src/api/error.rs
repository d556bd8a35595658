//! API error types and helpers.
//!
//! # Purpose and responsibility
//! Centralizes failure-envelope construction so every endpoint reports
//! directory and store failures the same way.
//!
//! # Key invariants and assumptions
//! - Failure bodies always carry `success: false` and a human-readable
//!   `message`.
//! - Caller-correctable directory errors map to 400, a missing edit target to
//!   404, and store failures to 500 with the cause in `error`.
//!
//! # Security considerations
//! - Store failure causes are returned to the caller as-is, so store error
//!   messages must not embed credentials (connection URLs are never logged or
//!   formatted into errors).
use crate::api::types::ErrorResponse;
use crate::directory::error::DirectoryError;
use crate::store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Structured API error returned by handlers.
///
/// # Invariants
/// - `status` must match the semantics of the failure in `body`.
///
/// # Example
/// ```rust
/// use axum::http::StatusCode;
/// use rbac_admin::api::error::ApiError;
/// use rbac_admin::api::types::ErrorResponse;
///
/// let err = ApiError {
///     status: StatusCode::BAD_REQUEST,
///     body: ErrorResponse {
///         success: false,
///         message: "Role with this name already exists".to_string(),
///         error: None,
///     },
/// };
/// ```
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Build a 400 Bad Request error.
pub fn api_bad_request(message: &str) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        body: ErrorResponse {
            success: false,
            message: message.to_string(),
            error: None,
        },
    }
}

/// Build a 404 Not Found error.
pub fn api_not_found(message: &str) -> ApiError {
    ApiError {
        status: StatusCode::NOT_FOUND,
        body: ErrorResponse {
            success: false,
            message: message.to_string(),
            error: None,
        },
    }
}

/// Build a 500 Internal Server Error from a store error.
///
/// # What it does
/// Logs the store error and returns `message` with the cause attached.
pub fn api_internal(message: &str, err: &StoreError) -> ApiError {
    tracing::error!(error = ?err, "rbac-admin storage error");
    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: ErrorResponse {
            success: false,
            message: message.to_string(),
            error: Some(err.to_string()),
        },
    }
}

/// Translate a directory failure into a response.
///
/// `failure_message` is used only for store failures (e.g. "Error adding
/// role"); every other error reports its own message.
pub fn api_directory_error(failure_message: &str, err: DirectoryError) -> ApiError {
    match err {
        DirectoryError::Store(store_err) => api_internal(failure_message, &store_err),
        DirectoryError::NotFound(_) => api_not_found(&err.to_string()),
        DirectoryError::DuplicateName(_)
        | DirectoryError::DuplicateEmail
        | DirectoryError::EmailInUse
        | DirectoryError::InUse { .. }
        | DirectoryError::Validation(_) => api_bad_request(&err.to_string()),
    }
}
