//! Admin HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
//!
//! # Notes
//! This module centralizes route composition to keep `main` small and testable.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::directory::Directory;
use crate::observability;
use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub directory: Directory,
    pub api_version: String,
}

impl AppState {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            api_version: "v1".to_string(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            let parent = observability::trace_context_from_headers(request.headers());
            let span = tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            );
            span.set_parent(parent);
            span
        });

    Router::new()
        .route("/api/system/info", get(api::system::system_info))
        .route("/api/system/health", get(api::system::system_health))
        .route(
            "/api/permissions/all",
            get(api::permissions::list_permissions),
        )
        .route(
            "/api/permissions",
            post(api::permissions::create_permission),
        )
        .route(
            "/api/permissions/:id",
            delete(api::permissions::delete_permission),
        )
        .route("/api/roles/all", get(api::roles::list_roles))
        .route("/api/roles", post(api::roles::create_role))
        .route(
            "/api/roles/:id",
            put(api::roles::edit_role).delete(api::roles::delete_role),
        )
        .route("/api/users/all", get(api::users::list_users))
        .route("/api/users", post(api::users::create_user))
        .route(
            "/api/users/:id",
            put(api::users::edit_user).delete(api::users::delete_user),
        )
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/api/openapi.json", ApiDoc::openapi()),
        )
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
