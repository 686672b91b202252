//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`       - Service banner (public)
//! - `/api/*`       - REST API, see [`crate::api::routes`]
//! - anything else  - JSON `404`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin
//! - **Caller resolution** - Bearer token to caller identity
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{fallback_handler, root_handler};
use crate::api::middleware::{auth, cors, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Routes and middleware without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest("/api", api::routes::api_routes())
        .fallback(fallback_handler)
        .layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}
