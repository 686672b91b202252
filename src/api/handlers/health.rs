//! Handlers for health check, service banner and unknown routes.

use axum::{Json, extract::State, http::StatusCode, http::Uri};

use crate::api::dto::health::{
    CheckStatus, HealthChecks, HealthResponse, ServiceEndpoints, ServiceInfo,
};
use crate::error::AppError;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// # Response Codes
///
/// - **200 OK**: Store reachable
/// - **503 Service Unavailable**: Store unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let healthy = db_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database: db_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.store_health.ping().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: Some("Connected".to_string()),
        },
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            CheckStatus {
                status: "error".to_string(),
                message: Some("Disconnected".to_string()),
            }
        }
    }
}

/// Service banner.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Marketplace API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        endpoints: ServiceEndpoints {
            health: "/api/health",
            auth: "/api/auth/*",
            listings: "/api/listings/*",
        },
    })
}

/// JSON `404` for any unrouted path.
pub async fn fallback_handler(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "No route");
    AppError::not_found("The requested resource was not found")
}
