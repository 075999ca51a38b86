//! Health check endpoint handlers for monitoring and load balancers.

use std::collections::HashMap;

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;

/// # Routes
/// - `GET /health` - Detailed report
/// - `GET /health/ready` - Readiness check
/// - `GET /health/live` - Liveness check
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

async fn database_report(state: &AppState) -> HealthResponse {
    let result = state.services.health.check_database().await;
    let mut checks = HashMap::new();
    checks.insert("database".to_string(), ComponentHealth::from(result));
    HealthResponse::from_checks(checks)
}

fn status_code(response: &HealthResponse) -> StatusCode {
    match response.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Detailed health report including database connectivity.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let response = database_report(&state).await;
    (status_code(&response), Json(response))
}

/// Readiness check: 200 once `SELECT 1` succeeds, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 503, description = "Service is not ready", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let response = database_report(&state).await;
    (status_code(&response), Json(response))
}

/// Liveness check; never touches dependencies.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}
