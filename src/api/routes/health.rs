//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (weight log readable)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::routes::run_blocking;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 503 when the weight log cannot be read.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if check_log_health(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status. The calculator has no dependencies, so an
/// unreadable log only degrades the service.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let log_ok = check_log_health(&state).await;
    let location = state.session.read().await.log().describe();

    Json(HealthResponse {
        status: if log_ok { "healthy" } else { "degraded" }.to_string(),
        weight_log: if log_ok { "ok" } else { "unavailable" }.to_string(),
        weight_log_location: location,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Try a full read of the weight log
async fn check_log_health(state: &AppState) -> bool {
    let log = Arc::clone(state.session.read().await.log());
    run_blocking(move || log.read_all().is_ok())
        .await
        .unwrap_or(false)
}
