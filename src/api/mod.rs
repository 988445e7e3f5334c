//! Fuelplan REST API
//!
//! HTTP API layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Targets
//! - `POST /api/v1/targets` - Calorie and macro targets for a profile and goal
//!
//! ## Weight Log
//! - `GET /api/v1/weight` - History, chart series, and trend
//! - `POST /api/v1/weight` - Append a weigh-in
//! - `GET /api/v1/weight/export` - Download the log as CSV
//!
//! ## Water
//! - `GET /api/v1/water` - Glasses logged this session
//! - `POST /api/v1/water` - Add glasses
//! - `DELETE /api/v1/water` - Reset the counter
//!
//! ## Plans
//! - `GET /api/v1/plans/meals` - Daily meal plan
//! - `GET /api/v1/plans/training` - Weekly training protocol
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use fuelplan::api::{serve, ApiConfig, AppState};
//! use fuelplan::nutrition::NutritionCalculator;
//! use fuelplan::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let state = AppState::new(Session::in_memory(), NutritionCalculator::default(), config.clone());
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/targets", post(routes::targets::compute_targets))
        .route(
            "/weight",
            get(routes::weight::get_history).post(routes::weight::record_weight),
        )
        .route("/weight/export", get(routes::weight::export_history))
        .route(
            "/water",
            get(routes::water::get_water)
                .post(routes::water::add_water)
                .delete(routes::water::reset_water),
        )
        .route("/plans/meals", get(routes::plans::get_meal_plan))
        .route("/plans/training", get(routes::plans::get_training_plan));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Fuelplan API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Fuelplan API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::NutritionCalculator;
    use crate::session::Session;
    use crate::storage::CsvWeightLog;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let log = CsvWeightLog::open(dir.path().join("weight_log.csv")).unwrap();
        let session = Session::new(Arc::new(log));

        let state = AppState::new(session, NutritionCalculator::default(), ApiConfig::default());
        (build_router(state), dir)
    }

    /// App whose log path is a directory, so every read and write fails
    fn create_broken_app() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let log = CsvWeightLog::open(dir.path()).unwrap();
        let session = Session::new(Arc::new(log));

        let state = AppState::new(session, NutritionCalculator::default(), ApiConfig::default());
        (build_router(state), dir)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const REFERENCE_TARGETS: &str = r#"{
        "profile": {"weight_kg": 80, "height_cm": 180, "age_years": 24, "sex": "male"},
        "activity": 1.55,
        "goal": {"type": "fat_loss"}
    }"#;

    #[tokio::test]
    async fn test_health_live() {
        let (app, _dir) = create_test_app();
        let response = app.oneshot(get("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (app, _dir) = create_test_app();
        let response = app.oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_unavailable_log() {
        let (app, _dir) = create_broken_app();
        let response = app.oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _dir) = create_test_app();
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["weight_log"], "ok");
    }

    #[tokio::test]
    async fn test_health_full_degraded() {
        let (app, _dir) = create_broken_app();
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["weight_log"], "unavailable");
    }

    #[tokio::test]
    async fn test_targets_reference_athlete() {
        let (app, _dir) = create_test_app();
        let response = app
            .oneshot(post_json("/api/v1/targets", REFERENCE_TARGETS))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["bmr"], 1810.0);
        assert_eq!(body["tdee"], 2805.5);
        assert_eq!(body["targets"]["calories"], 2306);
        assert_eq!(body["targets"]["protein_g"], 176);
        assert_eq!(body["targets"]["fat_g"], 64);
        assert_eq!(body["targets"]["carbs_g"], 257);
        assert_eq!(body["warnings"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_targets_named_activity_and_deadline() {
        let (app, _dir) = create_test_app();
        let body = r#"{
            "profile": {"weight_kg": 80, "height_cm": 180, "age_years": 24, "sex": "male"},
            "activity": "moderate",
            "goal": {"type": "deadline", "target_weight_kg": 78, "deadline": "2026-11-30"},
            "today": "2026-10-01"
        }"#;
        let response = app.oneshot(post_json("/api/v1/targets", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // 2 kg over 60 days: -15400 / 60 = -256.67 kcal/day
        let body = json_body(response).await;
        let adjustment = body["daily_adjustment_kcal"].as_f64().unwrap();
        assert!((adjustment + 256.666).abs() < 0.01);
        assert_eq!(body["targets"]["calories"], 2549);
    }

    #[tokio::test]
    async fn test_targets_past_deadline_warns() {
        let (app, _dir) = create_test_app();
        let body = r#"{
            "profile": {"weight_kg": 80, "height_cm": 180, "age_years": 24, "sex": "male"},
            "activity": 1.55,
            "goal": {"type": "deadline", "target_weight_kg": 80, "deadline": "2026-01-01"},
            "today": "2026-10-01"
        }"#;
        let response = app.oneshot(post_json("/api/v1/targets", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["warnings"][0]["kind"], "deadline_clamped");
    }

    #[tokio::test]
    async fn test_targets_invalid_weight() {
        let (app, _dir) = create_test_app();
        let body = r#"{
            "profile": {"weight_kg": 0, "height_cm": 180, "age_years": 24, "sex": "male"},
            "activity": 1.55,
            "goal": {"type": "maintenance"}
        }"#;
        let response = app.oneshot(post_json("/api/v1/targets", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_targets_implausible_weight() {
        let (app, _dir) = create_test_app();
        let body = REFERENCE_TARGETS.replace(r#""weight_kg": 80"#, r#""weight_kg": 1e9"#);
        let response = app.oneshot(post_json("/api/v1/targets", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_targets_unsupported_factor() {
        let (app, _dir) = create_test_app();
        let body = REFERENCE_TARGETS.replace("1.55", "1.6");
        let response = app.oneshot(post_json("/api/v1/targets", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_targets_invalid_json() {
        let (app, _dir) = create_test_app();
        let response = app
            .oneshot(post_json("/api/v1/targets", "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_targets_work_without_log() {
        let (app, _dir) = create_broken_app();
        let response = app
            .oneshot(post_json("/api/v1/targets", REFERENCE_TARGETS))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_record_and_read_weight() {
        let (app, _dir) = create_test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/weight",
                r#"{"weight_kg": 81.5, "date": "2026-10-01"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/weight",
                r#"{"weight_kg": 80.9, "date": "2026-10-08"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.oneshot(get("/api/v1/weight")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["entries"].as_array().unwrap().len(), 2);
        assert_eq!(body["entries"][0]["date"], "2026-10-01");
        assert_eq!(body["chart"]["labels"][1], "2026-10-08");
        assert_eq!(body["chart"]["datasets"][0]["data"][1], 80.9);
    }

    #[tokio::test]
    async fn test_record_invalid_weight() {
        let (app, _dir) = create_test_app();
        let response = app
            .oneshot(post_json("/api/v1/weight", r#"{"weight_kg": -3}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_weight_history_unavailable() {
        let (app, _dir) = create_broken_app();
        let response = app.oneshot(get("/api/v1/weight")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "unavailable");
        assert_eq!(body["entries"].as_array().unwrap().len(), 0);
        assert!(body["reason"].is_string());
    }

    #[tokio::test]
    async fn test_record_weight_unavailable() {
        let (app, _dir) = create_broken_app();
        let response = app
            .oneshot(post_json("/api/v1/weight", r#"{"weight_kg": 80}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "LOG_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_export_weight_csv() {
        let (app, _dir) = create_test_app();
        app.clone()
            .oneshot(post_json(
                "/api/v1/weight",
                r#"{"weight_kg": 81.5, "date": "2026-10-01"}"#,
            ))
            .await
            .unwrap();

        let response = app.oneshot(get("/api/v1/weight/export")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Date,Weight\n"));
        assert!(text.contains("2026-10-01,81.5"));
    }

    #[tokio::test]
    async fn test_water_counter() {
        let (app, _dir) = create_test_app();

        let response = app.clone().oneshot(get("/api/v1/water")).await.unwrap();
        assert_eq!(json_body(response).await["glasses"], 0);

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/water", "{}"))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["glasses"], 1);

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/water", r#"{"glasses": 3}"#))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["glasses"], 4);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/water")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(json_body(response).await["glasses"], 0);

        let response = app.oneshot(get("/api/v1/water")).await.unwrap();
        assert_eq!(json_body(response).await["glasses"], 0);
    }

    #[tokio::test]
    async fn test_meal_plan() {
        let (app, _dir) = create_test_app();
        let response = app.oneshot(get("/api/v1/plans/meals")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["meals"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_training_plan() {
        let (app, _dir) = create_test_app();
        let response = app
            .clone()
            .oneshot(get("/api/v1/plans/training?equipment=home"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["equipment"], "home");

        let response = app
            .oneshot(get("/api/v1/plans/training?equipment=pool"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
