//! Weight Log Routes
//!
//! - GET /api/v1/weight - Full history, chart series, and trend
//! - POST /api/v1/weight - Append a weigh-in
//! - GET /api/v1/weight/export - Download the log as CSV

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{RecordWeightRequest, RecordWeightResponse, WeightEntryDto, WeightHistoryResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::run_blocking;
use crate::api::state::AppState;
use crate::session;
use crate::storage::export_csv;

/// GET /api/v1/weight
///
/// An unreadable log is reported as `"status": "unavailable"` with no
/// entries, still 200.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<WeightHistoryResponse>> {
    let log = Arc::clone(state.session.read().await.log());
    let history = run_blocking(move || session::load_history(log.as_ref())).await?;
    Ok(Json(WeightHistoryResponse::from(&history)))
}

/// POST /api/v1/weight
pub async fn record_weight(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecordWeightRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RecordWeightResponse>)> {
    let Json(req) = payload?;
    let date = req.date.unwrap_or_else(|| Utc::now().date_naive());

    let weight_kg = req.weight_kg;
    let log = Arc::clone(state.session.read().await.log());
    let entry = run_blocking(move || session::record_weight(log.as_ref(), date, weight_kg)).await??;

    Ok((
        StatusCode::CREATED,
        Json(RecordWeightResponse {
            status: "ok".to_string(),
            entry: WeightEntryDto::from(&entry),
        }),
    ))
}

/// GET /api/v1/weight/export
pub async fn export_history(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    if !state.config.enable_export {
        return Err(ApiError::Validation("Export feature is disabled".to_string()));
    }

    let log = Arc::clone(state.session.read().await.log());
    let body = run_blocking(move || log.read_all().and_then(|entries| export_csv(&entries))).await??;

    let filename = format!("weight_log_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}
