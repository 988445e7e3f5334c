//! Target Routes
//!
//! - POST /api/v1/targets - Compute calorie and macro targets

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::TargetsRequest;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::nutrition::TargetBreakdown;

/// POST /api/v1/targets
///
/// Profile, activity, and goal are validated while the body is parsed;
/// anything out of range is a 400 before the calculator runs.
pub async fn compute_targets(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TargetsRequest>, JsonRejection>,
) -> ApiResult<Json<TargetBreakdown>> {
    let Json(req) = payload?;
    let today = req.today.unwrap_or_else(|| Utc::now().date_naive());

    let session = state.session.read().await;
    let breakdown = session.targets(&state.calculator, &req.profile, req.activity, &req.goal, today);

    tracing::info!(
        goal = %req.goal,
        activity = %req.activity,
        calories = breakdown.targets.calories,
        warnings = breakdown.warnings.len(),
        "Computed targets"
    );

    Ok(Json(breakdown))
}
