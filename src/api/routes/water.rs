//! Water Routes
//!
//! - GET /api/v1/water - Glasses logged this session
//! - POST /api/v1/water - Add glasses
//! - DELETE /api/v1/water - Reset to zero

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{AddWaterRequest, WaterResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/water
pub async fn get_water(State(state): State<Arc<AppState>>) -> Json<WaterResponse> {
    let glasses = state.session.read().await.water_glasses();
    Json(WaterResponse { glasses })
}

/// POST /api/v1/water
pub async fn add_water(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddWaterRequest>, JsonRejection>,
) -> ApiResult<Json<WaterResponse>> {
    let Json(req) = payload?;
    let glasses = state.session.write().await.add_water(req.glasses);
    tracing::debug!(added = req.glasses, total = glasses, "Water logged");
    Ok(Json(WaterResponse { glasses }))
}

/// DELETE /api/v1/water
pub async fn reset_water(State(state): State<Arc<AppState>>) -> Json<WaterResponse> {
    state.session.write().await.reset_water();
    Json(WaterResponse { glasses: 0 })
}
