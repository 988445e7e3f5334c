//! Plan Routes
//!
//! - GET /api/v1/plans/meals - Daily meal plan
//! - GET /api/v1/plans/training - Weekly training protocol

use axum::{extract::Query, Json};

use crate::api::dto::{MealPlanResponse, TrainingParams, TrainingPlanResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::plans::{meal_plan, training_week, Equipment};

/// GET /api/v1/plans/meals
pub async fn get_meal_plan() -> Json<MealPlanResponse> {
    Json(MealPlanResponse {
        meals: meal_plan().to_vec(),
    })
}

/// GET /api/v1/plans/training?equipment=gym|home
pub async fn get_training_plan(
    Query(params): Query<TrainingParams>,
) -> ApiResult<Json<TrainingPlanResponse>> {
    let equipment = match params.equipment.as_deref() {
        None => Equipment::default(),
        Some(s) => s.parse().map_err(ApiError::Validation)?,
    };

    Ok(Json(TrainingPlanResponse {
        equipment,
        days: training_week(equipment),
    }))
}
