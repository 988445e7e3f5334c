//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::nutrition::{ActivityLevel, AthleteProfile, Goal};
use crate::plans::{Equipment, Meal, TrainingDay};
use crate::storage::{WeightHistory, WeightLogEntry, WeightTrend};

// ============================================
// TARGET DTOs
// ============================================

/// Calorie/macro target request
#[derive(Debug, Deserialize)]
pub struct TargetsRequest {
    /// Validated biometrics
    pub profile: AthleteProfile,
    /// Tier name or numeric factor
    pub activity: ActivityLevel,
    /// Fixed or deadline goal
    pub goal: Goal,
    /// Reference date for deadline goals, defaults to today (UTC)
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

// ============================================
// WEIGHT LOG DTOs
// ============================================

/// One weigh-in as exposed over JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightEntryDto {
    pub date: NaiveDate,
    pub weight_kg: f64,
}

impl From<&WeightLogEntry> for WeightEntryDto {
    fn from(entry: &WeightLogEntry) -> Self {
        Self {
            date: entry.date,
            weight_kg: entry.weight_kg,
        }
    }
}

/// Record weight request
#[derive(Debug, Deserialize)]
pub struct RecordWeightRequest {
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Date of the weigh-in, defaults to today (UTC)
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Record weight response
#[derive(Debug, Serialize)]
pub struct RecordWeightResponse {
    /// Status: "ok"
    pub status: String,
    /// The stored entry
    pub entry: WeightEntryDto,
}

/// Weight history response
#[derive(Debug, Serialize)]
pub struct WeightHistoryResponse {
    /// "ok" or "unavailable"
    pub status: String,
    /// Entries in insertion order
    pub entries: Vec<WeightEntryDto>,
    /// Line chart series
    pub chart: ChartResponse,
    /// Summary, absent when there is no data
    pub trend: Option<WeightTrend>,
    /// Why the log could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&WeightHistory> for WeightHistoryResponse {
    fn from(history: &WeightHistory) -> Self {
        let entries = history.entries();

        Self {
            status: if history.is_available() { "ok" } else { "unavailable" }.to_string(),
            entries: entries.iter().map(WeightEntryDto::from).collect(),
            chart: ChartResponse::weight_series(entries),
            trend: history.trend(),
            reason: history.unavailable_reason().map(str::to_string),
        }
    }
}

/// Chart-formatted series
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    /// Labels for x-axis
    pub labels: Vec<String>,
    /// Data series
    pub datasets: Vec<ChartDataset>,
}

impl ChartResponse {
    /// Single "Weight" series keyed by date
    pub fn weight_series(entries: &[WeightLogEntry]) -> Self {
        Self {
            labels: entries.iter().map(|e| e.date.to_string()).collect(),
            datasets: vec![ChartDataset {
                label: "Weight".to_string(),
                data: entries.iter().map(|e| e.weight_kg).collect(),
                color: "#00ffcc".to_string(),
            }],
        }
    }
}

/// Single dataset for chart
#[derive(Debug, Serialize)]
pub struct ChartDataset {
    /// Dataset label
    pub label: String,
    /// Data values
    pub data: Vec<f64>,
    /// Suggested color
    pub color: String,
}

// ============================================
// WATER DTOs
// ============================================

/// Add water request
#[derive(Debug, Deserialize)]
pub struct AddWaterRequest {
    /// Glasses to add (default: 1)
    #[serde(default = "default_glasses")]
    pub glasses: u32,
}

fn default_glasses() -> u32 {
    1
}

/// Water counter response
#[derive(Debug, Serialize, Deserialize)]
pub struct WaterResponse {
    /// Glasses logged this session
    pub glasses: u32,
}

// ============================================
// PLAN DTOs
// ============================================

/// Meal plan response
#[derive(Debug, Serialize)]
pub struct MealPlanResponse {
    pub meals: Vec<Meal>,
}

/// Training plan query parameters
#[derive(Debug, Deserialize)]
pub struct TrainingParams {
    /// gym or home (default: gym)
    #[serde(default)]
    pub equipment: Option<String>,
}

/// Training plan response
#[derive(Debug, Serialize)]
pub struct TrainingPlanResponse {
    pub equipment: Equipment,
    pub days: Vec<TrainingDay>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Weight log status: ok, unavailable
    pub weight_log: String,
    /// Where the log lives
    pub weight_log_location: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
