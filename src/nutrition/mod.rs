//! Fuelplan Nutrition
//!
//! Calorie and macronutrient targets for athletes.
//!
//! # Architecture
//!
//! ```text
//! AthleteProfile + ActivityLevel + Goal
//!         │
//!         ▼
//!   NutritionCalculator ──► BMR ──► TDEE ──► goal adjustment ──► macro split
//!         │
//!         ▼
//!   TargetBreakdown { bmr, tdee, targets, warnings }
//! ```
//!
//! Inputs are validated when constructed; the calculator itself never fails.

pub mod calculator;
pub mod config;
pub mod error;
pub mod types;

pub use calculator::{bmr, days_remaining, tdee, NutritionCalculator};
pub use config::{CalorieOffsets, FatPolicy, NutritionConfig};
pub use error::{NutritionError, NutritionResult};
pub use types::{
    ActivityLevel, AthleteProfile, Goal, MacroTargets, Sex, TargetBreakdown, TargetWarning,
};
