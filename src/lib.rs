//! # Fuelplan
//!
//! Nutrition targets and weight tracking for a single athlete, served over a
//! small REST API and a local CLI.
//!
//! ## Features
//!
//! - **Targets**: Mifflin-St Jeor BMR, activity-scaled TDEE, goal offsets or
//!   deadline-driven deficits, and a protein/fat/carb split
//! - **Weight log**: append-only CSV history with a chart-ready series
//! - **Plans**: fixed daily meal plan and a gym or home training week
//!
//! ## Modules
//!
//! - [`nutrition`]: Pure target calculator
//! - [`storage`]: Weight log backends
//! - [`session`]: Per-athlete state (log handle, water counter)
//! - [`plans`]: Static meal and training tables
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fuelplan::nutrition::*;
//! use chrono::Utc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let profile = AthleteProfile::new(80.0, 180.0, 24, Sex::Male)?;
//!     let calculator = NutritionCalculator::default();
//!
//!     let breakdown = calculator.calculate(
//!         &profile,
//!         ActivityLevel::Moderate,
//!         &Goal::FatLoss,
//!         Utc::now().date_naive(),
//!     );
//!
//!     println!("{} kcal/day", breakdown.targets.calories);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod nutrition;
pub mod plans;
pub mod session;
pub mod storage;

// Re-export top-level types for convenience
pub use nutrition::{
    ActivityLevel, AthleteProfile, Goal, MacroTargets, NutritionCalculator, NutritionConfig,
    NutritionError, Sex, TargetBreakdown, TargetWarning,
};

pub use storage::{
    CsvWeightLog, MemoryWeightLog, StorageBackend, StorageConfig, StorageError, StorageResult,
    WeightHistory, WeightLog, WeightLogEntry,
};

pub use session::Session;

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
