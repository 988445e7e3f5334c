//! Nutrition Target Calculator
//!
//! Mifflin-St Jeor BMR, scaled by an activity multiplier to TDEE, then
//! adjusted for the goal and split into protein, fat, and carbohydrate.
//!
//! ```text
//! BMR  = 10*kg + 6.25*cm - 5*age + (5 male | -161 female)
//! TDEE = BMR * activity factor
//! ```
//!
//! Fixed goals add a configured offset to TDEE. Deadline goals spread the
//! energy content of the weight difference over the days remaining.
//! Protein is grams per kilogram, fat follows the configured [`FatPolicy`],
//! and carbohydrate takes whatever calories are left.

use crate::nutrition::config::{FatPolicy, NutritionConfig};
use crate::nutrition::error::NutritionResult;
use crate::nutrition::types::{
    ActivityLevel, AthleteProfile, Goal, MacroTargets, Sex, TargetBreakdown, TargetWarning,
};
use chrono::NaiveDate;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor)
pub fn bmr(profile: &AthleteProfile) -> f64 {
    let sex_constant = match profile.sex() {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };

    10.0 * profile.weight_kg() + 6.25 * profile.height_cm() - 5.0 * f64::from(profile.age_years())
        + sex_constant
}

/// Total daily energy expenditure in kcal/day
pub fn tdee(profile: &AthleteProfile, activity: ActivityLevel) -> f64 {
    bmr(profile) * activity.factor()
}

/// Whole days until the deadline, never less than one
pub fn days_remaining(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days().max(1)
}

/// Computes calorie and macro targets from a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct NutritionCalculator {
    config: NutritionConfig,
}

impl NutritionCalculator {
    /// Create a calculator, rejecting unusable constants
    pub fn new(config: NutritionConfig) -> NutritionResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Daily kcal added to TDEE for the goal
    fn goal_adjustment(
        &self,
        profile: &AthleteProfile,
        goal: &Goal,
        today: NaiveDate,
        warnings: &mut Vec<TargetWarning>,
    ) -> f64 {
        let offsets = &self.config.calorie_offsets;
        match *goal {
            Goal::FatLoss => offsets.fat_loss,
            Goal::Maintenance => offsets.maintenance,
            Goal::MuscleGain => offsets.muscle_gain,
            Goal::Deadline {
                target_weight_kg,
                deadline,
            } => {
                let raw_days = (deadline - today).num_days();
                if raw_days < 1 {
                    warnings.push(TargetWarning::DeadlineClamped {
                        days_remaining: raw_days,
                    });
                }
                let days = days_remaining(deadline, today) as f64;
                let daily_deficit = (profile.weight_kg() - target_weight_kg)
                    * self.config.kcal_per_kg_body_fat
                    / days;
                -daily_deficit
            }
        }
    }

    /// Unrounded daily calorie target for the goal
    pub fn calorie_target(
        &self,
        profile: &AthleteProfile,
        activity: ActivityLevel,
        goal: &Goal,
        today: NaiveDate,
    ) -> (f64, Vec<TargetWarning>) {
        let mut warnings = Vec::new();
        let adjustment = self.goal_adjustment(profile, goal, today, &mut warnings);
        (tdee(profile, activity) + adjustment, warnings)
    }

    /// Split a calorie target into rounded macro grams
    ///
    /// Calories are clamped at zero and rounded first; fat and carbohydrate
    /// are derived from the rounded figure. Carbohydrate is clamped at zero
    /// when protein and fat already use up the target.
    pub fn macro_split(&self, target_kcal: f64, weight_kg: f64) -> (MacroTargets, Vec<TargetWarning>) {
        let mut warnings = Vec::new();

        let calories = if target_kcal < 0.0 {
            warnings.push(TargetWarning::CaloriesClamped {
                requested_kcal: target_kcal,
            });
            0.0
        } else {
            target_kcal.round()
        };

        let protein_g = (weight_kg * self.config.protein_per_kg).round();

        let fat_g = match self.config.fat_policy {
            FatPolicy::PerKg { grams_per_kg } => (weight_kg * grams_per_kg).round(),
            FatPolicy::CalorieFraction { fraction } => (calories * fraction / KCAL_PER_G_FAT).round(),
        };

        let remainder = calories - protein_g * KCAL_PER_G_PROTEIN - fat_g * KCAL_PER_G_FAT;
        let carbs_g = if remainder < 0.0 {
            warnings.push(TargetWarning::CarbsClamped {
                shortfall_kcal: -remainder,
            });
            0.0
        } else {
            (remainder / KCAL_PER_G_CARB).round()
        };

        (
            MacroTargets {
                calories: calories as u32,
                protein_g: protein_g as u32,
                carbs_g: carbs_g as u32,
                fat_g: fat_g as u32,
            },
            warnings,
        )
    }

    /// Compute the full breakdown for a validated profile
    pub fn calculate(
        &self,
        profile: &AthleteProfile,
        activity: ActivityLevel,
        goal: &Goal,
        today: NaiveDate,
    ) -> TargetBreakdown {
        let bmr = bmr(profile);
        let tdee = bmr * activity.factor();

        let mut warnings = Vec::new();
        let adjustment = self.goal_adjustment(profile, goal, today, &mut warnings);
        let (targets, split_warnings) = self.macro_split(tdee + adjustment, profile.weight_kg());
        warnings.extend(split_warnings);

        for warning in &warnings {
            tracing::warn!(goal = %goal, activity = %activity, "Target adjusted: {}", warning);
        }

        tracing::debug!(
            bmr,
            tdee,
            calories = targets.calories,
            protein_g = targets.protein_g,
            carbs_g = targets.carbs_g,
            fat_g = targets.fat_g,
            "Computed nutrition targets"
        );

        TargetBreakdown {
            bmr,
            tdee,
            daily_adjustment_kcal: adjustment,
            targets,
            warnings,
        }
    }
}
