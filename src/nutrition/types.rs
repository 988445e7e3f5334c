//! Core nutrition data types
//!
//! Defines the athlete profile, activity tiers, goals, and the computed
//! macro targets. Everything that crosses the calculator boundary is
//! validated on construction, including when deserialized.

use crate::nutrition::error::{NutritionError, NutritionResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Biological sex, selects the Mifflin-St Jeor constant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[serde(alias = "Male")]
    Male,
    #[serde(alias = "Female")]
    Female,
}

impl FromStr for Sex {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(NutritionError::UnknownSex(other.to_string())),
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

/// Validated biometric inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProfile")]
pub struct AthleteProfile {
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: Sex,
}

/// Unvalidated wire form of [`AthleteProfile`]
#[derive(Deserialize)]
struct RawProfile {
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: Sex,
}

impl TryFrom<RawProfile> for AthleteProfile {
    type Error = NutritionError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        Self::new(raw.weight_kg, raw.height_cm, raw.age_years, raw.sex)
    }
}

/// Heaviest body or target weight accepted (kg)
pub const MAX_WEIGHT_KG: f64 = 500.0;
/// Tallest height accepted (cm)
pub const MAX_HEIGHT_CM: f64 = 300.0;
/// Oldest age accepted (years)
pub const MAX_AGE_YEARS: u32 = 130;

fn weight_in_range(kg: f64) -> bool {
    kg.is_finite() && kg > 0.0 && kg <= MAX_WEIGHT_KG
}

impl AthleteProfile {
    /// Create a profile, rejecting measurements outside human range
    pub fn new(weight_kg: f64, height_cm: f64, age_years: u32, sex: Sex) -> NutritionResult<Self> {
        if !weight_in_range(weight_kg) {
            return Err(NutritionError::InvalidWeight(weight_kg));
        }
        if !height_cm.is_finite() || height_cm <= 0.0 || height_cm > MAX_HEIGHT_CM {
            return Err(NutritionError::InvalidHeight(height_cm));
        }
        if age_years == 0 || age_years > MAX_AGE_YEARS {
            return Err(NutritionError::InvalidAge(age_years));
        }

        Ok(Self {
            weight_kg,
            height_cm,
            age_years,
            sex,
        })
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn age_years(&self) -> u32 {
        self.age_years
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }
}

/// Activity multiplier tier applied to BMR
///
/// Deserializes from either a tier name (`"moderate"`) or one of the
/// supported numeric factors (`1.55`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "ActivityRepr")]
pub enum ActivityLevel {
    /// Little or no exercise (1.2)
    Sedentary,
    /// Light training 1-3 days/week (1.375)
    Light,
    /// Moderate training 3-5 days/week (1.55)
    Moderate,
    /// Hard training 6-7 days/week (1.725)
    Active,
    /// Twice-daily or physical job plus training (1.9)
    Extreme,
}

const FACTOR_TOLERANCE: f64 = 1e-9;

impl ActivityLevel {
    /// All tiers, lowest to highest
    pub fn all() -> &'static [ActivityLevel] {
        &[
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::Extreme,
        ]
    }

    /// TDEE multiplier for this tier
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::Extreme => 1.9,
        }
    }

    /// Map a numeric multiplier back to its tier
    pub fn from_factor(factor: f64) -> NutritionResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|level| (level.factor() - factor).abs() < FACTOR_TOLERANCE)
            .ok_or(NutritionError::UnsupportedActivityFactor(factor))
    }
}

impl FromStr for ActivityLevel {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" | "lightly_active" => Ok(ActivityLevel::Light),
            "moderate" | "moderately_active" => Ok(ActivityLevel::Moderate),
            "active" | "very_active" => Ok(ActivityLevel::Active),
            "extreme" | "extra_active" => Ok(ActivityLevel::Extreme),
            other => match other.parse::<f64>() {
                Ok(factor) => Self::from_factor(factor),
                Err(_) => Err(NutritionError::UnknownActivityLevel(s.trim().to_string())),
            },
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityLevel::Sedentary => write!(f, "sedentary"),
            ActivityLevel::Light => write!(f, "light"),
            ActivityLevel::Moderate => write!(f, "moderate"),
            ActivityLevel::Active => write!(f, "active"),
            ActivityLevel::Extreme => write!(f, "extreme"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ActivityRepr {
    Factor(f64),
    Name(String),
}

impl TryFrom<ActivityRepr> for ActivityLevel {
    type Error = NutritionError;

    fn try_from(repr: ActivityRepr) -> Result<Self, Self::Error> {
        match repr {
            ActivityRepr::Factor(factor) => Self::from_factor(factor),
            ActivityRepr::Name(name) => name.parse(),
        }
    }
}

/// What the athlete is working towards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", try_from = "GoalRepr")]
pub enum Goal {
    /// Fixed daily deficit
    FatLoss,
    /// Eat at TDEE
    Maintenance,
    /// Fixed daily surplus
    MuscleGain,
    /// Reach a target weight by a date
    Deadline {
        target_weight_kg: f64,
        deadline: NaiveDate,
    },
}

impl Goal {
    /// Build a validated deadline goal
    pub fn deadline(target_weight_kg: f64, deadline: NaiveDate) -> NutritionResult<Self> {
        if !weight_in_range(target_weight_kg) {
            return Err(NutritionError::InvalidTargetWeight(target_weight_kg));
        }
        Ok(Goal::Deadline {
            target_weight_kg,
            deadline,
        })
    }

    /// Whether this goal uses a fixed calorie offset
    pub fn is_fixed_offset(&self) -> bool {
        !matches!(self, Goal::Deadline { .. })
    }
}

impl FromStr for Goal {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "fat_loss" | "cut" => Ok(Goal::FatLoss),
            "maintenance" | "maintain" => Ok(Goal::Maintenance),
            "muscle_gain" | "bulk" => Ok(Goal::MuscleGain),
            _ => Err(NutritionError::UnknownGoal(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Goal::FatLoss => write!(f, "fat loss"),
            Goal::Maintenance => write!(f, "maintenance"),
            Goal::MuscleGain => write!(f, "muscle gain"),
            Goal::Deadline {
                target_weight_kg,
                deadline,
            } => write!(f, "{target_weight_kg} kg by {deadline}"),
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum GoalRepr {
    FatLoss,
    Maintenance,
    MuscleGain,
    Deadline {
        target_weight_kg: f64,
        deadline: NaiveDate,
    },
}

impl TryFrom<GoalRepr> for Goal {
    type Error = NutritionError;

    fn try_from(repr: GoalRepr) -> Result<Self, Self::Error> {
        match repr {
            GoalRepr::FatLoss => Ok(Goal::FatLoss),
            GoalRepr::Maintenance => Ok(Goal::Maintenance),
            GoalRepr::MuscleGain => Ok(Goal::MuscleGain),
            GoalRepr::Deadline {
                target_weight_kg,
                deadline,
            } => Goal::deadline(target_weight_kg, deadline),
        }
    }
}

/// Daily calorie and macronutrient targets, rounded for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Daily calories (kcal)
    pub calories: u32,
    /// Protein (grams)
    pub protein_g: u32,
    /// Carbohydrate (grams)
    pub carbs_g: u32,
    /// Fat (grams)
    pub fat_g: u32,
}

impl MacroTargets {
    /// Calories implied by the gram amounts (4/4/9 kcal per gram)
    pub fn implied_calories(&self) -> u64 {
        u64::from(self.protein_g) * 4 + u64::from(self.carbs_g) * 4 + u64::from(self.fat_g) * 9
    }
}

/// Non-fatal adjustments made while computing targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetWarning {
    /// Protein and fat alone exceeded the calorie target; carbs set to zero
    CarbsClamped { shortfall_kcal: f64 },
    /// Goal adjustment pushed the target below zero; calories set to zero
    CaloriesClamped { requested_kcal: f64 },
    /// Deadline is today or already passed; one day assumed
    DeadlineClamped { days_remaining: i64 },
}

impl std::fmt::Display for TargetWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetWarning::CarbsClamped { shortfall_kcal } => write!(
                f,
                "protein and fat exceed the calorie target by {shortfall_kcal:.0} kcal; carbs set to 0"
            ),
            TargetWarning::CaloriesClamped { requested_kcal } => write!(
                f,
                "calorie target of {requested_kcal:.0} kcal is below zero; clamped to 0"
            ),
            TargetWarning::DeadlineClamped { days_remaining } => write!(
                f,
                "deadline is {days_remaining} day(s) away; computed as 1 day remaining"
            ),
        }
    }
}

/// Full calculator output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetBreakdown {
    /// Basal metabolic rate (kcal/day, unrounded)
    pub bmr: f64,
    /// Total daily energy expenditure (kcal/day, unrounded)
    pub tdee: f64,
    /// Adjustment applied to TDEE for the goal (kcal/day)
    pub daily_adjustment_kcal: f64,
    /// Rounded targets
    pub targets: MacroTargets,
    /// Clamps applied along the way
    #[serde(default)]
    pub warnings: Vec<TargetWarning>,
}
