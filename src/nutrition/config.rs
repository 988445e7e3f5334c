//! Calculator configuration
//!
//! The single canonical set of constants behind the macro split: protein
//! per kilogram, how fat is derived, and the kcal offset for each fixed goal.

use crate::nutrition::error::{NutritionError, NutritionResult};
use serde::{Deserialize, Serialize};

/// Largest per-kg protein or fat allowance accepted
const MAX_GRAMS_PER_KG: f64 = 10.0;
/// Largest absolute goal offset accepted (kcal/day)
const MAX_OFFSET_KCAL: f64 = 10_000.0;
/// Largest energy density accepted for one kg of body fat
const MAX_KCAL_PER_KG: f64 = 20_000.0;

/// How the daily fat target is derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum FatPolicy {
    /// Fixed grams per kilogram of body weight
    PerKg { grams_per_kg: f64 },
    /// Share of the calorie target, converted at 9 kcal/g
    CalorieFraction { fraction: f64 },
}

impl Default for FatPolicy {
    fn default() -> Self {
        FatPolicy::CalorieFraction { fraction: 0.25 }
    }
}

/// Daily kcal added to TDEE for each fixed-offset goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieOffsets {
    #[serde(default = "default_fat_loss_offset")]
    pub fat_loss: f64,
    #[serde(default)]
    pub maintenance: f64,
    #[serde(default = "default_muscle_gain_offset")]
    pub muscle_gain: f64,
}

fn default_fat_loss_offset() -> f64 {
    -500.0
}

fn default_muscle_gain_offset() -> f64 {
    300.0
}

impl Default for CalorieOffsets {
    fn default() -> Self {
        Self {
            fat_loss: default_fat_loss_offset(),
            maintenance: 0.0,
            muscle_gain: default_muscle_gain_offset(),
        }
    }
}

/// Nutrition calculator configuration (`[nutrition]` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionConfig {
    #[serde(default = "default_protein_per_kg")]
    pub protein_per_kg: f64,

    #[serde(default)]
    pub fat_policy: FatPolicy,

    #[serde(default)]
    pub calorie_offsets: CalorieOffsets,

    #[serde(default = "default_kcal_per_kg_body_fat")]
    pub kcal_per_kg_body_fat: f64,
}

fn default_protein_per_kg() -> f64 {
    2.2
}

/// Energy stored in one kilogram of body fat
fn default_kcal_per_kg_body_fat() -> f64 {
    7700.0
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            protein_per_kg: default_protein_per_kg(),
            fat_policy: FatPolicy::default(),
            calorie_offsets: CalorieOffsets::default(),
            kcal_per_kg_body_fat: default_kcal_per_kg_body_fat(),
        }
    }
}

impl NutritionConfig {
    /// Builder: set protein grams per kilogram
    pub fn protein_per_kg(mut self, grams: f64) -> Self {
        self.protein_per_kg = grams;
        self
    }

    /// Builder: set the fat derivation
    pub fn fat_policy(mut self, policy: FatPolicy) -> Self {
        self.fat_policy = policy;
        self
    }

    /// Builder: set goal offsets
    pub fn calorie_offsets(mut self, offsets: CalorieOffsets) -> Self {
        self.calorie_offsets = offsets;
        self
    }

    /// Check every constant is usable
    pub fn validate(&self) -> NutritionResult<()> {
        if !self.protein_per_kg.is_finite()
            || self.protein_per_kg <= 0.0
            || self.protein_per_kg > MAX_GRAMS_PER_KG
        {
            return Err(NutritionError::InvalidConfig(format!(
                "protein_per_kg must be in (0, {MAX_GRAMS_PER_KG}], got {}",
                self.protein_per_kg
            )));
        }

        match self.fat_policy {
            FatPolicy::PerKg { grams_per_kg } => {
                if !grams_per_kg.is_finite() || grams_per_kg <= 0.0 || grams_per_kg > MAX_GRAMS_PER_KG {
                    return Err(NutritionError::InvalidConfig(format!(
                        "fat grams_per_kg must be in (0, {MAX_GRAMS_PER_KG}], got {grams_per_kg}"
                    )));
                }
            }
            FatPolicy::CalorieFraction { fraction } => {
                if !(fraction > 0.0 && fraction < 1.0) {
                    return Err(NutritionError::InvalidConfig(format!(
                        "fat fraction must be between 0 and 1, got {fraction}"
                    )));
                }
            }
        }

        let offsets = &self.calorie_offsets;
        if ![offsets.fat_loss, offsets.maintenance, offsets.muscle_gain]
            .iter()
            .all(|v| v.is_finite() && v.abs() <= MAX_OFFSET_KCAL)
        {
            return Err(NutritionError::InvalidConfig(format!(
                "calorie offsets must be within +/-{MAX_OFFSET_KCAL} kcal"
            )));
        }

        if !self.kcal_per_kg_body_fat.is_finite()
            || self.kcal_per_kg_body_fat <= 0.0
            || self.kcal_per_kg_body_fat > MAX_KCAL_PER_KG
        {
            return Err(NutritionError::InvalidConfig(format!(
                "kcal_per_kg_body_fat must be in (0, {MAX_KCAL_PER_KG}], got {}",
                self.kcal_per_kg_body_fat
            )));
        }

        Ok(())
    }
}
