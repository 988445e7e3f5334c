//! Nutrition error types
//!
//! Input validation failures for the calculator boundary.

use thiserror::Error;

/// Errors raised while validating calculator inputs or configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NutritionError {
    /// Body weight was not a number or outside (0, 500] kg
    #[error("Invalid weight: {0} kg (must be above 0 and at most 500)")]
    InvalidWeight(f64),

    /// Height was not a number or outside (0, 300] cm
    #[error("Invalid height: {0} cm (must be above 0 and at most 300)")]
    InvalidHeight(f64),

    /// Age was zero or above 130
    #[error("Invalid age: {0} years (must be between 1 and 130)")]
    InvalidAge(u32),

    /// Deadline goal weight was not a number or outside (0, 500] kg
    #[error("Invalid target weight: {0} kg (must be above 0 and at most 500)")]
    InvalidTargetWeight(f64),

    /// Numeric activity multiplier outside the supported set
    #[error("Unsupported activity factor: {0} (expected one of 1.2, 1.375, 1.55, 1.725, 1.9)")]
    UnsupportedActivityFactor(f64),

    /// Unrecognized activity tier name
    #[error("Unknown activity level: {0}")]
    UnknownActivityLevel(String),

    /// Unrecognized goal name
    #[error("Unknown goal: {0}")]
    UnknownGoal(String),

    /// Unrecognized sex value
    #[error("Unknown sex: {0} (expected male or female)")]
    UnknownSex(String),

    /// Calculator configuration out of range
    #[error("Invalid nutrition config: {0}")]
    InvalidConfig(String),
}

/// Result type alias for nutrition validation
pub type NutritionResult<T> = Result<T, NutritionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NutritionError::InvalidAge(0);
        assert_eq!(err.to_string(), "Invalid age: 0 years (must be between 1 and 130)");

        let err = NutritionError::UnknownGoal("bulk".to_string());
        assert_eq!(err.to_string(), "Unknown goal: bulk");
    }
}
