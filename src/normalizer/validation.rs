//! Form input validation
//!
//! Checks every field of a raw submission and reports all violations at once
//! so the caller can flag each bad field in a single pass.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    ActivityLevel, Gender, HeightInput, RawInput, UnitSystem, ValidatedInput, WeightInput,
};

/// Message used when the selected unit system's measurements are missing
pub const UNIT_SYSTEM_MISMATCH: &str = "Please provide measurements in the selected unit system";

/// A single violated field constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Form field name (camelCase, as submitted)
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in a submission
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Invalid measurements: {}", join_violations(.0))]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Whether a given field was flagged
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    pub fn into_inner(self) -> Vec<FieldViolation> {
        self.0
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Field Constraints
// ============================================================================

/// Inclusive numeric bounds for one field
struct Bounds {
    field: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    too_low: &'static str,
    too_high: &'static str,
}

const AGE: Bounds = Bounds {
    field: "age",
    label: "Age",
    min: 18.0,
    max: 100.0,
    too_low: "Age must be at least 18",
    too_high: "Age must be less than 100",
};

const HEIGHT_CM: Bounds = Bounds {
    field: "heightCm",
    label: "Height",
    min: 100.0,
    max: 250.0,
    too_low: "Height must be at least 100cm",
    too_high: "Height must be less than 250cm",
};

const HEIGHT_FEET: Bounds = Bounds {
    field: "heightFeet",
    label: "Height",
    min: 3.0,
    max: 8.0,
    too_low: "Height must be at least 3ft",
    too_high: "Height must be less than 8ft",
};

const HEIGHT_INCHES: Bounds = Bounds {
    field: "heightInches",
    label: "Inches",
    min: 0.0,
    max: 11.0,
    too_low: "Inches must be between 0-11",
    too_high: "Inches must be between 0-11",
};

const WEIGHT_KG: Bounds = Bounds {
    field: "weightKg",
    label: "Weight",
    min: 30.0,
    max: 300.0,
    too_low: "Weight must be at least 30kg",
    too_high: "Weight must be less than 300kg",
};

const WEIGHT_LBS: Bounds = Bounds {
    field: "weightLbs",
    label: "Weight",
    min: 66.0,
    max: 660.0,
    too_low: "Weight must be at least 66lbs",
    too_high: "Weight must be less than 660lbs",
};

const BODY_FAT: Bounds = Bounds {
    field: "bodyFatPercentage",
    label: "Body fat",
    min: 3.0,
    max: 70.0,
    too_low: "Body fat must be at least 3%",
    too_high: "Body fat must be less than 70%",
};

impl Bounds {
    /// Check a present value, recording any violation
    fn check(&self, value: f64, violations: &mut Vec<FieldViolation>) -> Option<f64> {
        if !value.is_finite() {
            violations.push(FieldViolation::new(
                self.field,
                format!("{} must be a number", self.label),
            ));
            return None;
        }
        if value < self.min {
            violations.push(FieldViolation::new(self.field, self.too_low));
            return None;
        }
        if value > self.max {
            violations.push(FieldViolation::new(self.field, self.too_high));
            return None;
        }
        Some(value)
    }

    /// Check a field that must be present
    fn require(&self, value: Option<f64>, violations: &mut Vec<FieldViolation>) -> Option<f64> {
        match value {
            Some(v) => self.check(v, violations),
            None => {
                violations.push(FieldViolation::new(self.field, UNIT_SYSTEM_MISMATCH));
                None
            }
        }
    }
}

/// Flag a field that belongs to the other unit system
fn reject_foreign(
    field: &str,
    value: Option<f64>,
    unit_system: UnitSystem,
    violations: &mut Vec<FieldViolation>,
) {
    if value.is_some() {
        violations.push(FieldViolation::new(
            field,
            format!("{} cannot be used with {} units", field, unit_system.as_str()),
        ));
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate a raw submission
///
/// A missing unit system falls back to metric, the form's default. All
/// violations are collected; nothing is returned partially.
pub fn validate(raw: &RawInput) -> Result<ValidatedInput, ValidationErrors> {
    let mut violations = Vec::new();

    let unit_system = match raw.unit_system.as_deref() {
        None => Some(UnitSystem::Metric),
        Some(s) => {
            let parsed = UnitSystem::from_str(s);
            if parsed.is_none() {
                violations.push(FieldViolation::new(
                    "unitSystem",
                    format!("Invalid unit system: '{}'. Valid systems: metric, imperial", s),
                ));
            }
            parsed
        }
    };

    let age = match raw.age {
        None => {
            violations.push(FieldViolation::new("age", "Age is required"));
            None
        }
        Some(a) if a.is_finite() && a.fract() != 0.0 => {
            violations.push(FieldViolation::new("age", "Age must be a whole number"));
            None
        }
        Some(a) => AGE.check(a, &mut violations).map(|a| a as u32),
    };

    let gender = match raw.gender.as_deref() {
        None => {
            violations.push(FieldViolation::new("gender", "Gender is required"));
            None
        }
        Some(s) => {
            let parsed = Gender::from_str(s);
            if parsed.is_none() {
                violations.push(FieldViolation::new(
                    "gender",
                    format!("Invalid gender: '{}'. Valid values: male, female", s),
                ));
            }
            parsed
        }
    };

    let activity_level = match raw.activity_level.as_deref() {
        None => {
            violations.push(FieldViolation::new("activityLevel", "Activity level is required"));
            None
        }
        Some(s) => {
            let parsed = ActivityLevel::from_str(s);
            if parsed.is_none() {
                violations.push(FieldViolation::new(
                    "activityLevel",
                    format!(
                        "Invalid activity level: '{}'. Valid levels: sedentary, light, moderate, active, very_active",
                        s
                    ),
                ));
            }
            parsed
        }
    };

    // Height and weight only make sense once the unit system is known
    let (height, weight) = match unit_system {
        Some(UnitSystem::Metric) => {
            let height = HEIGHT_CM
                .require(raw.height_cm, &mut violations)
                .map(HeightInput::Centimeters);
            let weight = WEIGHT_KG
                .require(raw.weight_kg, &mut violations)
                .map(WeightInput::Kilograms);
            reject_foreign("heightFeet", raw.height_feet, UnitSystem::Metric, &mut violations);
            reject_foreign("heightInches", raw.height_inches, UnitSystem::Metric, &mut violations);
            reject_foreign("weightLbs", raw.weight_lbs, UnitSystem::Metric, &mut violations);
            (height, weight)
        }
        Some(UnitSystem::Imperial) => {
            let feet = HEIGHT_FEET.require(raw.height_feet, &mut violations);
            let inches = match raw.height_inches {
                Some(i) => HEIGHT_INCHES.check(i, &mut violations),
                None => Some(0.0),
            };
            let height = match (feet, inches) {
                (Some(feet), Some(inches)) => Some(HeightInput::FeetInches { feet, inches }),
                _ => None,
            };
            let weight = WEIGHT_LBS
                .require(raw.weight_lbs, &mut violations)
                .map(WeightInput::Pounds);
            reject_foreign("heightCm", raw.height_cm, UnitSystem::Imperial, &mut violations);
            reject_foreign("weightKg", raw.weight_kg, UnitSystem::Imperial, &mut violations);
            (height, weight)
        }
        None => (None, None),
    };

    let body_fat_percentage = raw
        .body_fat_percentage
        .and_then(|bf| BODY_FAT.check(bf, &mut violations));

    match (unit_system, age, gender, height, weight, activity_level) {
        (Some(unit_system), Some(age), Some(gender), Some(height), Some(weight), Some(activity_level))
            if violations.is_empty() =>
        {
            tracing::debug!(
                unit_system = unit_system.as_str(),
                age,
                "Measurements passed validation"
            );
            Ok(ValidatedInput {
                unit_system,
                age,
                gender,
                height,
                weight,
                activity_level,
                body_fat_percentage,
            })
        }
        _ => {
            tracing::debug!(count = violations.len(), "Measurements failed validation");
            Err(ValidationErrors(violations))
        }
    }
}
