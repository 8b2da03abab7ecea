//! Body composition estimates
//!
//! BMI and its category, height-based ideal weight, and the FFMI ceiling on
//! attainable muscular body weight.

use crate::models::{BmiClass, Gender, IdealWeightEstimate, WeightRange};
use crate::normalizer::{cm_to_inches, round_to_i64, round_to_tenth};

// ============================================================================
// BMI
// ============================================================================

/// Half-open BMI ranges, checked in order
const BMI_RANGES: [(f64, f64, BmiClass); 4] = [
    (0.0, 18.5, BmiClass::Underweight),
    (18.5, 25.0, BmiClass::NormalWeight),
    (25.0, 30.0, BmiClass::Overweight),
    (30.0, f64::INFINITY, BmiClass::Obese),
];

/// Body mass index rounded to one decimal
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_to_tenth(weight_kg / (height_m * height_m))
}

/// Classify a BMI value
///
/// The ranges cover everything from zero upward. A value outside them (NaN or
/// negative) means an upstream defect; it is logged and reported as
/// Normal Weight.
pub fn classify_bmi(bmi: f64) -> BmiClass {
    BMI_RANGES
        .iter()
        .find(|(low, high, _)| bmi >= *low && bmi < *high)
        .map(|(_, _, class)| *class)
        .unwrap_or_else(|| {
            tracing::error!(bmi, "BMI matched no classification range");
            BmiClass::NormalWeight
        })
}

// ============================================================================
// Ideal Weight
// ============================================================================

/// Linear ideal-weight equation: base + slope x (inches over 5 feet)
#[derive(Debug, Clone, Copy)]
pub struct IdealWeightFormula {
    pub name: &'static str,
    pub male: (f64, f64),
    pub female: (f64, f64),
}

impl IdealWeightFormula {
    /// Estimate in kg, unrounded
    pub fn estimate(&self, height_inches: f64, gender: Gender) -> f64 {
        let (base, slope) = match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        };
        base + slope * (height_inches - 60.0)
    }
}

/// Hamwi, Devine, Robinson and Miller, in display order
pub const IDEAL_WEIGHT_FORMULAS: [IdealWeightFormula; 4] = [
    IdealWeightFormula {
        name: "G.J. Hamwi Formula (1964)",
        male: (48.0, 2.7),
        female: (45.5, 2.2),
    },
    IdealWeightFormula {
        name: "B.J. Devine Formula (1974)",
        male: (50.0, 2.3),
        female: (45.5, 2.3),
    },
    IdealWeightFormula {
        name: "J.D. Robinson Formula (1983)",
        male: (52.0, 1.9),
        female: (49.0, 1.7),
    },
    IdealWeightFormula {
        name: "D.R. Miller Formula (1983)",
        male: (56.2, 1.41),
        female: (53.1, 1.36),
    },
];

/// Rounded estimate from every ideal-weight formula
pub fn ideal_weights(height_cm: f64, gender: Gender) -> Vec<IdealWeightEstimate> {
    let height_inches = cm_to_inches(height_cm);
    IDEAL_WEIGHT_FORMULAS
        .iter()
        .map(|formula| IdealWeightEstimate {
            name: formula.name.to_string(),
            value: round_to_i64(formula.estimate(height_inches, gender)),
        })
        .collect()
}

/// Min and max over already-rounded estimates
pub fn ideal_weight_range(estimates: &[IdealWeightEstimate]) -> WeightRange {
    let min = estimates.iter().map(|e| e.value).min().unwrap_or(0);
    let max = estimates.iter().map(|e| e.value).max().unwrap_or(0);
    WeightRange { min, max }
}

// ============================================================================
// Muscular Potential
// ============================================================================

/// Natural FFMI ceiling for men
pub const FFMI_MALE: f64 = 25.0;
/// Natural FFMI ceiling for women
pub const FFMI_FEMALE: f64 = 22.0;
/// Body fat allowance added on top of the lean mass ceiling
///
/// Applied to both sexes. The result text quotes 18-20% body fat for women,
/// which would be a 1.18-1.20 factor; the calculation keeps the flat 10%.
pub const BODY_FAT_ALLOWANCE: f64 = 1.10;

/// Maximum muscular body weight in kg
pub fn muscular_potential(height_cm: f64, gender: Gender) -> i64 {
    let ffmi = match gender {
        Gender::Male => FFMI_MALE,
        Gender::Female => FFMI_FEMALE,
    };
    let height_m = height_cm / 100.0;
    let max_lean_mass = ffmi * height_m * height_m;
    round_to_i64(max_lean_mass * BODY_FAT_ALLOWANCE)
}
