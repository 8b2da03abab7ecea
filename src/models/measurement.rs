//! Measurement models
//!
//! The untrusted form record, its validated form, and the canonical metric
//! record the calculator consumes.

use serde::{Deserialize, Serialize};

/// Unit system the user entered measurements in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Centimeters and kilograms
    Metric,
    /// Feet/inches and pounds
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Some(UnitSystem::Metric),
            "imperial" => Some(UnitSystem::Imperial),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "Metric (cm/kg)",
            UnitSystem::Imperial => "Imperial (ft/lbs)",
        }
    }
}

/// Gender for the sex-specific formulas
///
/// Mifflin-St Jeor, the ideal-weight equations and the FFMI ceilings are only
/// published with male and female coefficient sets, so there is no third
/// variant to map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Activity level for the TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Every level, least to most active
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" => Some(ActivityLevel::Light),
            "moderate" => Some(ActivityLevel::Moderate),
            "active" => Some(ActivityLevel::Active),
            "very_active" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Light Exercise",
            ActivityLevel::Moderate => "Moderate Exercise",
            ActivityLevel::Active => "Heavy Exercise",
            ActivityLevel::VeryActive => "Athlete",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "1-3 days/week",
            ActivityLevel::Moderate => "3-5 days/week",
            ActivityLevel::Active => "6-7 days/week",
            ActivityLevel::VeryActive => "2x training per day",
        }
    }

    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Raw calculator form submission
///
/// Everything is optional and enum-valued fields stay strings, so a bad value
/// in one field is reported together with every other problem instead of
/// failing deserialization outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    pub unit_system: Option<String>,
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub height_feet: Option<f64>,
    pub height_inches: Option<f64>,
    pub weight_kg: Option<f64>,
    pub weight_lbs: Option<f64>,
    pub activity_level: Option<String>,
    pub body_fat_percentage: Option<f64>,
}

/// Height as entered, in the selected unit system
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightInput {
    Centimeters(f64),
    FeetInches { feet: f64, inches: f64 },
}

/// Weight as entered, in the selected unit system
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightInput {
    Kilograms(f64),
    Pounds(f64),
}

/// A form submission that passed every field constraint
///
/// Only `normalizer::validate` builds one, so holding a value is proof the
/// checks ran.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub(crate) unit_system: UnitSystem,
    pub(crate) age: u32,
    pub(crate) gender: Gender,
    pub(crate) height: HeightInput,
    pub(crate) weight: WeightInput,
    pub(crate) activity_level: ActivityLevel,
    pub(crate) body_fat_percentage: Option<f64>,
}

impl ValidatedInput {
    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn height(&self) -> HeightInput {
        self.height
    }

    pub fn weight(&self) -> WeightInput {
        self.weight
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    pub fn body_fat_percentage(&self) -> Option<f64> {
        self.body_fat_percentage
    }
}

/// Canonical metric measurement record
///
/// `height_cm`/`weight_kg` are what the formulas read. The imperial fields
/// are kept verbatim from the form for display and are never recomputed
/// from the metric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalMeasurement {
    pub unit_system: UnitSystem,
    #[serde(rename = "age")]
    pub age_years: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_feet: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_inches: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_lbs: Option<f64>,
}

impl CanonicalMeasurement {
    /// Height in meters
    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }
}
