//! Conversion of validated input into the canonical metric record

use super::units::{feet_inches_to_cm, lbs_to_kg};
use crate::models::{CanonicalMeasurement, HeightInput, ValidatedInput, WeightInput};

/// Normalize a validated submission to centimeters and kilograms
///
/// Imperial height and weight are converted and rounded to whole units.
/// Metric values pass through untouched. The values as entered are kept on
/// the record for display.
pub fn normalize(input: &ValidatedInput) -> CanonicalMeasurement {
    let (height_cm, height_feet, height_inches) = match input.height() {
        HeightInput::Centimeters(cm) => (cm, None, None),
        HeightInput::FeetInches { feet, inches } => {
            (feet_inches_to_cm(feet, inches), Some(feet), Some(inches))
        }
    };

    let (weight_kg, weight_lbs) = match input.weight() {
        WeightInput::Kilograms(kg) => (kg, None),
        WeightInput::Pounds(lbs) => (lbs_to_kg(lbs), Some(lbs)),
    };

    tracing::debug!(
        unit_system = input.unit_system().as_str(),
        height_cm,
        weight_kg,
        "Normalized measurements"
    );

    CanonicalMeasurement {
        unit_system: input.unit_system(),
        age_years: input.age(),
        gender: input.gender(),
        height_cm,
        weight_kg,
        activity_level: input.activity_level(),
        body_fat_percentage: input.body_fat_percentage(),
        height_feet,
        height_inches,
        weight_lbs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender, RawInput, UnitSystem};
    use crate::normalizer::validate;

    fn raw_metric() -> RawInput {
        RawInput {
            unit_system: Some("metric".to_string()),
            age: Some(30.0),
            gender: Some("male".to_string()),
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            activity_level: Some("moderate".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_metric_passes_through() {
        let m = normalize(&validate(&raw_metric()).unwrap());
        assert_eq!(m.unit_system, UnitSystem::Metric);
        assert_eq!(m.age_years, 30);
        assert_eq!(m.gender, Gender::Male);
        assert_eq!(m.height_cm, 180.0);
        assert_eq!(m.weight_kg, 80.0);
        assert_eq!(m.activity_level, ActivityLevel::Moderate);
        assert_eq!(m.height_feet, None);
        assert_eq!(m.weight_lbs, None);
    }

    #[test]
    fn test_metric_normalization_is_idempotent() {
        let first = normalize(&validate(&raw_metric()).unwrap());
        let again = RawInput {
            unit_system: Some(first.unit_system.as_str().to_string()),
            age: Some(first.age_years as f64),
            gender: Some(first.gender.as_str().to_string()),
            height_cm: Some(first.height_cm),
            weight_kg: Some(first.weight_kg),
            activity_level: Some(first.activity_level.as_str().to_string()),
            body_fat_percentage: first.body_fat_percentage,
            ..Default::default()
        };
        assert_eq!(normalize(&validate(&again).unwrap()), first);
    }

    #[test]
    fn test_imperial_converts_and_keeps_originals() {
        let raw = RawInput {
            unit_system: Some("imperial".to_string()),
            age: Some(30.0),
            gender: Some("male".to_string()),
            height_feet: Some(5.0),
            height_inches: Some(11.0),
            weight_lbs: Some(176.0),
            activity_level: Some("moderate".to_string()),
            ..Default::default()
        };
        let m = normalize(&validate(&raw).unwrap());
        assert_eq!(m.unit_system, UnitSystem::Imperial);
        assert_eq!(m.height_cm, 180.0);
        assert_eq!(m.weight_kg, 80.0);
        assert_eq!(m.height_feet, Some(5.0));
        assert_eq!(m.height_inches, Some(11.0));
        assert_eq!(m.weight_lbs, Some(176.0));
    }

    #[test]
    fn test_body_fat_carried_over() {
        let mut raw = raw_metric();
        raw.body_fat_percentage = Some(18.5);
        let m = normalize(&validate(&raw).unwrap());
        assert_eq!(m.body_fat_percentage, Some(18.5));
    }
}
