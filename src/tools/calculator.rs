//! Calculator MCP Tools
//!
//! Validation, normalization and the full results pipeline over form input
//! or a results link.

use serde::Serialize;

use crate::metrics;
use crate::models::{CalorieGoal, CanonicalMeasurement, MacroPlans, RawInput, ResultsRecord};
use crate::normalizer::{self, FieldViolation};
use crate::transport;

/// Response for validate_measurements
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: Vec<FieldViolation>,
}

/// Response for normalize_measurements
#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement: Option<CanonicalMeasurement>,
    pub errors: Vec<FieldViolation>,
}

/// Calories and macros for one goal
#[derive(Debug, Serialize)]
pub struct GoalTarget {
    pub goal: CalorieGoal,
    pub label: &'static str,
    pub calories: i64,
    pub macros: MacroPlans,
}

/// Response for calculate_metrics and calculate_from_link
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub success: bool,
    pub errors: Vec<FieldViolation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement: Option<CanonicalMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultsRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<GoalTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_link: Option<String>,
}

impl CalculateResponse {
    fn rejected(errors: Vec<FieldViolation>) -> Self {
        Self {
            success: false,
            errors,
            measurement: None,
            results: None,
            goals: Vec::new(),
            results_link: None,
        }
    }
}

/// Check a form submission and report every violation
pub fn validate_measurements(raw: &RawInput) -> ValidateResponse {
    match normalizer::validate(raw) {
        Ok(_) => ValidateResponse {
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => {
            tracing::warn!(violations = e.violations().len(), "Measurements failed validation");
            ValidateResponse {
                valid: false,
                errors: e.into_inner(),
            }
        }
    }
}

/// Validate and convert a form submission to the canonical metric record
pub fn normalize_measurements(raw: &RawInput) -> NormalizeResponse {
    match normalizer::validate(raw) {
        Ok(validated) => NormalizeResponse {
            success: true,
            measurement: Some(normalizer::normalize(&validated)),
            errors: Vec::new(),
        },
        Err(e) => {
            tracing::warn!(violations = e.violations().len(), "Measurements failed validation");
            NormalizeResponse {
                success: false,
                measurement: None,
                errors: e.into_inner(),
            }
        }
    }
}

/// Run the whole pipeline on a form submission
///
/// Invalid input is not an error here: the response carries `success: false`
/// and every violation so the caller can show them all.
pub fn calculate_metrics(raw: &RawInput) -> Result<CalculateResponse, String> {
    let validated = match normalizer::validate(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(violations = e.violations().len(), "Measurements failed validation");
            return Ok(CalculateResponse::rejected(e.into_inner()));
        }
    };

    let measurement = normalizer::normalize(&validated);
    calculated(measurement)
}

/// Recompute results from a results link
pub fn calculate_from_link(link: &str) -> Result<CalculateResponse, String> {
    let measurement = transport::decode_results_link(link).map_err(|e| {
        tracing::warn!(error = %e, "Rejected results link");
        e.to_string()
    })?;
    calculated(measurement)
}

/// Canonical record from either a results link or form fields
///
/// The link wins when both are given.
pub fn resolve_measurement(
    raw: &RawInput,
    results_link: Option<&str>,
) -> Result<CanonicalMeasurement, String> {
    if let Some(link) = results_link.filter(|l| !l.trim().is_empty()) {
        return transport::decode_results_link(link).map_err(|e| e.to_string());
    }
    let validated = normalizer::validate(raw).map_err(|e| {
        tracing::warn!(violations = e.violations().len(), "Measurements failed validation");
        e.to_string()
    })?;
    Ok(normalizer::normalize(&validated))
}

fn calculated(measurement: CanonicalMeasurement) -> Result<CalculateResponse, String> {
    let results = metrics::compute(&measurement);
    let results_link = transport::encode_results_link(&measurement).map_err(|e| e.to_string())?;
    let goals = goal_targets(&results);

    tracing::info!(
        unit_system = measurement.unit_system.as_str(),
        bmr = results.bmr,
        tdee = results.tdee,
        "Calculated metrics"
    );

    Ok(CalculateResponse {
        success: true,
        errors: Vec::new(),
        measurement: Some(measurement),
        results: Some(results),
        goals,
        results_link: Some(results_link),
    })
}

/// Maintenance, cutting and bulking targets
pub fn goal_targets(results: &ResultsRecord) -> Vec<GoalTarget> {
    CalorieGoal::ALL
        .iter()
        .map(|goal| GoalTarget {
            goal: *goal,
            label: goal.display_name(),
            calories: results.calories_for(*goal),
            macros: results.macros_for(*goal),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UnitSystem;

    fn metric_input() -> RawInput {
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
    fn test_validate_reports_all_errors() {
        let raw = RawInput {
            age: Some(12.0),
            weight_kg: Some(500.0),
            ..metric_input()
        };
        let response = validate_measurements(&raw);
        assert!(!response.valid);
        assert_eq!(response.errors.len(), 2);

        assert!(validate_measurements(&metric_input()).valid);
    }

    #[test]
    fn test_normalize_imperial() {
        let raw = RawInput {
            unit_system: Some("imperial".to_string()),
            height_cm: None,
            weight_kg: None,
            height_feet: Some(5.0),
            height_inches: Some(11.0),
            weight_lbs: Some(176.0),
            ..metric_input()
        };
        let response = normalize_measurements(&raw);
        assert!(response.success);
        let m = response.measurement.unwrap();
        assert_eq!(m.unit_system, UnitSystem::Imperial);
        assert_eq!(m.height_cm, 180.0);
        assert_eq!(m.weight_kg, 80.0);
        assert_eq!(m.weight_lbs, Some(176.0));
    }

    #[test]
    fn test_calculate_metrics_success() {
        let response = calculate_metrics(&metric_input()).unwrap();
        assert!(response.success);
        assert!(response.errors.is_empty());
        let results = response.results.unwrap();
        assert_eq!(results.tdee, 2759);
        assert_eq!(response.goals.len(), 3);
        assert_eq!(response.goals[1].calories, 2259);
        assert!(response.results_link.unwrap().starts_with("/results?data="));
    }

    #[test]
    fn test_calculate_metrics_invalid_is_not_an_error() {
        let raw = RawInput {
            gender: Some("unknown".to_string()),
            ..metric_input()
        };
        let response = calculate_metrics(&raw).unwrap();
        assert!(!response.success);
        assert_eq!(response.errors[0].field, "gender");
        assert!(response.results.is_none());
        assert!(response.results_link.is_none());
    }

    #[test]
    fn test_link_reproduces_results() {
        let first = calculate_metrics(&metric_input()).unwrap();
        let link = first.results_link.clone().unwrap();
        let second = calculate_from_link(&link).unwrap();
        assert_eq!(first.results, second.results);
        assert_eq!(first.measurement, second.measurement);
        assert_eq!(second.results_link, Some(link));
    }

    #[test]
    fn test_calculate_from_bad_link() {
        assert!(calculate_from_link("/results").is_err());
        assert!(calculate_from_link("/results?data=%7B%7D").is_err());
    }

    #[test]
    fn test_calculate_from_link_rejects_oversized_record() {
        let mut m = calculate_metrics(&metric_input()).unwrap().measurement.unwrap();
        m.weight_kg = 1e300;
        let link = transport::encode_results_link(&m).unwrap();
        let err = calculate_from_link(&link).unwrap_err();
        assert!(err.contains("weightKg"));
    }

    #[test]
    fn test_resolve_prefers_link() {
        let link = calculate_metrics(&metric_input())
            .unwrap()
            .results_link
            .unwrap();
        let m = resolve_measurement(&RawInput::default(), Some(&link)).unwrap();
        assert_eq!(m.height_cm, 180.0);

        let m = resolve_measurement(&metric_input(), Some("  ")).unwrap();
        assert_eq!(m.weight_kg, 80.0);

        let err = resolve_measurement(&RawInput::default(), None).unwrap_err();
        assert!(err.starts_with("Invalid measurements"));
    }
}
