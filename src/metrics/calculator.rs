//! Results calculation
//!
//! Runs every formula over one canonical measurement.

use super::body::{body_mass_index, classify_bmi, ideal_weight_range, ideal_weights, muscular_potential};
use super::energy::{activity_level_calories, basal_metabolic_rate, total_daily_energy_expenditure};
use super::macros::macro_plans;
use crate::models::{CanonicalMeasurement, ResultsRecord};
use crate::normalizer::round_to_i64;

/// Compute the full results record
///
/// Total over any canonical measurement: there is no failure path. The BMR is
/// carried unrounded into TDEE and the activity table and only rounded for
/// the record itself.
pub fn compute(m: &CanonicalMeasurement) -> ResultsRecord {
    let bmr = basal_metabolic_rate(m);
    let tdee = total_daily_energy_expenditure(bmr.kcal, m.activity_level);
    let activity_level_calories = activity_level_calories(bmr.kcal);

    let bmi = body_mass_index(m.weight_kg, m.height_cm);
    let bmi_classification = classify_bmi(bmi);

    let ideal_weight_formulas = ideal_weights(m.height_cm, m.gender);
    let ideal_weight_range = ideal_weight_range(&ideal_weight_formulas);

    let muscular_potential_kg = muscular_potential(m.height_cm, m.gender);
    let macros = macro_plans(tdee);

    tracing::debug!(
        formula = bmr.formula.display_name(),
        bmr = bmr.kcal,
        tdee,
        bmi,
        "Computed results"
    );

    ResultsRecord {
        bmr: round_to_i64(bmr.kcal),
        bmr_formula: bmr.formula,
        tdee,
        bmi,
        bmi_classification,
        ideal_weight_range,
        ideal_weight_formulas,
        activity_level_calories,
        muscular_potential_kg,
        macros,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActivityLevel, BmiClass, BmrFormula, CalorieGoal, Gender, MacroSplit, RawInput,
        UnitSystem, WeightRange,
    };
    use crate::normalizer::{normalize, validate};

    fn reference_subject() -> CanonicalMeasurement {
        CanonicalMeasurement {
            unit_system: UnitSystem::Metric,
            age_years: 30,
            gender: Gender::Male,
            height_cm: 180.0,
            weight_kg: 80.0,
            activity_level: ActivityLevel::Moderate,
            body_fat_percentage: None,
            height_feet: None,
            height_inches: None,
            weight_lbs: None,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let r = compute(&reference_subject());
        assert_eq!(r.bmr_formula, BmrFormula::MifflinStJeor);
        assert_eq!(r.bmr, 1780);
        assert_eq!(r.tdee, 2759);
        assert!((r.bmi - 24.7).abs() < 1e-9);
        assert_eq!(r.bmi_classification, BmiClass::NormalWeight);
        assert_eq!(r.ideal_weight_formulas[0].value, 77);
        assert_eq!(r.ideal_weight_range, WeightRange { min: 72, max: 77 });
        assert_eq!(r.muscular_potential_kg, 89);
        assert_eq!(r.activity_level_calories.len(), 5);
        assert_eq!(r.activity_level_calories[2].calories, r.tdee);
        assert_eq!(
            r.macros.moderate,
            MacroSplit { protein_g: 207, carbs_g: 276, fat_g: 92 }
        );
    }

    #[test]
    fn test_body_fat_routes_to_katch_mcardle() {
        let mut m = reference_subject();
        m.body_fat_percentage = Some(20.0);
        let r = compute(&m);
        assert_eq!(r.bmr_formula, BmrFormula::KatchMcArdle);
        assert_eq!(r.bmr, 1752);
        // 1752.4 x 1.55 = 2716.22
        assert_eq!(r.tdee, 2716);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let m = reference_subject();
        assert_eq!(compute(&m), compute(&m));
    }

    #[test]
    fn test_metric_and_imperial_agree() {
        let metric = RawInput {
            unit_system: Some("metric".to_string()),
            age: Some(30.0),
            gender: Some("male".to_string()),
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            activity_level: Some("moderate".to_string()),
            ..Default::default()
        };
        let imperial = RawInput {
            unit_system: Some("imperial".to_string()),
            age: Some(30.0),
            gender: Some("male".to_string()),
            height_feet: Some(5.0),
            height_inches: Some(11.0),
            weight_lbs: Some(176.0),
            activity_level: Some("moderate".to_string()),
            ..Default::default()
        };
        let a = compute(&normalize(&validate(&metric).unwrap()));
        let b = compute(&normalize(&validate(&imperial).unwrap()));
        assert!((a.bmr - b.bmr).abs() <= 1);
        assert!((a.tdee - b.tdee).abs() <= 1);
    }

    #[test]
    fn test_goal_macros_recomputed_from_rounded_tdee() {
        let r = compute(&reference_subject());
        assert_eq!(r.calories_for(CalorieGoal::Maintenance), 2759);
        assert_eq!(r.calories_for(CalorieGoal::Cutting), 2259);
        assert_eq!(r.calories_for(CalorieGoal::Bulking), 3259);
        assert_eq!(r.macros_for(CalorieGoal::Maintenance), r.macros);

        let cutting = r.macros_for(CalorieGoal::Cutting);
        // 2259 x 0.3 / 4 = 169.4, x 0.4 / 4 = 225.9, x 0.3 / 9 = 75.3
        assert_eq!(
            cutting.moderate,
            MacroSplit { protein_g: 169, carbs_g: 226, fat_g: 75 }
        );
        let bulking = r.macros_for(CalorieGoal::Bulking);
        assert!(bulking.higher.carbs_g > r.macros.higher.carbs_g);
    }

    #[test]
    fn test_female_subject() {
        let m = CanonicalMeasurement {
            unit_system: UnitSystem::Metric,
            age_years: 40,
            gender: Gender::Female,
            height_cm: 165.0,
            weight_kg: 60.0,
            activity_level: ActivityLevel::Sedentary,
            body_fat_percentage: None,
            height_feet: None,
            height_inches: None,
            weight_lbs: None,
        };
        let r = compute(&m);
        assert_eq!(r.bmr, 1270);
        // 1270.25 x 1.2 = 1524.3
        assert_eq!(r.tdee, 1524);
        // 60 / 2.7225 = 22.04
        assert!((r.bmi - 22.0).abs() < 1e-9);
        assert_eq!(r.ideal_weight_range, WeightRange { min: 56, max: 60 });
        assert_eq!(r.muscular_potential_kg, 66);
    }
}
