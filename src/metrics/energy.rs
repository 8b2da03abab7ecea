//! Energy expenditure formulas
//!
//! Basal Metabolic Rate, TDEE and the per-activity comparison table.
//!
//! # References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy
//!   expenditure in healthy individuals. *Am J Clin Nutr*, 51(2), 241-247.
//! - Katch, F.I., McArdle, W.D. (1996). *Nutrition, Weight Control and Exercise*.

use crate::models::{ActivityCalories, ActivityLevel, BmrFormula, CanonicalMeasurement, Gender};
use crate::normalizer::round_to_i64;

// ============================================================================
// Formula Constants
// ============================================================================

/// Katch-McArdle intercept (kcal/day)
pub const KATCH_MCARDLE_BASE: f64 = 370.0;
/// Katch-McArdle kcal per kg of lean body mass
pub const KATCH_MCARDLE_LBM_FACTOR: f64 = 21.6;

/// Mifflin-St Jeor kcal per kg body weight
pub const MIFFLIN_WEIGHT_FACTOR: f64 = 10.0;
/// Mifflin-St Jeor kcal per cm height
pub const MIFFLIN_HEIGHT_FACTOR: f64 = 6.25;
/// Mifflin-St Jeor kcal per year of age (subtracted)
pub const MIFFLIN_AGE_FACTOR: f64 = 5.0;
/// Mifflin-St Jeor male offset
pub const MIFFLIN_MALE_OFFSET: f64 = 5.0;
/// Mifflin-St Jeor female offset
pub const MIFFLIN_FEMALE_OFFSET: f64 = -161.0;

/// Unrounded basal metabolic rate and the equation that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmr {
    pub kcal: f64,
    pub formula: BmrFormula,
}

/// Lean body mass in kg
pub fn lean_body_mass(weight_kg: f64, body_fat_percentage: f64) -> f64 {
    weight_kg * (1.0 - body_fat_percentage / 100.0)
}

/// Katch-McArdle: 370 + 21.6 x LBM
pub fn katch_mcardle(weight_kg: f64, body_fat_percentage: f64) -> f64 {
    KATCH_MCARDLE_BASE + KATCH_MCARDLE_LBM_FACTOR * lean_body_mass(weight_kg, body_fat_percentage)
}

/// Mifflin-St Jeor: 10 x weight + 6.25 x height - 5 x age + (5 | -161)
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let offset = match gender {
        Gender::Male => MIFFLIN_MALE_OFFSET,
        Gender::Female => MIFFLIN_FEMALE_OFFSET,
    };
    MIFFLIN_WEIGHT_FACTOR * weight_kg + MIFFLIN_HEIGHT_FACTOR * height_cm
        - MIFFLIN_AGE_FACTOR * f64::from(age)
        + offset
}

/// BMR for a measurement
///
/// Katch-McArdle when body fat is known, Mifflin-St Jeor otherwise. The value
/// is left unrounded; everything downstream multiplies this figure.
pub fn basal_metabolic_rate(m: &CanonicalMeasurement) -> Bmr {
    match m.body_fat_percentage {
        Some(body_fat) => Bmr {
            kcal: katch_mcardle(m.weight_kg, body_fat),
            formula: BmrFormula::KatchMcArdle,
        },
        None => Bmr {
            kcal: mifflin_st_jeor(m.weight_kg, m.height_cm, m.age_years, m.gender),
            formula: BmrFormula::MifflinStJeor,
        },
    }
}

/// Total daily energy expenditure, rounded
pub fn total_daily_energy_expenditure(bmr_kcal: f64, level: ActivityLevel) -> i64 {
    round_to_i64(bmr_kcal * level.multiplier())
}

/// TDEE at every activity level, least active first
pub fn activity_level_calories(bmr_kcal: f64) -> Vec<ActivityCalories> {
    ActivityLevel::ALL
        .iter()
        .map(|level| ActivityCalories {
            level: *level,
            label: level.display_name().to_string(),
            description: level.description().to_string(),
            calories: total_daily_energy_expenditure(bmr_kcal, *level),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UnitSystem;

    fn subject(body_fat_percentage: Option<f64>) -> CanonicalMeasurement {
        CanonicalMeasurement {
            unit_system: UnitSystem::Metric,
            age_years: 30,
            gender: Gender::Male,
            height_cm: 180.0,
            weight_kg: 80.0,
            activity_level: ActivityLevel::Moderate,
            body_fat_percentage,
            height_feet: None,
            height_inches: None,
            weight_lbs: None,
        }
    }

    #[test]
    fn test_mifflin_st_jeor_male() {
        // 800 + 1125 - 150 + 5
        assert!((mifflin_st_jeor(80.0, 180.0, 30, Gender::Male) - 1780.0).abs() < 1e-9);
    }

    #[test]
    fn test_mifflin_st_jeor_female() {
        // 600 + 1031.25 - 200 - 161
        assert!((mifflin_st_jeor(60.0, 165.0, 40, Gender::Female) - 1270.25).abs() < 1e-9);
    }

    #[test]
    fn test_katch_mcardle() {
        // LBM 64kg: 370 + 21.6 x 64
        assert!((lean_body_mass(80.0, 20.0) - 64.0).abs() < 1e-9);
        assert!((katch_mcardle(80.0, 20.0) - 1752.4).abs() < 1e-9);
    }

    #[test]
    fn test_formula_switch_on_body_fat() {
        let with_fat = basal_metabolic_rate(&subject(Some(20.0)));
        assert_eq!(with_fat.formula, BmrFormula::KatchMcArdle);
        assert_eq!(round_to_i64(with_fat.kcal), 1752);

        let without = basal_metabolic_rate(&subject(None));
        assert_eq!(without.formula, BmrFormula::MifflinStJeor);
        assert_eq!(round_to_i64(without.kcal), 1780);
    }

    #[test]
    fn test_katch_mcardle_ignores_gender_and_height() {
        let mut m = subject(Some(25.0));
        let male = basal_metabolic_rate(&m);
        m.gender = Gender::Female;
        m.height_cm = 150.0;
        assert_eq!(basal_metabolic_rate(&m), male);
    }

    #[test]
    fn test_tdee_uses_unrounded_bmr() {
        // 1000.4 x 1.9 = 1900.76; rounding BMR first would give 1900
        assert_eq!(total_daily_energy_expenditure(1000.4, ActivityLevel::VeryActive), 1901);
        // 1780 x 1.55
        assert_eq!(total_daily_energy_expenditure(1780.0, ActivityLevel::Moderate), 2759);
        // 1780 x 1.375 = 2447.5, tie rounds up
        assert_eq!(total_daily_energy_expenditure(1780.0, ActivityLevel::Light), 2448);
    }

    #[test]
    fn test_activity_table_order_and_labels() {
        let table = activity_level_calories(1780.0);
        let labels: Vec<&str> = table.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Sedentary", "Light Exercise", "Moderate Exercise", "Heavy Exercise", "Athlete"]
        );
        assert_eq!(table[0].calories, 2136);
        assert_eq!(table[2].calories, 2759);
        assert_eq!(table[4].calories, 3382);
    }

    #[test]
    fn test_activity_table_strictly_increasing() {
        for bmr in [250.0, 1000.0, 1780.0, 2500.5, 4000.0] {
            let table = activity_level_calories(bmr);
            assert!(
                table.windows(2).all(|w| w[0].calories < w[1].calories),
                "not increasing for bmr {}",
                bmr
            );
        }
    }
}
