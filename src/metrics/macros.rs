//! Macronutrient targets
//!
//! Splits a daily calorie figure into grams of protein, carbohydrate and fat
//! for three diet styles.

use crate::models::{MacroPlans, MacroSplit};
use crate::normalizer::round_to_i64;

/// kcal per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// kcal per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Share of calories from each macronutrient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRatio {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

pub const MODERATE_CARB: MacroRatio = MacroRatio {
    protein: 0.30,
    carbs: 0.40,
    fat: 0.30,
};

pub const LOWER_CARB: MacroRatio = MacroRatio {
    protein: 0.35,
    carbs: 0.25,
    fat: 0.40,
};

pub const HIGHER_CARB: MacroRatio = MacroRatio {
    protein: 0.25,
    carbs: 0.55,
    fat: 0.20,
};

/// Grams per macronutrient for a calorie figure
pub fn macro_split(calories: i64, ratio: &MacroRatio) -> MacroSplit {
    let calories = calories as f64;
    MacroSplit {
        protein_g: round_to_i64(calories * ratio.protein / KCAL_PER_G_PROTEIN),
        carbs_g: round_to_i64(calories * ratio.carbs / KCAL_PER_G_CARBS),
        fat_g: round_to_i64(calories * ratio.fat / KCAL_PER_G_FAT),
    }
}

/// All three diet styles at one calorie figure
pub fn macro_plans(calories: i64) -> MacroPlans {
    MacroPlans {
        moderate: macro_split(calories, &MODERATE_CARB),
        lower: macro_split(calories, &LOWER_CARB),
        higher: macro_split(calories, &HIGHER_CARB),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_sum_to_one() {
        for ratio in [MODERATE_CARB, LOWER_CARB, HIGHER_CARB] {
            assert!((ratio.protein + ratio.carbs + ratio.fat - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_moderate_split() {
        // 2759 x 0.3 / 4 = 206.9, x 0.4 / 4 = 275.9, x 0.3 / 9 = 91.97
        let split = macro_split(2759, &MODERATE_CARB);
        assert_eq!(split, MacroSplit { protein_g: 207, carbs_g: 276, fat_g: 92 });
    }

    #[test]
    fn test_energy_is_conserved_within_rounding() {
        for calories in [1200, 1777, 2259, 2759, 3259, 4100] {
            let plans = macro_plans(calories);
            for split in [plans.moderate, plans.lower, plans.higher] {
                // each of three roundings is off by at most 0.5g
                let drift = (split.calories() - calories).abs();
                assert!(drift <= 9, "drift {} at {} kcal: {:?}", drift, calories, split);
            }
        }
    }

    #[test]
    fn test_plans_use_all_three_ratios() {
        let plans = macro_plans(2000);
        assert_eq!(plans.moderate, MacroSplit { protein_g: 150, carbs_g: 200, fat_g: 67 });
        assert_eq!(plans.lower, MacroSplit { protein_g: 175, carbs_g: 125, fat_g: 89 });
        assert_eq!(plans.higher, MacroSplit { protein_g: 125, carbs_g: 275, fat_g: 44 });
    }
}
