//! Calculation result models

use serde::{Deserialize, Serialize};

use super::measurement::ActivityLevel;

/// Equation used for Basal Metabolic Rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    /// Lean-mass based, used when body fat is known
    KatchMcArdle,
    /// Weight/height/age based, sex specific
    MifflinStJeor,
}

impl BmrFormula {
    pub fn display_name(&self) -> &'static str {
        match self {
            BmrFormula::KatchMcArdle => "Katch-McArdle",
            BmrFormula::MifflinStJeor => "Mifflin-St Jeor",
        }
    }
}

/// BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiClass {
    Underweight,
    #[serde(rename = "Normal Weight")]
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiClass {
    pub fn label(&self) -> &'static str {
        match self {
            BmiClass::Underweight => "Underweight",
            BmiClass::NormalWeight => "Normal Weight",
            BmiClass::Overweight => "Overweight",
            BmiClass::Obese => "Obese",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BmiClass::Underweight => "BMI less than 18.5",
            BmiClass::NormalWeight => "BMI between 18.5 and 24.9",
            BmiClass::Overweight => "BMI between 25 and 29.9",
            BmiClass::Obese => "BMI of 30 or greater",
        }
    }
}

/// Lowest and highest of the ideal-weight estimates, in kg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: i64,
    pub max: i64,
}

/// One named ideal-weight estimate, in kg
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealWeightEstimate {
    pub name: String,
    pub value: i64,
}

/// Daily calories at one activity level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCalories {
    pub level: ActivityLevel,
    pub label: String,
    pub description: String,
    pub calories: i64,
}

/// Grams of each macronutrient per day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroSplit {
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fat_g: i64,
}

impl MacroSplit {
    /// Calories the split adds back up to (4/4/9 kcal per gram)
    pub fn calories(&self) -> i64 {
        self.protein_g * 4 + self.carbs_g * 4 + self.fat_g * 9
    }
}

/// The three diet styles at one calorie level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroPlans {
    /// 30/40/30 protein/carbs/fat
    pub moderate: MacroSplit,
    /// 35/25/40
    pub lower: MacroSplit,
    /// 25/55/20
    pub higher: MacroSplit,
}

/// Calorie target relative to maintenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalorieGoal {
    Maintenance,
    Cutting,
    Bulking,
}

impl CalorieGoal {
    pub const ALL: [CalorieGoal; 3] = [
        CalorieGoal::Maintenance,
        CalorieGoal::Cutting,
        CalorieGoal::Bulking,
    ];

    /// Offset from TDEE in kcal/day
    pub fn offset(&self) -> i64 {
        match self {
            CalorieGoal::Maintenance => 0,
            CalorieGoal::Cutting => -500,
            CalorieGoal::Bulking => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CalorieGoal::Maintenance => "maintenance",
            CalorieGoal::Cutting => "cutting",
            CalorieGoal::Bulking => "bulking",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "maintenance" | "maintain" => Some(CalorieGoal::Maintenance),
            "cutting" | "cut" => Some(CalorieGoal::Cutting),
            "bulking" | "bulk" => Some(CalorieGoal::Bulking),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CalorieGoal::Maintenance => "Maintenance",
            CalorieGoal::Cutting => "Cutting",
            CalorieGoal::Bulking => "Bulking",
        }
    }
}

/// Everything derived from one canonical measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsRecord {
    pub bmr: i64,
    pub bmr_formula: BmrFormula,
    pub tdee: i64,
    pub bmi: f64,
    pub bmi_classification: BmiClass,
    pub ideal_weight_range: WeightRange,
    pub ideal_weight_formulas: Vec<IdealWeightEstimate>,
    pub activity_level_calories: Vec<ActivityCalories>,
    pub muscular_potential_kg: i64,
    /// Splits at maintenance calories
    pub macros: MacroPlans,
}

impl ResultsRecord {
    /// Daily calories for a goal, offset from the rounded TDEE
    pub fn calories_for(&self, goal: CalorieGoal) -> i64 {
        self.tdee + goal.offset()
    }

    /// Macro splits for a goal
    pub fn macros_for(&self, goal: CalorieGoal) -> MacroPlans {
        match goal {
            CalorieGoal::Maintenance => self.macros,
            _ => crate::metrics::macro_plans(self.calories_for(goal)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_class_serializes_labels() {
        let json = serde_json::to_string(&BmiClass::NormalWeight).unwrap();
        assert_eq!(json, r#""Normal Weight""#);
        assert_eq!(BmiClass::Obese.description(), "BMI of 30 or greater");
    }

    #[test]
    fn test_calorie_goal_offsets() {
        assert_eq!(CalorieGoal::Maintenance.offset(), 0);
        assert_eq!(CalorieGoal::Cutting.offset(), -500);
        assert_eq!(CalorieGoal::Bulking.offset(), 500);
        assert_eq!(CalorieGoal::from_str("cut"), Some(CalorieGoal::Cutting));
        assert_eq!(CalorieGoal::from_str("shred"), None);
    }

    #[test]
    fn test_macro_split_uses_camel_case() {
        let json = serde_json::to_value(MacroSplit { protein_g: 1, carbs_g: 2, fat_g: 3 }).unwrap();
        assert_eq!(json["proteinG"], 1);
        assert_eq!(json["fatG"], 3);
    }

    #[test]
    fn test_macro_split_calories() {
        let split = MacroSplit { protein_g: 225, carbs_g: 300, fat_g: 100 };
        assert_eq!(split.calories(), 225 * 4 + 300 * 4 + 900);
    }
}
