//! Data models
//!
//! Input records and calculation results.

mod measurement;
mod results;

pub use measurement::{
    ActivityLevel, CanonicalMeasurement, Gender, HeightInput, RawInput, UnitSystem,
    ValidatedInput, WeightInput,
};
pub use results::{
    ActivityCalories, BmiClass, BmrFormula, CalorieGoal, IdealWeightEstimate, MacroPlans,
    MacroSplit, ResultsRecord, WeightRange,
};
