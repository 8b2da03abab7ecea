//! Metrics calculator
//!
//! Pure formulas turning a canonical measurement into the results record.

pub mod body;
pub mod calculator;
pub mod energy;
pub mod macros;

pub use body::{body_mass_index, classify_bmi, ideal_weight_range, ideal_weights, muscular_potential};
pub use calculator::compute;
pub use energy::{
    activity_level_calories, basal_metabolic_rate, katch_mcardle, mifflin_st_jeor,
    total_daily_energy_expenditure, Bmr,
};
pub use macros::{macro_plans, macro_split, MacroRatio};
