//! Input normalizer
//!
//! Validates raw form input and converts it to the canonical metric record.

pub mod normalize;
pub mod units;
pub mod validation;

pub use normalize::normalize;
pub use units::{
    cm_to_inches, feet_inches_to_cm, kg_to_display_lbs, lbs_to_kg, round_half_up, round_to_i64,
    round_to_tenth,
};
pub use validation::{validate, FieldViolation, ValidationErrors, UNIT_SYSTEM_MISMATCH};
