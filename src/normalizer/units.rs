//! Unit conversion constants
//!
//! Conversion factors between imperial and metric body measurements, plus
//! the rounding rule every displayed integer goes through.

// ============================================================================
// Length Conversion Constants (to centimeters)
// ============================================================================

/// Centimeters per foot
pub const CM_PER_FOOT: f64 = 30.48;
/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;
/// Centimeters per meter
pub const CM_PER_METER: f64 = 100.0;

// ============================================================================
// Weight Conversion Constants
// ============================================================================

/// Kilograms per pound, used when normalizing form input
pub const KG_PER_LB: f64 = 0.453592;
/// Pounds per kilogram, used only for display
pub const LBS_PER_KG: f64 = 2.20462;

// ============================================================================
// Rounding
// ============================================================================

/// Round to the nearest integer, ties toward positive infinity
///
/// `f64::round` breaks ties away from zero, which disagrees for negative
/// halves (-7.5 becomes -8 instead of -7).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// `round_half_up` as an integer
pub fn round_to_i64(value: f64) -> i64 {
    round_half_up(value) as i64
}

/// Round to one decimal place, ties upward
pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

// ============================================================================
// Conversions
// ============================================================================

/// Feet and inches to whole centimeters
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    round_half_up(feet * CM_PER_FOOT + inches * CM_PER_INCH)
}

/// Pounds to whole kilograms
pub fn lbs_to_kg(lbs: f64) -> f64 {
    round_half_up(lbs * KG_PER_LB)
}

/// Kilograms to whole pounds for display
pub fn kg_to_display_lbs(kg: f64) -> i64 {
    round_to_i64(kg * LBS_PER_KG)
}

/// Centimeters to inches, unrounded
pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4999), 2.0);
        assert_eq!(round_half_up(-7.5), -7.0);
        assert_eq!(round_half_up(-7.6), -8.0);
        assert_eq!(round_to_i64(1936.25), 1936);
        assert_eq!(round_to_i64(1753.6), 1754);
    }

    #[test]
    fn test_round_to_tenth() {
        assert!((round_to_tenth(24.691358) - 24.7).abs() < 1e-9);
        assert!((round_to_tenth(18.44) - 18.4).abs() < 1e-9);
    }

    #[test]
    fn test_feet_inches_to_cm() {
        // 5'11" = 180.34cm
        assert_eq!(feet_inches_to_cm(5.0, 11.0), 180.0);
        // 6'0" = 182.88cm
        assert_eq!(feet_inches_to_cm(6.0, 0.0), 183.0);
        // 3'0" = 91.44cm
        assert_eq!(feet_inches_to_cm(3.0, 0.0), 91.0);
    }

    #[test]
    fn test_lbs_to_kg() {
        // 176 lbs = 79.83kg
        assert_eq!(lbs_to_kg(176.0), 80.0);
        // 66 lbs = 29.94kg
        assert_eq!(lbs_to_kg(66.0), 30.0);
        assert_eq!(lbs_to_kg(660.0), 299.0);
    }

    #[test]
    fn test_kg_to_display_lbs() {
        assert_eq!(kg_to_display_lbs(80.0), 176);
        assert_eq!(kg_to_display_lbs(77.0), 170);
    }

    #[test]
    fn test_cm_to_inches() {
        assert!((cm_to_inches(180.0) - 70.866).abs() < 0.001);
    }
}
