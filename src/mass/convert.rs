/// Factor between Dalton and the internal integer representation (nano Dalton).
pub const MASS_CONVERT_FACTOR: f64 = 1000000000.0;

/// Converts a mass (Dalton) into the internal integer representation.
///
/// # Arguments
/// * `mass` - Mass in Dalton
///
pub fn to_int(mass: f64) -> i64 {
    (mass * MASS_CONVERT_FACTOR).round() as i64
}

/// Mass to integer conversion usable in constant definitions, where `to_int` is not available.
/// Truncates instead of rounding. Only pass floats.
///
macro_rules! mass_to_int {
    ($mass:expr) => {{
        ($mass as f64 * crate::mass::convert::MASS_CONVERT_FACTOR) as i64
    }};
}

/// Converts a mass from the internal integer representation back to Dalton.
///
/// # Arguments
/// * `mass` - Mass in nano Dalton
///
pub fn to_float(mass: i64) -> f64 {
    mass as f64 / MASS_CONVERT_FACTOR
}

/// Returns the m/z of a neutral mass at the given charge, adding `charge_carrier_mass` per charge.
/// A charge of 0 is treated as 1.
///
/// # Arguments
/// * `mass` - Neutral mass in nano Dalton
/// * `charge` - Charge state
/// * `charge_carrier_mass` - Mass added per charge in Dalton
///
pub fn to_mz(mass: i64, charge: u8, charge_carrier_mass: f64) -> f64 {
    let charge = charge.max(1) as f64;
    (to_float(mass) + charge * charge_carrier_mass) / charge
}

/// Returns true if both masses differ by no more than the tolerance
///
/// # Arguments
/// * `mass` - Mass in nano Dalton
/// * `reference` - Reference mass in nano Dalton
/// * `tolerance` - Absolute tolerance in nano Dalton
///
pub fn is_within_tolerance(mass: i64, reference: i64, tolerance: i64) -> bool {
    (mass - reference).abs() <= tolerance
}
