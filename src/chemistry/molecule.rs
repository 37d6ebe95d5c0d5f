/// Mass of water (H2O) added once per peptide for the termini.
/// The library stores 18.0152 Da, so stored weights and m/z values depend on this exact value.
pub const WATER_MASS: i64 = mass_to_int!(18.0152_f64);

/// Mass added per charge when calculating the theoretical precursor m/z.
/// The library format uses one nominal Dalton per charge.
pub const CHARGE_CARRIER_MASS: f64 = 1.0;
