//! Reference table of the post-translational modifications the library annotates.

// internal imports
use crate::mass::convert::is_within_tolerance;

/// Tolerance (Dalton) when matching an annotated mass delta against a reference mass.
pub const MODIFICATION_MASS_TOLERANCE: i64 = mass_to_int!(0.01_f64);

/// A modification the classifier can recognize by its mass delta.
/// Each modification owns one bit of the modification type ID.
///
pub struct KnownModification {
    bit: u8,
    name: &'static str,
    residues: &'static str,
    mono_mass: i64,
}

impl KnownModification {
    pub fn get_bit(&self) -> u8 {
        self.bit
    }

    pub fn get_name(&self) -> &'static str {
        self.name
    }

    /// Comma separated list of targeted residues, e.g. `S,T`
    pub fn get_residues(&self) -> &'static str {
        self.residues
    }

    pub fn get_mono_mass(&self) -> i64 {
        self.mono_mass
    }

    /// Returns true if the given mass is within [`MODIFICATION_MASS_TOLERANCE`] of this modification's mass.
    ///
    /// # Arguments
    /// * `mass` - Mass delta in internal integer representation
    ///
    pub fn matches(&self, mass: i64) -> bool {
        is_within_tolerance(mass, self.mono_mass, MODIFICATION_MASS_TOLERANCE)
    }
}

pub const CARBAMIDOMETHYLATION: KnownModification = KnownModification{bit: 1,   name: "Carbamidomethylation",   residues: "C,K,H",      mono_mass: mass_to_int!(57.02_f64)};
pub const ACETYLATION:          KnownModification = KnownModification{bit: 2,   name: "Acetylation",            residues: "K,N-term",   mono_mass: mass_to_int!(42.01_f64)};
pub const OXIDATION:            KnownModification = KnownModification{bit: 4,   name: "Oxidation",              residues: "M",          mono_mass: mass_to_int!(15.99_f64)};
pub const PHOSPHORYLATION:      KnownModification = KnownModification{bit: 8,   name: "Phosphorylation",        residues: "S,T",        mono_mass: mass_to_int!(79.97_f64)};
pub const SUCCINYLATION:        KnownModification = KnownModification{bit: 16,  name: "Succinylation",          residues: "K",          mono_mass: mass_to_int!(100.0186_f64)};
pub const PROPIONAMIDE:         KnownModification = KnownModification{bit: 32,  name: "Propionamide",           residues: "C",          mono_mass: mass_to_int!(71.03712_f64)};
pub const PYRO_CARBAMIDOMETHYL: KnownModification = KnownModification{bit: 64,  name: "Pyro-carbamidomethyl",   residues: "C",          mono_mass: mass_to_int!(39.99492_f64)};
pub const PYRO_GLU:             KnownModification = KnownModification{bit: 128, name: "Pyro-glu",               residues: "E",          mono_mass: mass_to_int!(-17.03_f64)};

/// All known modifications, ordered by bit.
pub const KNOWN_MODIFICATIONS: [&'static KnownModification; 8] = [
    &CARBAMIDOMETHYLATION,
    &ACETYLATION,
    &OXIDATION,
    &PHOSPHORYLATION,
    &SUCCINYLATION,
    &PROPIONAMIDE,
    &PYRO_CARBAMIDOMETHYL,
    &PYRO_GLU,
];

/// Returns the first known modification matching the given mass delta.
///
/// # Arguments
/// * `mass` - Mass delta in internal integer representation
///
pub fn get_by_mass(mass: i64) -> Option<&'static KnownModification> {
    KNOWN_MODIFICATIONS
        .iter()
        .find(|modification| modification.matches(mass))
        .copied()
}

#[cfg(test)]
mod test {
    use crate::mass::convert::to_int;
    use super::*;

    #[test]
    fn test_bits_are_distinct_powers_of_two() {
        let mut combined: u16 = 0;
        for modification in KNOWN_MODIFICATIONS.iter() {
            assert!(modification.get_bit().is_power_of_two());
            assert_eq!(combined & modification.get_bit() as u16, 0);
            combined |= modification.get_bit() as u16;
        }
        assert_eq!(combined, 255);
    }

    #[test]
    fn test_get_by_mass_within_tolerance() {
        assert_eq!(get_by_mass(to_int(57.02146)).unwrap().get_bit(), 1);
        assert_eq!(get_by_mass(to_int(15.9949)).unwrap().get_bit(), 4);
        assert_eq!(get_by_mass(to_int(-17.0265)).unwrap().get_bit(), 128);
        assert!(get_by_mass(to_int(57.04)).is_none());
        assert!(get_by_mass(to_int(17.03)).is_none());
    }
}
