// 3rd party imports
use serde::{Deserialize, Serialize};

// internal imports
use crate::chemistry::modification::{KnownModification, KNOWN_MODIFICATIONS};
use crate::functions::post_translational_modification::UNMODIFIED_PTM_TYPE_NAME;
use crate::mass::convert::to_float;

/// Combination of known modifications, identified by its bitmask
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PtmType {
    id: u8,
    name: String,
    residues: String,
    mass_shift: f64,
}

impl PtmType {
    /// Creates a new modification type
    ///
    /// # Arguments
    /// * `id` - Bitmask of the combined modifications
    /// * `name` - Names of the combined modifications, separated by `;`
    /// * `residues` - Targeted residues per modification, separated by `;`
    /// * `mass_shift` - Sum of the combined modification masses
    ///
    pub fn new(id: u8, name: String, residues: String, mass_shift: f64) -> Self {
        Self {
            id,
            name,
            residues,
            mass_shift,
        }
    }

    /// Builds the modification type combining every known modification whose bit is set.
    /// Names and residues are joined by `;`, the mass shift is the sum of all combined modifications.
    ///
    /// # Arguments
    /// * `ptm_type_id` - Bitmask of known modifications
    ///
    pub fn from_bitmask(ptm_type_id: u8) -> Self {
        if ptm_type_id == 0 {
            return Self::new(
                0,
                UNMODIFIED_PTM_TYPE_NAME.to_string(),
                UNMODIFIED_PTM_TYPE_NAME.to_string(),
                0.0,
            );
        }
        let combined: Vec<&KnownModification> = KNOWN_MODIFICATIONS
            .iter()
            .copied()
            .filter(|modification| ptm_type_id & modification.get_bit() != 0)
            .collect();
        let name = combined
            .iter()
            .map(|modification| modification.get_name())
            .collect::<Vec<&str>>()
            .join(";");
        let residues = combined
            .iter()
            .map(|modification| modification.get_residues())
            .collect::<Vec<&str>>()
            .join(";");
        let mass_shift = to_float(
            combined
                .iter()
                .map(|modification| modification.get_mono_mass())
                .sum(),
        );
        Self::new(ptm_type_id, name, residues, mass_shift)
    }

    pub fn get_id(&self) -> u8 {
        self.id
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    pub fn get_residues(&self) -> &String {
        &self.residues
    }

    pub fn get_mass_shift(&self) -> f64 {
        self.mass_shift
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_bitmask() {
        let unmodified = PtmType::from_bitmask(0);
        assert_eq!(unmodified.get_name(), UNMODIFIED_PTM_TYPE_NAME);
        assert_eq!(unmodified.get_residues(), UNMODIFIED_PTM_TYPE_NAME);

        let phospho = PtmType::from_bitmask(8);
        assert_eq!(phospho.get_id(), 8);
        assert_eq!(phospho.get_name(), "Phosphorylation");
        assert_eq!(phospho.get_residues(), "S,T");
        assert!((phospho.get_mass_shift() - 79.97).abs() < 1e-6);

        // Pyro-glu has a negative mass
        let combined = PtmType::from_bitmask(2 | 128);
        assert_eq!(combined.get_name(), "Acetylation;Pyro-glu");
        assert!((combined.get_mass_shift() - (42.01 - 17.03)).abs() < 1e-6);
    }
}
