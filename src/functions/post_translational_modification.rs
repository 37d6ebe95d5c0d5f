// internal imports
use crate::chemistry::modification::get_by_mass;
use crate::entities::ptm_type::PtmType;

/// Name of the modification type without any modification
pub const UNMODIFIED_PTM_TYPE_NAME: &str = "None";

/// Returns the modification type ID for the parsed mass deltas of a sequence.
/// Each known modification sets its bit once, unknown deltas are ignored.
///
/// # Arguments
/// * `deltas` - Mass deltas in nano Dalton, see [crate::functions::mass_calculation::parse_deltas]
///
pub fn classify(deltas: &[i64]) -> u8 {
    deltas
        .iter()
        .filter_map(|delta| get_by_mass(*delta))
        .fold(0, |ptm_type_id, modification| {
            ptm_type_id | modification.get_bit()
        })
}

/// Returns all 256 modification types, starting with the unmodified type.
///
pub fn all_ptm_types() -> Vec<PtmType> {
    (0..=u8::MAX).map(PtmType::from_bitmask).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::functions::mass_calculation::parse_deltas;
    use crate::functions::sequence::ModifiedSequence;

    fn classify_str(flanked: &str) -> u8 {
        classify(&parse_deltas(&ModifiedSequence::new(flanked).unwrap()))
    }

    #[test]
    fn test_no_deltas() {
        assert_eq!(classify_str("K.PEPTIDE.R"), 0);
    }

    #[test]
    fn test_single_modification() {
        assert_eq!(classify_str("K.PEPC(57.02000)TIDE.R"), 1);
        assert_eq!(classify_str("K.PEPM(15.99)TIDE.R"), 4);
        assert_eq!(classify_str("K.PEPS(79.966)TIDE.R"), 8);
        assert_eq!(classify_str("K.E(-17.03)PEPTIDE.R"), 128);
        assert_eq!(classify_str("K.K(100.0186)PEPTIDE.R"), 16);
        assert_eq!(classify_str("K.C(71.03712)PEPTIDE.R"), 32);
        assert_eq!(classify_str("K.C(39.99492)PEPTIDE.R"), 64);
        assert_eq!(classify_str("K.K(42.01)PEPTIDE.R"), 2);
    }

    #[test]
    fn test_multiple_modifications() {
        assert_eq!(classify_str("K.M(15.99)PEPC(57.02)TIDES(79.97).R"), 1 | 4 | 8);
    }

    #[test]
    fn test_repeated_modification_sets_bit_once() {
        assert_eq!(
            classify_str("K.C(57.02)PEPC(57.02)TIDEC(57.02).R"),
            classify_str("K.C(57.02)PEPTIDE.R")
        );
    }

    #[test]
    fn test_unknown_and_malformed_deltas() {
        assert_eq!(classify_str("K.PEPC(12.34)TIDE.R"), 0);
        assert_eq!(classify_str("K.PEPC(abc)TIDEM(15.99).R"), 4);
        assert_eq!(classify_str("K.PEPC(57.05)TIDE.R"), 0);
    }

    #[test]
    fn test_build_ptm_types() {
        let ptm_types = all_ptm_types();
        assert_eq!(ptm_types.len(), 256);
        assert_eq!(ptm_types[0].get_name(), UNMODIFIED_PTM_TYPE_NAME);
        assert_eq!(ptm_types[0].get_mass_shift(), 0.0);

        let combined = &ptm_types[1 | 4];
        assert_eq!(combined.get_id(), 5);
        assert_eq!(combined.get_name(), "Carbamidomethylation;Oxidation");
        assert_eq!(combined.get_residues(), "C,K,H;M");
        assert!((combined.get_mass_shift() - (57.02 + 15.99)).abs() < 1e-6);

        let all = &ptm_types[255];
        assert_eq!(all.get_name().split(';').count(), 8);
        assert!(all.get_name().ends_with("Pyro-glu"));
    }
}
