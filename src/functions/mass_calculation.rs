// 3rd party imports
use tracing::{debug, warn};

// internal imports
use crate::chemistry::amino_acid::AminoAcid;
use crate::chemistry::molecule::{CHARGE_CARRIER_MASS, WATER_MASS};
use crate::functions::sequence::{ModifiedSequence, SequenceToken};
use crate::mass::convert::{to_float, to_int, to_mz};

/// Parses the content of a parenthesized mass delta into the internal mass representation.
/// Returns None and logs a warning if the delta is not numeric.
///
/// # Arguments
/// * `delta` - Content between the parentheses, e.g. `57.02146`
/// * `sequence` - Sequence the delta belongs to, only used for logging
///
fn parse_delta(delta: &str, sequence: &ModifiedSequence) -> Option<i64> {
    match delta.trim().parse::<f64>() {
        Ok(mass) if mass.is_finite() => Some(to_int(mass)),
        _ => {
            warn!("ignoring unparseable mass delta '({})' in {}", delta, sequence);
            None
        }
    }
}

/// Parses all mass deltas of the sequence in order of appearance, skipping unparseable ones.
/// Parse once per sequence and pass the result on, so each malformed delta is reported once.
///
/// # Arguments
/// * `sequence` - Modified sequence
///
pub fn parse_deltas(sequence: &ModifiedSequence) -> Vec<i64> {
    sequence
        .tokens()
        .filter_map(|token| match token {
            SequenceToken::Delta(delta) => parse_delta(delta, sequence),
            SequenceToken::Residue(_) => None,
        })
        .collect()
}

/// Calculates the unmodified molecular weight and the theoretical precursor m/z
/// of the given sequence, returned as `(weight, mz)` in Dalton.
///
/// * weight = residue masses + water
/// * mz = (residue masses + mass deltas + water + charge) / charge
///
/// # Arguments
/// * `sequence` - Modified sequence
/// * `deltas` - Parsed mass deltas of the sequence, see [parse_deltas]
/// * `charge` - Charge state, must be at least 1
///
pub fn calc_weight_and_precursor_mz(
    sequence: &ModifiedSequence,
    deltas: &[i64],
    charge: u8,
) -> (f64, f64) {
    let mut residue_mass: i64 = 0;
    for code in sequence.tokens().filter_map(|token| match token {
        SequenceToken::Residue(code) => Some(code),
        SequenceToken::Delta(_) => None,
    }) {
        match AminoAcid::get_by_one_letter_code(code) {
            Some(amino_acid) => residue_mass += amino_acid.get_mono_mass(),
            None => debug!("no mass for residue '{}' in {}", code, sequence),
        }
    }
    let delta_mass: i64 = deltas.iter().sum();

    let weight = to_float(residue_mass + WATER_MASS);
    let mz = to_mz(
        residue_mass + delta_mass + WATER_MASS,
        charge,
        CHARGE_CARRIER_MASS,
    );
    (weight, mz)
}
