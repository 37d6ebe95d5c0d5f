// 3rd party imports
use thiserror::Error;

// internal imports
use crate::chemistry::amino_acid::REPLACEABLE_AMBIGIOUS_AMINO_ACID_LOOKUP;
use crate::functions::sequence::ModifiedSequence;

/// Default limit of ambiguous residues per sequence. 12 occurrences already result in 4096 variants.
pub const MAX_AMBIGUOUS_RESIDUES: usize = 12;

#[derive(Debug, Error, PartialEq)]
pub enum VariantExpansionError {
    #[error("sequence '{sequence}' contains {occurrences} ambiguous residues, limit is {limit}")]
    TooManyAmbiguousResidues {
        sequence: String,
        occurrences: usize,
        limit: usize,
    },
}

/// Expands every ambiguous residue (B, J, Z) of the given sequence into its two alternatives.
/// The expansion works breadth-wise over the ambiguous positions, so `k` occurrences
/// result in exactly `2^k` variants. Without ambiguous residues the sequence itself is returned.
///
/// # Arguments
/// * `sequence` - Modified sequence, may contain ambiguous residues
/// * `max_ambiguous_residues` - Maximum number of ambiguous occurrences before the expansion is refused
///
pub fn expand_variants(
    sequence: &ModifiedSequence,
    max_ambiguous_residues: usize,
) -> Result<Vec<ModifiedSequence>, VariantExpansionError> {
    let ambiguous_positions: Vec<(usize, [char; 2])> = sequence
        .residue_offsets()
        .into_iter()
        .filter_map(|(offset, code)| {
            REPLACEABLE_AMBIGIOUS_AMINO_ACID_LOOKUP
                .get(&code)
                .map(|alternatives| {
                    (
                        offset,
                        [
                            *alternatives[0].get_one_letter_code(),
                            *alternatives[1].get_one_letter_code(),
                        ],
                    )
                })
        })
        .collect();

    if ambiguous_positions.len() > max_ambiguous_residues {
        return Err(VariantExpansionError::TooManyAmbiguousResidues {
            sequence: sequence.to_string(),
            occurrences: ambiguous_positions.len(),
            limit: max_ambiguous_residues,
        });
    }

    let mut variants: Vec<ModifiedSequence> = vec![sequence.clone()];
    for (offset, alternatives) in ambiguous_positions {
        variants = variants
            .iter()
            .flat_map(|variant| {
                alternatives
                    .iter()
                    .map(move |alternative| variant.with_replaced_residue(offset, *alternative))
            })
            .collect();
    }
    Ok(variants)
}

#[cfg(test)]
mod test {
    // std imports
    use std::collections::HashSet;

    use super::*;

    fn expand(flanked: &str) -> Vec<String> {
        expand_variants(&ModifiedSequence::new(flanked).unwrap(), MAX_AMBIGUOUS_RESIDUES)
            .unwrap()
            .into_iter()
            .map(|variant| variant.get_flanked().to_string())
            .collect()
    }

    #[test]
    fn test_no_ambiguous_residues() {
        assert_eq!(expand("K.PEPTIDE.R"), vec!["K.PEPTIDE.R"]);
    }

    #[test]
    fn test_each_code_expands_to_its_alternatives() {
        assert_eq!(expand("K.PZP.R"), vec!["K.PEP.R", "K.PQP.R"]);
        assert_eq!(expand("K.PBP.R"), vec!["K.PDP.R", "K.PNP.R"]);
        assert_eq!(expand("K.PJP.R"), vec!["K.PLP.R", "K.PIP.R"]);
    }

    #[test]
    fn test_variant_count_is_power_of_two() {
        for (flanked, occurrences) in [
            ("K.BZJ.R", 3),
            ("K.ZZZZ.R", 4),
            ("K.AB(15.99)CZ.R", 2),
            ("-.JJJJJJ.-", 6),
        ] {
            let variants = expand(flanked);
            assert_eq!(variants.len(), 1 << occurrences);
            let distinct: HashSet<&String> = variants.iter().collect();
            assert_eq!(distinct.len(), variants.len());
            for variant in variants.iter() {
                assert_eq!(variant.len(), flanked.len());
                assert!(!variant[2..variant.len() - 2].contains(['B', 'J', 'Z']));
            }
        }
    }

    #[test]
    fn test_flanks_are_not_expanded() {
        assert_eq!(expand("Z.PEP.B"), vec!["Z.PEP.B"]);
    }

    #[test]
    fn test_limit() {
        let sequence = ModifiedSequence::new("K.ZZZ.R").unwrap();
        assert_eq!(
            expand_variants(&sequence, 2),
            Err(VariantExpansionError::TooManyAmbiguousResidues {
                sequence: "K.ZZZ.R".to_string(),
                occurrences: 3,
                limit: 2
            })
        );
        assert_eq!(expand_variants(&sequence, 3).unwrap().len(), 8);
    }
}
