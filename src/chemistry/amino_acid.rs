/// Module containing amino acid information

// std imports
use std::collections::HashMap;

pub struct AminoAcid {
    name: &'static str,
    one_letter_code: char,
    three_letter_code: &'static str,
    mono_mass: i64,
}

impl AminoAcid {
    /// Returns the standard amino acid for the given one letter code.
    /// Ambiguous codes (B, J, Z) and non-standard residues are not part of the table.
    ///
    /// # Arguments
    /// * `one_letter_code` - One letter code of the amino acid
    ///
    pub fn get_by_one_letter_code(one_letter_code: char) -> Option<&'static Self> {
        match one_letter_code {
            'A' => Some(&ALANINE),
            'C' => Some(&CYSTEINE),
            'D' => Some(&ASPARTIC_ACID),
            'E' => Some(&GLUTAMIC_ACID),
            'F' => Some(&PHENYLALANINE),
            'G' => Some(&GLYCINE),
            'H' => Some(&HISTIDINE),
            'I' => Some(&ISOLEUCINE),
            'K' => Some(&LYSINE),
            'L' => Some(&LEUCINE),
            'M' => Some(&METHIONINE),
            'N' => Some(&ASPARAGINE),
            'P' => Some(&PROLINE),
            'Q' => Some(&GLUTAMINE),
            'R' => Some(&ARGININE),
            'S' => Some(&SERINE),
            'T' => Some(&THREONINE),
            'V' => Some(&VALINE),
            'W' => Some(&TRYPTOPHAN),
            'Y' => Some(&TYROSINE),
            _ => None,
        }
    }

    pub fn get_all() -> &'static [&'static AminoAcid; 20] {
        &ALL
    }

    pub fn get_name(&self) -> &'static str {
        self.name
    }

    pub fn get_one_letter_code(&self) -> &char {
        &self.one_letter_code
    }

    pub fn get_three_letter_code(&self) -> &'static str {
        self.three_letter_code
    }

    pub fn get_mono_mass(&self) -> &i64 {
        &self.mono_mass
    }
}

// Standard amino acids, monoisotopic residue masses rounded to five decimals as stored in the library.
// https://proteomicsresource.washington.edu/protocols06/masses.php
pub const ALANINE:                  AminoAcid = AminoAcid{name: "Alanine",              one_letter_code: 'A',   three_letter_code: "Ala",   mono_mass: mass_to_int!(71.03711_f64)};
pub const CYSTEINE:                 AminoAcid = AminoAcid{name: "Cysteine",             one_letter_code: 'C',   three_letter_code: "Cys",   mono_mass: mass_to_int!(103.00919_f64)};
pub const ASPARTIC_ACID:            AminoAcid = AminoAcid{name: "Aspartic acid",        one_letter_code: 'D',   three_letter_code: "Asp",   mono_mass: mass_to_int!(115.02694_f64)};
pub const GLUTAMIC_ACID:            AminoAcid = AminoAcid{name: "Glutamic acid",        one_letter_code: 'E',   three_letter_code: "Glu",   mono_mass: mass_to_int!(129.04259_f64)};
pub const PHENYLALANINE:            AminoAcid = AminoAcid{name: "Phenylalanine",        one_letter_code: 'F',   three_letter_code: "Phe",   mono_mass: mass_to_int!(147.06841_f64)};
pub const GLYCINE:                  AminoAcid = AminoAcid{name: "Glycine",              one_letter_code: 'G',   three_letter_code: "Gly",   mono_mass: mass_to_int!(57.02146_f64)};
pub const HISTIDINE:                AminoAcid = AminoAcid{name: "Histidine",            one_letter_code: 'H',   three_letter_code: "His",   mono_mass: mass_to_int!(137.05891_f64)};
pub const ISOLEUCINE:               AminoAcid = AminoAcid{name: "Isoleucine",           one_letter_code: 'I',   three_letter_code: "Ile",   mono_mass: mass_to_int!(113.08406_f64)};
pub const LYSINE:                   AminoAcid = AminoAcid{name: "Lysine",               one_letter_code: 'K',   three_letter_code: "Lys",   mono_mass: mass_to_int!(128.09496_f64)};
pub const LEUCINE:                  AminoAcid = AminoAcid{name: "Leucine",              one_letter_code: 'L',   three_letter_code: "Leu",   mono_mass: mass_to_int!(113.08406_f64)};
pub const METHIONINE:               AminoAcid = AminoAcid{name: "Methionine",           one_letter_code: 'M',   three_letter_code: "Met",   mono_mass: mass_to_int!(131.04048_f64)};
pub const ASPARAGINE:               AminoAcid = AminoAcid{name: "Asparagine",           one_letter_code: 'N',   three_letter_code: "Asn",   mono_mass: mass_to_int!(114.04293_f64)};
pub const PROLINE:                  AminoAcid = AminoAcid{name: "Proline",              one_letter_code: 'P',   three_letter_code: "Pro",   mono_mass: mass_to_int!(97.05276_f64)};
pub const GLUTAMINE:                AminoAcid = AminoAcid{name: "Glutamine",            one_letter_code: 'Q',   three_letter_code: "Gln",   mono_mass: mass_to_int!(128.05858_f64)};
pub const ARGININE:                 AminoAcid = AminoAcid{name: "Arginine",             one_letter_code: 'R',   three_letter_code: "Arg",   mono_mass: mass_to_int!(156.10111_f64)};
pub const SERINE:                   AminoAcid = AminoAcid{name: "Serine",               one_letter_code: 'S',   three_letter_code: "Ser",   mono_mass: mass_to_int!(87.03202_f64)};
pub const THREONINE:                AminoAcid = AminoAcid{name: "Threonine",            one_letter_code: 'T',   three_letter_code: "Thr",   mono_mass: mass_to_int!(101.04768_f64)};
pub const VALINE:                   AminoAcid = AminoAcid{name: "Valine",               one_letter_code: 'V',   three_letter_code: "Val",   mono_mass: mass_to_int!(99.06841_f64)};
pub const TRYPTOPHAN:               AminoAcid = AminoAcid{name: "Tryptophan",           one_letter_code: 'W',   three_letter_code: "Trp",   mono_mass: mass_to_int!(186.07931_f64)};
pub const TYROSINE:                 AminoAcid = AminoAcid{name: "Tyrosine",             one_letter_code: 'Y',   three_letter_code: "Tyr",   mono_mass: mass_to_int!(163.06333_f64)};

const ALL: [&'static AminoAcid; 20] = [
    &ALANINE,
    &CYSTEINE,
    &ASPARTIC_ACID,
    &GLUTAMIC_ACID,
    &PHENYLALANINE,
    &GLYCINE,
    &HISTIDINE,
    &ISOLEUCINE,
    &LYSINE,
    &LEUCINE,
    &METHIONINE,
    &ASPARAGINE,
    &PROLINE,
    &GLUTAMINE,
    &ARGININE,
    &SERINE,
    &THREONINE,
    &VALINE,
    &TRYPTOPHAN,
    &TYROSINE,
];

lazy_static! {
    /// Ambiguous one letter codes and the two residues each of them may stand for.
    pub static ref REPLACEABLE_AMBIGIOUS_AMINO_ACID_LOOKUP: HashMap<char, [&'static AminoAcid; 2]> = HashMap::from([
        ('B', [&ASPARTIC_ACID, &ASPARAGINE]),
        ('J', [&LEUCINE, &ISOLEUCINE]),
        ('Z', [&GLUTAMIC_ACID, &GLUTAMINE]),
    ]);
}

/// Returns true if the given one letter code is one of the ambiguous codes B, J or Z.
///
/// # Arguments
/// * `one_letter_code` - One letter code
///
pub fn is_ambiguous(one_letter_code: char) -> bool {
    REPLACEABLE_AMBIGIOUS_AMINO_ACID_LOOKUP.contains_key(&one_letter_code)
}

#[cfg(test)]
mod test {
    // internal imports
    use crate::mass::convert::to_float;
    use super::*;

    // Raw values of amino acids without mass conversion.
    const RAW_AMINO_ACID_VALUES: [(&'static str, char, &'static str, f64); 20] = [
        ("Alanine",                         'A',    "Ala",  71.03711_f64),
        ("Cysteine",                        'C',    "Cys",  103.00919_f64),
        ("Aspartic acid",                   'D',    "Asp",  115.02694_f64),
        ("Glutamic acid",                   'E',    "Glu",  129.04259_f64),
        ("Phenylalanine",                   'F',    "Phe",  147.06841_f64),
        ("Glycine",                         'G',    "Gly",  57.02146_f64),
        ("Histidine",                       'H',    "His",  137.05891_f64),
        ("Isoleucine",                      'I',    "Ile",  113.08406_f64),
        ("Lysine",                          'K',    "Lys",  128.09496_f64),
        ("Leucine",                         'L',    "Leu",  113.08406_f64),
        ("Methionine",                      'M',    "Met",  131.04048_f64),
        ("Asparagine",                      'N',    "Asn",  114.04293_f64),
        ("Proline",                         'P',    "Pro",  97.05276_f64),
        ("Glutamine",                       'Q',    "Gln",  128.05858_f64),
        ("Arginine",                        'R',    "Arg",  156.10111_f64),
        ("Serine",                          'S',    "Ser",  87.03202_f64),
        ("Threonine",                       'T',    "Thr",  101.04768_f64),
        ("Valine",                          'V',    "Val",  99.06841_f64),
        ("Tryptophan",                      'W',    "Trp",  186.07931_f64),
        ("Tyrosine",                        'Y',    "Tyr",  163.06333_f64),
    ];

    #[test]
    fn test_get_by_one_letter_code_and_value_correctness() {
        for raw_value_tuple in &RAW_AMINO_ACID_VALUES {
            let amino_acid: &AminoAcid = AminoAcid::get_by_one_letter_code(raw_value_tuple.1).unwrap();
            assert_eq!(amino_acid.get_name(), raw_value_tuple.0);
            assert_eq!(*amino_acid.get_one_letter_code(), raw_value_tuple.1);
            assert_eq!(amino_acid.get_three_letter_code(), raw_value_tuple.2);
            // Macro truncates, so allow one nano dalton of difference
            assert!((to_float(*amino_acid.get_mono_mass()) - raw_value_tuple.3).abs() < 1e-8);
        }
    }

    #[test]
    fn test_all_array_is_complete() {
        let known_amino_acids = AminoAcid::get_all();
        assert_eq!(known_amino_acids.len(), RAW_AMINO_ACID_VALUES.len());
        for amino_acid in known_amino_acids {
            assert!(
                RAW_AMINO_ACID_VALUES.iter().any(|raw| raw.1 == *amino_acid.get_one_letter_code()),
                "Did not found {} in `RAW_AMINO_ACID_VALUES`.",
                amino_acid.get_name()
            );
        }
    }

    #[test]
    fn test_ambiguous_codes_are_not_in_mass_table() {
        for code in ['B', 'J', 'Z', 'X', 'U', 'O', 'a'] {
            assert!(AminoAcid::get_by_one_letter_code(code).is_none());
        }
        assert!(is_ambiguous('B'));
        assert!(is_ambiguous('J'));
        assert!(is_ambiguous('Z'));
        assert!(!is_ambiguous('L'));
    }

    #[test]
    fn test_ambiguous_lookup_alternatives() {
        let codes: Vec<char> = REPLACEABLE_AMBIGIOUS_AMINO_ACID_LOOKUP
            .get(&'Z')
            .unwrap()
            .iter()
            .map(|aa| *aa.get_one_letter_code())
            .collect();
        assert_eq!(codes, vec!['E', 'Q']);
        assert_eq!(REPLACEABLE_AMBIGIOUS_AMINO_ACID_LOOKUP.len(), 3);
    }
}
