// std imports
use std::fmt::Display;

// 3rd party imports
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of characters on each side of a library sequence describing the flanking residues, e.g. `K.` and `.R`
pub const FLANK_LENGTH: usize = 2;

/// Errors when a library sequence cannot be interpreted
#[derive(Debug, Error, PartialEq)]
pub enum SequenceError {
    #[error("sequence '{0}' is too short to contain both flanks")]
    TooShort(String),
    #[error("sequence '{0}' contains non-ASCII characters")]
    NonAscii(String),
}

/// Token of a modified sequence
#[derive(Debug, Clone, PartialEq)]
pub enum SequenceToken<'a> {
    /// Residue by one letter code
    Residue(char),
    /// Content of a parenthesized mass delta, as written in the sequence
    Delta(&'a str),
}

/// Residue sequence with embedded parenthesized mass deltas, framed by the
/// flanking residues of the source protein, e.g. `K.PEPC(57.02)TIDE.R`
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifiedSequence {
    flanked: String,
}

impl ModifiedSequence {
    /// Creates a new modified sequence from the flanked library notation.
    ///
    /// # Arguments
    /// * `flanked` - Sequence including both flanks
    ///
    pub fn new(flanked: &str) -> Result<Self, SequenceError> {
        if !flanked.is_ascii() {
            return Err(SequenceError::NonAscii(flanked.to_string()));
        }
        if flanked.len() < 2 * FLANK_LENGTH {
            return Err(SequenceError::TooShort(flanked.to_string()));
        }
        Ok(Self {
            flanked: flanked.to_string(),
        })
    }

    /// Returns the sequence including the flanks
    ///
    pub fn get_flanked(&self) -> &str {
        &self.flanked
    }

    /// Returns the modified sequence without flanks, e.g. `PEPC(57.02)TIDE`
    ///
    pub fn get_inner(&self) -> &str {
        &self.flanked[FLANK_LENGTH..self.flanked.len() - FLANK_LENGTH]
    }

    /// Returns the residue preceding the peptide in the protein
    ///
    pub fn get_previous_residue(&self) -> char {
        self.flanked.as_bytes()[0] as char
    }

    /// Returns the residue following the peptide in the protein
    ///
    pub fn get_next_residue(&self) -> char {
        self.flanked.as_bytes()[self.flanked.len() - 1] as char
    }

    /// Returns the bare residue sequence, all mass deltas stripped
    ///
    pub fn get_unmodified(&self) -> String {
        self.tokens()
            .filter_map(|token| match token {
                SequenceToken::Residue(code) => Some(code),
                SequenceToken::Delta(_) => None,
            })
            .collect()
    }

    /// Returns a copy with the inner character at the given byte offset replaced.
    /// Flanks are never touched by the variant expansion, so the offset is relative to the inner sequence.
    ///
    /// # Arguments
    /// * `inner_offset` - Offset within the inner sequence
    /// * `replacement` - New one letter code
    ///
    pub fn with_replaced_residue(&self, inner_offset: usize, replacement: char) -> Self {
        let absolute_offset = FLANK_LENGTH + inner_offset;
        let mut flanked = String::with_capacity(self.flanked.len());
        flanked.push_str(&self.flanked[..absolute_offset]);
        flanked.push(replacement);
        flanked.push_str(&self.flanked[absolute_offset + 1..]);
        Self { flanked }
    }

    /// Returns the offsets (within the inner sequence) of all residues, skipping anything inside parentheses.
    ///
    pub fn residue_offsets(&self) -> Vec<(usize, char)> {
        let mut offsets = Vec::new();
        let mut in_delta = false;
        for (offset, character) in self.get_inner().char_indices() {
            match character {
                '(' => in_delta = true,
                ')' => in_delta = false,
                _ if !in_delta && character.is_ascii_alphabetic() => {
                    offsets.push((offset, character))
                }
                _ => {}
            }
        }
        offsets
    }

    /// Iterates the inner sequence as residues and mass deltas.
    ///
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens {
            remaining: self.get_inner(),
        }
    }
}

impl Display for ModifiedSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.flanked)
    }
}

/// Iterator over the tokens of a modified sequence.
/// An opening parenthesis without a closing one consumes the rest of the sequence as delta.
///
pub struct Tokens<'a> {
    remaining: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = SequenceToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let first = self.remaining.chars().next()?;
            if first == '(' {
                let content = &self.remaining[1..];
                return match content.find(')') {
                    Some(end) => {
                        self.remaining = &content[end + 1..];
                        Some(SequenceToken::Delta(&content[..end]))
                    }
                    None => {
                        self.remaining = "";
                        Some(SequenceToken::Delta(content))
                    }
                };
            }
            self.remaining = &self.remaining[first.len_utf8()..];
            if first.is_ascii_alphabetic() {
                return Some(SequenceToken::Residue(first));
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_flanks_are_stripped() {
        let sequence = ModifiedSequence::new("K.PEPC(57.02)TIDE.R").unwrap();
        assert_eq!(sequence.get_inner(), "PEPC(57.02)TIDE");
        assert_eq!(sequence.get_previous_residue(), 'K');
        assert_eq!(sequence.get_next_residue(), 'R');
        assert_eq!(sequence.get_unmodified(), "PEPCTIDE");

        let sequence = ModifiedSequence::new("AAPEPTIDEAA").unwrap();
        assert_eq!(sequence.get_inner(), "PEPTIDE");
        assert_eq!(sequence.get_unmodified(), "PEPTIDE");
    }

    #[test]
    fn test_invalid_sequences() {
        assert_eq!(
            ModifiedSequence::new("K.R"),
            Err(SequenceError::TooShort("K.R".to_string()))
        );
        assert!(matches!(
            ModifiedSequence::new("K.PEPTÍDE.R"),
            Err(SequenceError::NonAscii(_))
        ));
    }

    #[test]
    fn test_tokens() {
        let sequence = ModifiedSequence::new("-.M(15.99)AC(abc)K.-").unwrap();
        let tokens: Vec<SequenceToken> = sequence.tokens().collect();
        assert_eq!(
            tokens,
            vec![
                SequenceToken::Residue('M'),
                SequenceToken::Delta("15.99"),
                SequenceToken::Residue('A'),
                SequenceToken::Residue('C'),
                SequenceToken::Delta("abc"),
                SequenceToken::Residue('K'),
            ]
        );

        let sequence = ModifiedSequence::new("-.PEP(12.3.-").unwrap();
        let tokens: Vec<SequenceToken> = sequence.tokens().collect();
        assert_eq!(tokens.last(), Some(&SequenceToken::Delta("12.3")));
    }

    #[test]
    fn test_residue_offsets_skip_deltas() {
        let sequence = ModifiedSequence::new("K.AB(1.0)Z.R").unwrap();
        assert_eq!(
            sequence.residue_offsets(),
            vec![(0, 'A'), (1, 'B'), (7, 'Z')]
        );
        let replaced = sequence.with_replaced_residue(7, 'Q');
        assert_eq!(replaced.get_flanked(), "K.AB(1.0)Q.R");
    }
}
