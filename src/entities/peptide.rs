// std imports
use std::hash::{Hash, Hasher};

// 3rd party imports
use serde::{Deserialize, Serialize};

/// Canonical peptide, identified by its unmodified residue sequence.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Peptide {
    id: i64,
    sequence: String,
    length: usize,
    molecular_weight: f64,
}

impl Peptide {
    /// Creates a new peptide. The ID is assigned by the store on insertion, use `0` until then.
    ///
    /// # Arguments
    /// * `id` - Store ID
    /// * `sequence` - Unmodified residue sequence
    /// * `molecular_weight` - Unmodified molecular weight in Dalton
    ///
    pub fn new(id: i64, sequence: String, molecular_weight: f64) -> Self {
        Self {
            id,
            length: sequence.len(),
            sequence,
            molecular_weight,
        }
    }

    /// Returns a copy of the peptide carrying the given ID
    ///
    pub fn with_id(&self, id: i64) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }

    pub fn get_id(&self) -> i64 {
        self.id
    }

    pub fn get_sequence(&self) -> &String {
        &self.sequence
    }

    pub fn get_length(&self) -> usize {
        self.length
    }

    pub fn get_molecular_weight(&self) -> f64 {
        self.molecular_weight
    }
}

impl PartialEq for Peptide {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl Eq for Peptide {}

impl Hash for Peptide {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sequence.hash(state);
    }
}
