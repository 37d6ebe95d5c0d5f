// 3rd party imports
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Keeps the protein data necessary to link spectra, taken from a UniProt entry
///
pub struct Protein {
    accession: String,
    secondary_accessions: Vec<String>,
    entry_name: String,
    name: String,
    genes: Vec<String>,
    taxonomy_id: i64,
    is_reviewed: bool,
    sequence: String,
}

impl Protein {
    /// Creates a new protein
    ///
    /// # Arguments
    /// * `accession` - The primary accession
    /// * `secondary_accessions` - The secondary accessions
    /// * `entry_name` - The entry name
    /// * `name` - The protein name
    /// * `genes` - The genes name
    /// * `taxonomy_id` - The taxonomy ID
    /// * `is_reviewed` - True if the protein is reviewed (contained by SwissProt)
    /// * `sequence` - The amino acid sequence
    ///
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        accession: String,
        secondary_accessions: Vec<String>,
        entry_name: String,
        name: String,
        genes: Vec<String>,
        taxonomy_id: i64,
        is_reviewed: bool,
        sequence: String,
    ) -> Self {
        Self {
            accession,
            secondary_accessions,
            entry_name,
            name,
            genes,
            taxonomy_id,
            is_reviewed,
            sequence,
        }
    }

    /// Returns the primary accession
    ///
    pub fn get_accession(&self) -> &String {
        &self.accession
    }

    /// Returns the secondary accessions
    ///
    pub fn get_secondary_accessions(&self) -> &Vec<String> {
        &self.secondary_accessions
    }

    /// Returns the entry name
    ///
    pub fn get_entry_name(&self) -> &String {
        &self.entry_name
    }

    /// Returns the protein name
    ///
    pub fn get_name(&self) -> &String {
        &self.name
    }

    /// Returns the genes
    ///
    pub fn get_genes(&self) -> &Vec<String> {
        &self.genes
    }

    /// Returns the taxonomy ID
    ///
    pub fn get_taxonomy_id(&self) -> &i64 {
        &self.taxonomy_id
    }

    /// Returns true if the protein is reviewed (contained by SwissProt)
    ///
    pub fn get_is_reviewed(&self) -> bool {
        self.is_reviewed
    }

    /// Returns the amino acid sequence
    ///
    pub fn get_sequence(&self) -> &String {
        &self.sequence
    }

    /// Returns the offset of the first exact occurrence of the given peptide sequence, None if not contained.
    ///
    /// # Arguments
    /// * `peptide_sequence` - Unmodified peptide sequence
    ///
    pub fn locate(&self, peptide_sequence: &str) -> Option<i64> {
        if peptide_sequence.is_empty() {
            return None;
        }
        self.sequence
            .find(peptide_sequence)
            .map(|offset| offset as i64)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_locate() {
        let protein = Protein::new(
            "P12345".to_string(),
            vec![],
            "TEST_HUMAN".to_string(),
            "Test protein".to_string(),
            vec![],
            9606,
            true,
            "MKPEPTIDERPEPTIDE".to_string(),
        );
        assert_eq!(protein.locate("PEPTIDE"), Some(2));
        assert_eq!(protein.locate("MK"), Some(0));
        assert_eq!(protein.locate("PEPTIDES"), None);
        assert_eq!(protein.locate(""), None);
    }
}
