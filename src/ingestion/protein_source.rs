// std imports
use std::collections::HashMap;
use std::path::Path;

// 3rd party imports
use anyhow::Result;
use fallible_iterator::FallibleIterator;
use tracing::info;

// internal imports
use crate::entities::protein::Protein;
use crate::io::uniprot_text::reader::Reader;

/// Buffer size for reading UniProt text files
const UNIPROT_BUFFER_SIZE: usize = 1024 * 1024;

/// Provides proteins which are not yet known to the store
///
pub trait ProteinSource {
    /// Returns the protein with the given primary accession, None if the source does not know it
    ///
    fn fetch(&mut self, accession: &str) -> Result<Option<Protein>>;
}

impl ProteinSource for HashMap<String, Protein> {
    fn fetch(&mut self, accession: &str) -> Result<Option<Protein>> {
        Ok(self.get(accession).cloned())
    }
}

/// Source knowing no proteins, every accession not in the store stays unresolved
///
pub struct EmptyProteinSource;

impl ProteinSource for EmptyProteinSource {
    fn fetch(&mut self, _accession: &str) -> Result<Option<Protein>> {
        Ok(None)
    }
}

/// Proteins read from a local UniProt text file, indexed by primary accession
///
pub struct UniprotTextSource {
    proteins: HashMap<String, Protein>,
}

impl UniprotTextSource {
    /// Reads all entries of the given file
    ///
    /// # Arguments
    /// * `uniprot_txt_file_path` - Path to UniProt text file
    ///
    pub fn from_file(uniprot_txt_file_path: &Path) -> Result<Self> {
        let mut reader = Reader::open(uniprot_txt_file_path, UNIPROT_BUFFER_SIZE)?;
        let mut proteins = HashMap::new();
        while let Some(protein) = reader.next()? {
            proteins.insert(protein.get_accession().clone(), protein);
        }
        info!(
            "Loaded {} proteins from {}",
            proteins.len(),
            uniprot_txt_file_path.display()
        );
        Ok(Self { proteins })
    }

    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }
}

impl ProteinSource for UniprotTextSource {
    fn fetch(&mut self, accession: &str) -> Result<Option<Protein>> {
        self.proteins.fetch(accession)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::tests::UNIPROT_TEST_FILE;

    #[test]
    fn test_uniprot_text_source() {
        let mut source = UniprotTextSource::from_file(Path::new(UNIPROT_TEST_FILE)).unwrap();
        assert_eq!(source.len(), 2);
        let protein = source.fetch("P12345").unwrap().unwrap();
        assert_eq!(protein.get_entry_name(), "PEPT_HUMAN");
        // Secondary accessions are not resolved
        assert!(source.fetch("A0A000").unwrap().is_none());
        assert!(source.fetch("X00000").unwrap().is_none());
    }

    #[test]
    fn test_empty_source() {
        assert!(EmptyProteinSource.fetch("P12345").unwrap().is_none());
    }
}
