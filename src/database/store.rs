// std imports
use std::path::Path;

// 3rd party imports
use anyhow::Result;
use chrono::{DateTime, Utc};

// internal imports
use crate::database::memory::memory_store::MemoryStore;
use crate::database::pgsql::pgsql_store::PgsqlStore;
use crate::entities::library_module::{LibraryModule, Species};
use crate::entities::peptide::Peptide;
use crate::entities::protein::Protein;
use crate::entities::ptm_type::PtmType;
use crate::entities::spectrum::Spectrum;
use crate::entities::spectrum_protein::{SpectrumProtein, SpectrumProteinHistory};

/// URL prefixes selecting the PostgreSQL store
pub const PGSQL_URL_PREFIXES: [&str; 2] = ["postgres://", "postgresql://"];

/// Persistence of the spectral library. Every call is atomic on its own,
/// callers do not get transactions spanning multiple calls.
///
pub trait SpectrumStore {
    /// Returns the library module with the given ID
    ///
    fn get_library_module_by_id(&mut self, id: i32) -> Result<Option<LibraryModule>>;

    /// Returns the library module with the given name
    ///
    fn get_library_module_by_name(&mut self, name: &str) -> Result<Option<LibraryModule>>;

    /// Returns the species with the given ID
    ///
    fn get_species(&mut self, id: i32) -> Result<Option<Species>>;

    /// Inserts a species, fails if the ID is taken
    ///
    fn insert_species(&mut self, species: &Species) -> Result<()>;

    /// Inserts a library module, fails if ID or name are taken
    ///
    fn insert_library_module(&mut self, library_module: &LibraryModule) -> Result<()>;

    /// Returns the modification type with the given bitmask
    ///
    fn get_ptm_type(&mut self, id: u8) -> Result<Option<PtmType>>;

    /// Inserts a modification type, fails if the ID is taken
    ///
    fn insert_ptm_type(&mut self, ptm_type: &PtmType) -> Result<()>;

    /// Returns the peptide with the given unmodified sequence
    ///
    fn get_peptide_by_sequence(&mut self, sequence: &str) -> Result<Option<Peptide>>;

    /// Inserts the peptide and returns it with its assigned ID
    ///
    fn insert_peptide(&mut self, peptide: &Peptide) -> Result<Peptide>;

    /// Returns all peptides
    ///
    fn list_peptides(&mut self) -> Result<Vec<Peptide>>;

    /// Returns the spectrum identified by modified sequence, module and charge
    ///
    /// # Arguments
    /// * `ptm_sequence` - Modified sequence without flanks
    /// * `module_id` - Library module ID
    /// * `charge` - Charge state
    ///
    fn get_spectrum(
        &mut self,
        ptm_sequence: &str,
        module_id: i32,
        charge: u8,
    ) -> Result<Option<Spectrum>>;

    /// Inserts the spectrum and returns it with its assigned ID. Fails if the identifying triple is taken.
    ///
    fn insert_spectrum(&mut self, spectrum: &Spectrum) -> Result<Spectrum>;

    /// Replaces the attributes of the spectrum with the same ID
    ///
    fn update_spectrum(&mut self, spectrum: &Spectrum) -> Result<()>;

    /// Returns all spectra of the given peptide
    ///
    fn list_spectra_of_peptide(&mut self, peptide_id: i64) -> Result<Vec<Spectrum>>;

    /// Returns the protein with the given accession
    ///
    fn get_protein(&mut self, accession: &str) -> Result<Option<Protein>>;

    /// Inserts a protein
    ///
    fn insert_protein(&mut self, protein: &Protein) -> Result<()>;

    /// Returns the live protein links of the given spectrum
    ///
    fn list_spectrum_proteins(&mut self, spectrum_id: i64) -> Result<Vec<SpectrumProtein>>;

    /// Inserts the link and returns it with its assigned ID
    ///
    fn insert_spectrum_protein(&mut self, spectrum_protein: &SpectrumProtein)
        -> Result<SpectrumProtein>;

    /// Updates feature and species flags of the link with the same ID
    ///
    fn update_spectrum_protein_flags(&mut self, spectrum_protein: &SpectrumProtein) -> Result<()>;

    /// Archives the link to the history and removes it from the live links
    ///
    /// # Arguments
    /// * `spectrum_protein` - Link to retire
    /// * `retired_at` - Time of retirement
    ///
    fn retire_spectrum_protein(
        &mut self,
        spectrum_protein: &SpectrumProtein,
        retired_at: DateTime<Utc>,
    ) -> Result<SpectrumProteinHistory>;

    /// Returns the retired links of the given spectrum
    ///
    fn list_spectrum_protein_history(
        &mut self,
        spectrum_id: i64,
    ) -> Result<Vec<SpectrumProteinHistory>>;

    /// Persists pending changes. Stores writing through on each call do nothing here.
    ///
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Opens the store for the given URL. PostgreSQL URLs connect to the database and run the migrations,
/// everything else is treated as path to a JSON snapshot.
///
/// # Arguments
/// * `url` - Database URL or snapshot path
///
pub fn open_store(url: &str) -> Result<Box<dyn SpectrumStore>> {
    if PGSQL_URL_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
    {
        return Ok(Box::new(PgsqlStore::connect(url)?));
    }
    Ok(Box::new(MemoryStore::open(Path::new(url))?))
}
