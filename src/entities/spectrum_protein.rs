// 3rd party imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Link between a spectrum and a protein the peptide was matched to.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectrumProtein {
    id: i64,
    spectrum_id: i64,
    protein_accession: String,
    peptide_id: i64,
    module_id: i32,
    previous_residue: char,
    next_residue: char,
    location: Option<i64>,
    is_feature_peptide: bool,
    is_species_unique: bool,
}

impl SpectrumProtein {
    /// Creates a new spectrum protein link. The ID is assigned by the store on insertion, use `0` until then.
    ///
    /// # Arguments
    /// * `id` - Store ID
    /// * `spectrum_id` - ID of the linked spectrum
    /// * `protein_accession` - Accession of the linked protein
    /// * `peptide_id` - ID of the spectrum's peptide
    /// * `module_id` - ID of the spectrum's library module
    /// * `previous_residue` - Flanking residue before the peptide
    /// * `next_residue` - Flanking residue after the peptide
    /// * `location` - Offset of the peptide within the protein sequence, None if not found
    /// * `is_feature_peptide` - Peptide is unique to this sequence, charge and module
    /// * `is_species_unique` - Peptide is unique within the species of the module
    ///
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        spectrum_id: i64,
        protein_accession: String,
        peptide_id: i64,
        module_id: i32,
        previous_residue: char,
        next_residue: char,
        location: Option<i64>,
        is_feature_peptide: bool,
        is_species_unique: bool,
    ) -> Self {
        Self {
            id,
            spectrum_id,
            protein_accession,
            peptide_id,
            module_id,
            previous_residue,
            next_residue,
            location,
            is_feature_peptide,
            is_species_unique,
        }
    }

    /// Returns a copy of the link carrying the given ID
    ///
    pub fn with_id(&self, id: i64) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }

    /// Returns a copy of the link with the given uniqueness flags
    ///
    pub fn with_flags(&self, is_feature_peptide: bool, is_species_unique: bool) -> Self {
        Self {
            is_feature_peptide,
            is_species_unique,
            ..self.clone()
        }
    }

    pub fn get_id(&self) -> i64 {
        self.id
    }

    pub fn get_spectrum_id(&self) -> i64 {
        self.spectrum_id
    }

    pub fn get_protein_accession(&self) -> &String {
        &self.protein_accession
    }

    pub fn get_peptide_id(&self) -> i64 {
        self.peptide_id
    }

    pub fn get_module_id(&self) -> i32 {
        self.module_id
    }

    pub fn get_previous_residue(&self) -> char {
        self.previous_residue
    }

    pub fn get_next_residue(&self) -> char {
        self.next_residue
    }

    pub fn get_location(&self) -> Option<i64> {
        self.location
    }

    pub fn get_is_feature_peptide(&self) -> bool {
        self.is_feature_peptide
    }

    pub fn get_is_species_unique(&self) -> bool {
        self.is_species_unique
    }
}

/// Archived copy of a retired spectrum protein link
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectrumProteinHistory {
    spectrum_protein: SpectrumProtein,
    retired_at: DateTime<Utc>,
}

impl SpectrumProteinHistory {
    /// Creates a new history entry for the given link
    ///
    /// # Arguments
    /// * `spectrum_protein` - The retired link
    /// * `retired_at` - Time of retirement
    ///
    pub fn new(spectrum_protein: SpectrumProtein, retired_at: DateTime<Utc>) -> Self {
        Self {
            spectrum_protein,
            retired_at,
        }
    }

    pub fn get_spectrum_protein(&self) -> &SpectrumProtein {
        &self.spectrum_protein
    }

    pub fn get_retired_at(&self) -> &DateTime<Utc> {
        &self.retired_at
    }
}
