// 3rd party imports
use serde::{Deserialize, Serialize};

/// Observed spectrum of a modified sequence at one charge state within a library module.
/// Identified by (modified sequence, module ID, charge).
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    id: i64,
    ptm_sequence: String,
    module_id: i32,
    charge: u8,
    xcorr: f64,
    delta_cn: f64,
    zscore: f64,
    precursor_mz: f64,
    theoretical_precursor_mz: f64,
    rawfile_id: String,
    fdr: f64,
    ptm_type_id: u8,
    peptide_id: i64,
}

impl Spectrum {
    /// Creates a new spectrum. The ID is assigned by the store on insertion, use `0` until then.
    ///
    /// # Arguments
    /// * `id` - Store ID
    /// * `ptm_sequence` - Modified sequence without flanks
    /// * `module_id` - ID of the owning library module
    /// * `charge` - Charge state
    /// * `xcorr` - Cross correlation score
    /// * `delta_cn` - Delta correlation
    /// * `zscore` - Z-score
    /// * `precursor_mz` - Observed precursor m/z
    /// * `theoretical_precursor_mz` - Calculated precursor m/z
    /// * `rawfile_id` - Raw file the spectrum was recorded in
    /// * `fdr` - Cumulative false discovery estimate at the time of ingestion
    /// * `ptm_type_id` - Modification type bitmask
    /// * `peptide_id` - ID of the owning peptide
    ///
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        ptm_sequence: String,
        module_id: i32,
        charge: u8,
        xcorr: f64,
        delta_cn: f64,
        zscore: f64,
        precursor_mz: f64,
        theoretical_precursor_mz: f64,
        rawfile_id: String,
        fdr: f64,
        ptm_type_id: u8,
        peptide_id: i64,
    ) -> Self {
        Self {
            id,
            ptm_sequence,
            module_id,
            charge,
            xcorr,
            delta_cn,
            zscore,
            precursor_mz,
            theoretical_precursor_mz,
            rawfile_id,
            fdr,
            ptm_type_id,
            peptide_id,
        }
    }

    /// Returns a copy of the spectrum carrying the given ID
    ///
    pub fn with_id(&self, id: i64) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }

    /// Returns true if all measured and derived attributes (everything except the IDs) are equal.
    ///
    /// # Arguments
    /// * `other` - Spectrum to compare with
    ///
    pub fn has_same_attributes(&self, other: &Spectrum) -> bool {
        self.with_id(other.id) == *other
    }

    pub fn get_id(&self) -> i64 {
        self.id
    }

    pub fn get_ptm_sequence(&self) -> &String {
        &self.ptm_sequence
    }

    pub fn get_module_id(&self) -> i32 {
        self.module_id
    }

    pub fn get_charge(&self) -> u8 {
        self.charge
    }

    pub fn get_xcorr(&self) -> f64 {
        self.xcorr
    }

    pub fn get_delta_cn(&self) -> f64 {
        self.delta_cn
    }

    pub fn get_zscore(&self) -> f64 {
        self.zscore
    }

    pub fn get_precursor_mz(&self) -> f64 {
        self.precursor_mz
    }

    pub fn get_theoretical_precursor_mz(&self) -> f64 {
        self.theoretical_precursor_mz
    }

    pub fn get_rawfile_id(&self) -> &String {
        &self.rawfile_id
    }

    pub fn get_fdr(&self) -> f64 {
        self.fdr
    }

    pub fn get_ptm_type_id(&self) -> u8 {
        self.ptm_type_id
    }

    pub fn get_peptide_id(&self) -> i64 {
        self.peptide_id
    }
}
