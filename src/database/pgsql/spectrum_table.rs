// 3rd party imports
use anyhow::{bail, Result};
use postgres::{GenericClient, Row};

// internal imports
use crate::database::errors::store_error::StoreError;
use crate::database::pgsql::table::{placeholders_for, Table};
use crate::entities::spectrum::Spectrum;

const TABLE_NAME: &str = "spectra";

const SELECT_COLS: &str = "id, ptm_sequence, module_id, charge, xcorr, delta_cn, zscore, \
    precursor_mz, theoretical_precursor_mz, rawfile_id, fdr, ptm_type_id, peptide_id";

const INSERT_COLS: &str = "ptm_sequence, module_id, charge, xcorr, delta_cn, zscore, \
    precursor_mz, theoretical_precursor_mz, rawfile_id, fdr, ptm_type_id, peptide_id";

/// Columns which may change when a spectrum is reconciled, the identifying triple never changes
const UPDATE_COLS: &str =
    "xcorr, delta_cn, zscore, precursor_mz, theoretical_precursor_mz, rawfile_id, fdr, ptm_type_id, peptide_id";

lazy_static! {
    static ref INSERT_PLACEHOLDERS: String = placeholders_for(INSERT_COLS);
    static ref UPDATE_SET_PLACEHOLDER: String = UPDATE_COLS
        .split(", ")
        .enumerate()
        .map(|(i, col)| format!("{} = ${}", col, i + 1))
        .collect::<Vec<String>>()
        .join(", ");
    static ref UPDATE_COLS_WHERE_ID_NUM: usize = UPDATE_SET_PLACEHOLDER.matches('=').count() + 1;
}

impl From<Row> for Spectrum {
    fn from(row: Row) -> Self {
        Spectrum::new(
            row.get("id"),
            row.get("ptm_sequence"),
            row.get("module_id"),
            row.get::<_, i16>("charge") as u8,
            row.get("xcorr"),
            row.get("delta_cn"),
            row.get("zscore"),
            row.get("precursor_mz"),
            row.get("theoretical_precursor_mz"),
            row.get("rawfile_id"),
            row.get("fdr"),
            row.get::<_, i16>("ptm_type_id") as u8,
            row.get("peptide_id"),
        )
    }
}

pub struct SpectrumTable {}

impl SpectrumTable {
    /// Inserts the spectrum and returns its ID
    ///
    /// # Arguments
    /// * `client` - Database client or open transaction
    /// * `spectrum` - Spectrum to insert
    ///
    pub fn insert<C: GenericClient>(client: &mut C, spectrum: &Spectrum) -> Result<i64> {
        let statement = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            TABLE_NAME,
            INSERT_COLS,
            INSERT_PLACEHOLDERS.as_str()
        );
        let row = client.query_one(
            &statement,
            &[
                spectrum.get_ptm_sequence(),
                &spectrum.get_module_id(),
                &(spectrum.get_charge() as i16),
                &spectrum.get_xcorr(),
                &spectrum.get_delta_cn(),
                &spectrum.get_zscore(),
                &spectrum.get_precursor_mz(),
                &spectrum.get_theoretical_precursor_mz(),
                spectrum.get_rawfile_id(),
                &spectrum.get_fdr(),
                &(spectrum.get_ptm_type_id() as i16),
                &spectrum.get_peptide_id(),
            ],
        )?;
        Ok(row.get(0))
    }

    /// Updates the measured and derived attributes of the spectrum with the same ID
    ///
    /// # Arguments
    /// * `client` - Database client or open transaction
    /// * `spectrum` - Spectrum with new attributes
    ///
    pub fn update<C: GenericClient>(client: &mut C, spectrum: &Spectrum) -> Result<()> {
        let statement = format!(
            "UPDATE {} SET {} WHERE id = ${}",
            TABLE_NAME,
            UPDATE_SET_PLACEHOLDER.as_str(),
            *UPDATE_COLS_WHERE_ID_NUM
        );
        let num_updated = client.execute(
            &statement,
            &[
                &spectrum.get_xcorr(),
                &spectrum.get_delta_cn(),
                &spectrum.get_zscore(),
                &spectrum.get_precursor_mz(),
                &spectrum.get_theoretical_precursor_mz(),
                spectrum.get_rawfile_id(),
                &spectrum.get_fdr(),
                &(spectrum.get_ptm_type_id() as i16),
                &spectrum.get_peptide_id(),
                &spectrum.get_id(),
            ],
        )?;
        if num_updated == 0 {
            bail!(StoreError::NotFound {
                entity: "spectrum",
                key: spectrum.get_id().to_string()
            });
        }
        Ok(())
    }
}

impl Table<Spectrum> for SpectrumTable {
    fn table_name() -> &'static str {
        TABLE_NAME
    }

    fn select_cols() -> &'static str {
        SELECT_COLS
    }
}
