// 3rd party imports
use anyhow::{bail, Result};
use postgres::types::ToSql;
use postgres::{GenericClient, Row};

// internal imports
use crate::database::errors::store_error::StoreError;
use crate::database::pgsql::table::{placeholders_for, Table};
use crate::entities::spectrum_protein::{SpectrumProtein, SpectrumProteinHistory};

const TABLE_NAME: &str = "spectrum_proteins";

const SELECT_COLS: &str = "id, spectrum_id, protein_accession, peptide_id, module_id, \
    previous_residue, next_residue, location, is_feature_peptide, is_species_unique";

const INSERT_COLS: &str = "spectrum_id, protein_accession, peptide_id, module_id, \
    previous_residue, next_residue, location, is_feature_peptide, is_species_unique";

const HISTORY_TABLE_NAME: &str = "spectrum_protein_history";

const HISTORY_SELECT_COLS: &str = "id, spectrum_id, protein_accession, peptide_id, module_id, \
    previous_residue, next_residue, location, is_feature_peptide, is_species_unique, retired_at";

lazy_static! {
    static ref INSERT_PLACEHOLDERS: String = placeholders_for(INSERT_COLS);
    static ref HISTORY_INSERT_PLACEHOLDERS: String = placeholders_for(HISTORY_SELECT_COLS);
}

/// Residues are stored as single character text
///
fn get_residue(row: &Row, col: &str) -> char {
    row.get::<_, String>(col).chars().next().unwrap_or('-')
}

fn spectrum_protein_from_row(row: &Row) -> SpectrumProtein {
    SpectrumProtein::new(
        row.get("id"),
        row.get("spectrum_id"),
        row.get("protein_accession"),
        row.get("peptide_id"),
        row.get("module_id"),
        get_residue(row, "previous_residue"),
        get_residue(row, "next_residue"),
        row.get("location"),
        row.get("is_feature_peptide"),
        row.get("is_species_unique"),
    )
}

impl From<Row> for SpectrumProtein {
    fn from(row: Row) -> Self {
        spectrum_protein_from_row(&row)
    }
}

impl From<Row> for SpectrumProteinHistory {
    fn from(row: Row) -> Self {
        SpectrumProteinHistory::new(spectrum_protein_from_row(&row), row.get("retired_at"))
    }
}

pub struct SpectrumProteinTable {}

impl SpectrumProteinTable {
    /// Inserts the link and returns its ID
    ///
    /// # Arguments
    /// * `client` - Database client or open transaction
    /// * `spectrum_protein` - Link to insert
    ///
    pub fn insert<C: GenericClient>(
        client: &mut C,
        spectrum_protein: &SpectrumProtein,
    ) -> Result<i64> {
        let statement = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            TABLE_NAME,
            INSERT_COLS,
            INSERT_PLACEHOLDERS.as_str()
        );
        let previous_residue = spectrum_protein.get_previous_residue().to_string();
        let next_residue = spectrum_protein.get_next_residue().to_string();
        let row = client.query_one(
            &statement,
            &[
                &spectrum_protein.get_spectrum_id(),
                spectrum_protein.get_protein_accession(),
                &spectrum_protein.get_peptide_id(),
                &spectrum_protein.get_module_id(),
                &previous_residue,
                &next_residue,
                &spectrum_protein.get_location(),
                &spectrum_protein.get_is_feature_peptide(),
                &spectrum_protein.get_is_species_unique(),
            ],
        )?;
        Ok(row.get(0))
    }

    /// Updates feature and species flags of the link with the same ID
    ///
    pub fn update_flags<C: GenericClient>(
        client: &mut C,
        spectrum_protein: &SpectrumProtein,
    ) -> Result<()> {
        let statement = format!(
            "UPDATE {} SET is_feature_peptide = $1, is_species_unique = $2 WHERE id = $3",
            TABLE_NAME
        );
        let num_updated = client.execute(
            &statement,
            &[
                &spectrum_protein.get_is_feature_peptide(),
                &spectrum_protein.get_is_species_unique(),
                &spectrum_protein.get_id(),
            ],
        )?;
        if num_updated == 0 {
            bail!(StoreError::NotFound {
                entity: "spectrum protein",
                key: spectrum_protein.get_id().to_string()
            });
        }
        Ok(())
    }

    /// Deletes the link with the same ID
    ///
    pub fn delete<C: GenericClient>(client: &mut C, spectrum_protein: &SpectrumProtein) -> Result<()> {
        let statement = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let num_deleted = client.execute(&statement, &[&spectrum_protein.get_id()])?;
        if num_deleted == 0 {
            bail!(StoreError::NotFound {
                entity: "spectrum protein",
                key: spectrum_protein.get_id().to_string()
            });
        }
        Ok(())
    }
}

impl Table<SpectrumProtein> for SpectrumProteinTable {
    fn table_name() -> &'static str {
        TABLE_NAME
    }

    fn select_cols() -> &'static str {
        SELECT_COLS
    }
}

pub struct SpectrumProteinHistoryTable {}

impl SpectrumProteinHistoryTable {
    pub fn insert<C: GenericClient>(client: &mut C, history: &SpectrumProteinHistory) -> Result<()> {
        let statement = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            HISTORY_TABLE_NAME,
            HISTORY_SELECT_COLS,
            HISTORY_INSERT_PLACEHOLDERS.as_str()
        );
        let spectrum_protein = history.get_spectrum_protein();
        let previous_residue = spectrum_protein.get_previous_residue().to_string();
        let next_residue = spectrum_protein.get_next_residue().to_string();
        let params: [&(dyn ToSql + Sync); 11] = [
            &spectrum_protein.get_id(),
            &spectrum_protein.get_spectrum_id(),
            spectrum_protein.get_protein_accession(),
            &spectrum_protein.get_peptide_id(),
            &spectrum_protein.get_module_id(),
            &previous_residue,
            &next_residue,
            &spectrum_protein.get_location(),
            &spectrum_protein.get_is_feature_peptide(),
            &spectrum_protein.get_is_species_unique(),
            history.get_retired_at(),
        ];
        client.execute(&statement, &params)?;
        Ok(())
    }
}

impl Table<SpectrumProteinHistory> for SpectrumProteinHistoryTable {
    fn table_name() -> &'static str {
        HISTORY_TABLE_NAME
    }

    fn select_cols() -> &'static str {
        HISTORY_SELECT_COLS
    }
}
