// 3rd party imports
use anyhow::Result;
use postgres::{GenericClient, Row};

// internal imports
use crate::database::pgsql::table::{placeholders_for, Table};
use crate::entities::protein::Protein;

const TABLE_NAME: &str = "proteins";

const SELECT_COLS: &str = "accession, secondary_accessions, entry_name, name, \
    genes, taxonomy_id, is_reviewed, sequence";

const INSERT_COLS: &str = SELECT_COLS;

lazy_static! {
    static ref INSERT_PLACEHOLDERS: String = placeholders_for(INSERT_COLS);
}

impl From<Row> for Protein {
    fn from(row: Row) -> Self {
        Protein::new(
            row.get("accession"),
            row.get("secondary_accessions"),
            row.get("entry_name"),
            row.get("name"),
            row.get("genes"),
            row.get("taxonomy_id"),
            row.get("is_reviewed"),
            row.get("sequence"),
        )
    }
}

pub struct ProteinTable {}

impl ProteinTable {
    /// Inserts the protein
    ///
    /// # Arguments
    /// * `client` - Database client or open transaction
    /// * `protein` - Protein to insert
    ///
    pub fn insert<C: GenericClient>(client: &mut C, protein: &Protein) -> Result<()> {
        let statement = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            TABLE_NAME,
            INSERT_COLS,
            INSERT_PLACEHOLDERS.as_str()
        );
        client.execute(
            &statement,
            &[
                protein.get_accession(),
                protein.get_secondary_accessions(),
                protein.get_entry_name(),
                protein.get_name(),
                protein.get_genes(),
                protein.get_taxonomy_id(),
                &protein.get_is_reviewed(),
                protein.get_sequence(),
            ],
        )?;
        Ok(())
    }
}

impl Table<Protein> for ProteinTable {
    fn table_name() -> &'static str {
        TABLE_NAME
    }

    fn select_cols() -> &'static str {
        SELECT_COLS
    }
}
