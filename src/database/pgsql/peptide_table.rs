// 3rd party imports
use anyhow::Result;
use postgres::{GenericClient, Row};

// internal imports
use crate::database::pgsql::table::{placeholders_for, Table};
use crate::entities::peptide::Peptide;

const TABLE_NAME: &str = "peptides";

const SELECT_COLS: &str = "id, sequence, molecular_weight";

const INSERT_COLS: &str = "sequence, length, molecular_weight";

lazy_static! {
    static ref INSERT_PLACEHOLDERS: String = placeholders_for(INSERT_COLS);
}

impl From<Row> for Peptide {
    fn from(row: Row) -> Self {
        Peptide::new(
            row.get("id"),
            row.get("sequence"),
            row.get("molecular_weight"),
        )
    }
}

pub struct PeptideTable {}

impl PeptideTable {
    /// Inserts the peptide and returns its ID
    ///
    /// # Arguments
    /// * `client` - Database client or open transaction
    /// * `peptide` - Peptide to insert
    ///
    pub fn insert<C: GenericClient>(client: &mut C, peptide: &Peptide) -> Result<i64> {
        let statement = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            TABLE_NAME,
            INSERT_COLS,
            INSERT_PLACEHOLDERS.as_str()
        );
        let row = client.query_one(
            &statement,
            &[
                peptide.get_sequence(),
                &(peptide.get_length() as i32),
                &peptide.get_molecular_weight(),
            ],
        )?;
        Ok(row.get(0))
    }
}

impl Table<Peptide> for PeptideTable {
    fn table_name() -> &'static str {
        TABLE_NAME
    }

    fn select_cols() -> &'static str {
        SELECT_COLS
    }
}
