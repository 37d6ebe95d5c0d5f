// 3rd party imports
use anyhow::Result;
use postgres::{GenericClient, Row};

// internal imports
use crate::database::pgsql::table::{placeholders_for, Table};
use crate::entities::ptm_type::PtmType;

const TABLE_NAME: &str = "ptm_types";

const SELECT_COLS: &str = "id, name, residues, mass_shift";

lazy_static! {
    static ref INSERT_PLACEHOLDERS: String = placeholders_for(SELECT_COLS);
}

impl From<Row> for PtmType {
    fn from(row: Row) -> Self {
        PtmType::new(
            row.get::<_, i16>("id") as u8,
            row.get("name"),
            row.get("residues"),
            row.get("mass_shift"),
        )
    }
}

pub struct PtmTypeTable {}

impl PtmTypeTable {
    pub fn insert<C: GenericClient>(client: &mut C, ptm_type: &PtmType) -> Result<()> {
        let statement = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            TABLE_NAME,
            SELECT_COLS,
            INSERT_PLACEHOLDERS.as_str()
        );
        client.execute(
            &statement,
            &[
                &(ptm_type.get_id() as i16),
                ptm_type.get_name(),
                ptm_type.get_residues(),
                &ptm_type.get_mass_shift(),
            ],
        )?;
        Ok(())
    }
}

impl Table<PtmType> for PtmTypeTable {
    fn table_name() -> &'static str {
        TABLE_NAME
    }

    fn select_cols() -> &'static str {
        SELECT_COLS
    }
}
