// 3rd party imports
use anyhow::Result;
use postgres::{GenericClient, Row};

// internal imports
use crate::database::pgsql::table::{placeholders_for, Table};
use crate::entities::library_module::{LibraryModule, Species};

const TABLE_NAME: &str = "library_modules";

const SELECT_COLS: &str = "id, name, instrument, organelle, enzyme, created_at, species_id";

const SPECIES_TABLE_NAME: &str = "species";

const SPECIES_SELECT_COLS: &str = "id, name";

lazy_static! {
    static ref INSERT_PLACEHOLDERS: String = placeholders_for(SELECT_COLS);
    static ref SPECIES_INSERT_PLACEHOLDERS: String = placeholders_for(SPECIES_SELECT_COLS);
}

impl From<Row> for LibraryModule {
    fn from(row: Row) -> Self {
        LibraryModule::new(
            row.get("id"),
            row.get("name"),
            row.get("instrument"),
            row.get("organelle"),
            row.get("enzyme"),
            row.get("created_at"),
            row.get("species_id"),
        )
    }
}

impl From<Row> for Species {
    fn from(row: Row) -> Self {
        Species::new(row.get("id"), row.get("name"))
    }
}

/// Library modules are maintained outside of the ingestion, inserts are used for setup only.
///
pub struct LibraryModuleTable {}

impl LibraryModuleTable {
    pub fn insert<C: GenericClient>(client: &mut C, library_module: &LibraryModule) -> Result<()> {
        let statement = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            TABLE_NAME,
            SELECT_COLS,
            INSERT_PLACEHOLDERS.as_str()
        );
        client.execute(
            &statement,
            &[
                &library_module.get_id(),
                library_module.get_name(),
                library_module.get_instrument(),
                library_module.get_organelle(),
                library_module.get_enzyme(),
                library_module.get_created_at(),
                &library_module.get_species_id(),
            ],
        )?;
        Ok(())
    }
}

impl Table<LibraryModule> for LibraryModuleTable {
    fn table_name() -> &'static str {
        TABLE_NAME
    }

    fn select_cols() -> &'static str {
        SELECT_COLS
    }
}

pub struct SpeciesTable {}

impl SpeciesTable {
    pub fn insert<C: GenericClient>(client: &mut C, species: &Species) -> Result<()> {
        let statement = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            SPECIES_TABLE_NAME,
            SPECIES_SELECT_COLS,
            SPECIES_INSERT_PLACEHOLDERS.as_str()
        );
        client.execute(&statement, &[&species.get_id(), species.get_name()])?;
        Ok(())
    }
}

impl Table<Species> for SpeciesTable {
    fn table_name() -> &'static str {
        SPECIES_TABLE_NAME
    }

    fn select_cols() -> &'static str {
        SPECIES_SELECT_COLS
    }
}
