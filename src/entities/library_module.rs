// 3rd party imports
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Named grouping of spectra sharing instrument, enzyme, organelle and species
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LibraryModule {
    id: i32,
    name: String,
    instrument: String,
    organelle: String,
    enzyme: String,
    created_at: NaiveDate,
    species_id: i32,
}

impl LibraryModule {
    /// Creates a new library module
    ///
    /// # Arguments
    /// * `id` - Store ID
    /// * `name` - Unique module name, e.g. `human_heart_mitochondria`
    /// * `instrument` - Instrument the spectra were acquired with
    /// * `organelle` - Organelle of the sample
    /// * `enzyme` - Digestion enzyme
    /// * `created_at` - Date the module was created
    /// * `species_id` - ID of the species
    ///
    pub fn new(
        id: i32,
        name: String,
        instrument: String,
        organelle: String,
        enzyme: String,
        created_at: NaiveDate,
        species_id: i32,
    ) -> Self {
        Self {
            id,
            name,
            instrument,
            organelle,
            enzyme,
            created_at,
            species_id,
        }
    }

    pub fn get_id(&self) -> i32 {
        self.id
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    pub fn get_instrument(&self) -> &String {
        &self.instrument
    }

    pub fn get_organelle(&self) -> &String {
        &self.organelle
    }

    pub fn get_enzyme(&self) -> &String {
        &self.enzyme
    }

    pub fn get_created_at(&self) -> &NaiveDate {
        &self.created_at
    }

    pub fn get_species_id(&self) -> i32 {
        self.species_id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Species {
    id: i32,
    name: String,
}

impl Species {
    pub fn new(id: i32, name: String) -> Self {
        Self { id, name }
    }

    pub fn get_id(&self) -> i32 {
        self.id
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }
}
