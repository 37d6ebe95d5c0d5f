// std imports
use std::{env, fs, path::PathBuf, process};

// 3rd party imports
use chrono::NaiveDate;

// internal imports
use crate::database::memory::memory_store::MemoryStore;
use crate::database::store::SpectrumStore;
use crate::entities::library_module::{LibraryModule, Species};

/// Path of the UniProt fixture
pub const UNIPROT_TEST_FILE: &str = "test_files/uniprot.txt";
/// Path of the COPA fixture
pub const COPA_TEST_FILE: &str = "test_files/spectra.copa";

/// Returns an empty directory below the system temp dir, unique for the test name and process.
/// An existing directory from an earlier run is removed first.
///
pub fn get_test_dir(test_name: &str) -> PathBuf {
    let test_dir = env::temp_dir().join(format!(
        "{}_{}_{}",
        env!("CARGO_PKG_NAME"),
        test_name,
        process::id()
    ));
    if test_dir.is_dir() {
        fs::remove_dir_all(&test_dir).unwrap();
    }
    fs::create_dir_all(&test_dir).unwrap();
    test_dir
}

/// Returns a memory store with two species and three library modules:
///
/// * `1` - `spectra`, Homo sapiens, LTQ, Trypsin
/// * `2` - `human_liver`, Homo sapiens, LTQ, Trypsin
/// * `3` - `mouse_heart`, Mus musculus, Orbitrap, Trypsin
///
pub fn get_test_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store
        .insert_species(&Species::new(1, "Homo sapiens".to_string()))
        .unwrap();
    store
        .insert_species(&Species::new(2, "Mus musculus".to_string()))
        .unwrap();
    for (id, name, instrument, species_id) in [
        (1, "spectra", "LTQ", 1),
        (2, "human_liver", "LTQ", 1),
        (3, "mouse_heart", "Orbitrap", 2),
    ] {
        store
            .insert_library_module(&LibraryModule::new(
                id,
                name.to_string(),
                instrument.to_string(),
                "heart".to_string(),
                "Trypsin".to_string(),
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                species_id,
            ))
            .unwrap();
    }
    store
}
