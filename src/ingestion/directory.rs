// std imports
use std::io::Write;
use std::path::{Path, PathBuf};

// 3rd party imports
use anyhow::{Context, Result};
use glob::glob;
use tracing::{error, info};

// internal imports
use crate::database::store::SpectrumStore;
use crate::entities::configuration::Configuration;
use crate::ingestion::errors::IngestionError;
use crate::ingestion::protein_source::ProteinSource;
use crate::ingestion::spectra_update::{IngestionSummary, LibraryModuleRef, SpectraUpdate};
use crate::io::copa::reader::COPA_EXTENSION;
use crate::io::ingestion_report::writer::ReportWriter;

/// Returns the COPA files of the given directory in lexical order
///
/// # Arguments
/// * `copa_dir` - Directory to search
///
pub fn find_copa_files(copa_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = copa_dir.join(format!("*.{}", COPA_EXTENSION));
    let pattern = pattern
        .to_str()
        .with_context(|| format!("path {} is not valid UTF-8", copa_dir.display()))?;
    let mut copa_files = glob(pattern)?.collect::<Result<Vec<PathBuf>, _>>()?;
    copa_files.sort();
    Ok(copa_files)
}

/// Ingests every COPA file of the directory into the library module named like the file stem,
/// e.g. `human_heart.copa` into module `human_heart`. Each file gets its own ingestion context.
/// A failing file is logged and does not stop the remaining files.
///
/// Returns the result of each file.
///
/// # Arguments
/// * `copa_dir` - Directory containing the COPA files
/// * `store` - Entity store
/// * `protein_source` - Source for proteins unknown to the store
/// * `configuration` - Output and limit settings
/// * `report` - Optional report receiving the rows of all files
///
pub fn ingest_directory<W: Write>(
    copa_dir: &Path,
    store: &mut dyn SpectrumStore,
    protein_source: &mut dyn ProteinSource,
    configuration: &Configuration,
    mut report: Option<&mut ReportWriter<W>>,
) -> Result<Vec<(PathBuf, Result<IngestionSummary, IngestionError>)>> {
    let copa_files = find_copa_files(copa_dir)?;
    info!(
        "Found {} COPA files in {}",
        copa_files.len(),
        copa_dir.display()
    );

    let mut results = Vec::with_capacity(copa_files.len());
    for copa_file in copa_files {
        let module_name = copa_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        let result = SpectraUpdate::open(
            &copa_file,
            &LibraryModuleRef::Name(module_name),
            store,
            protein_source,
            configuration,
        )
        .and_then(|update| update.run(report.as_deref_mut()));
        if let Err(err) = result.as_ref() {
            error!("{} not ingested: {}", copa_file.display(), err);
        }
        results.push((copa_file, result));
    }
    Ok(results)
}

#[cfg(test)]
mod test {
    // std imports
    use std::fs;

    // internal imports
    use super::*;
    use crate::ingestion::protein_source::EmptyProteinSource;
    use crate::tools::tests::{get_test_dir, get_test_store, COPA_TEST_FILE};

    #[test]
    fn test_ingest_directory() {
        let test_dir = get_test_dir("ingest_directory");
        // Module `spectra` exists, `kidney` does not
        fs::copy(COPA_TEST_FILE, test_dir.join("spectra.copa")).unwrap();
        fs::copy(COPA_TEST_FILE, test_dir.join("kidney.copa")).unwrap();
        fs::write(test_dir.join("notes.txt"), "not a COPA file").unwrap();

        let mut store = get_test_store();
        let mut proteins = EmptyProteinSource;
        let mut report = ReportWriter::from_writer(Vec::new());
        let results = ingest_directory(
            &test_dir,
            &mut store,
            &mut proteins,
            &Configuration::default(),
            Some(&mut report),
        )
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, test_dir.join("kidney.copa"));
        assert!(matches!(
            results[0].1,
            Err(IngestionError::ModuleNotFound(_))
        ));
        let summary = results[1].1.as_ref().unwrap();
        assert_eq!(summary.records, 4);
        assert_eq!(summary.variants, 5);
        assert_eq!(store.count_spectra(), 4);

        let report = String::from_utf8(report.into_inner().unwrap()).unwrap();
        // Header and one row per variant
        assert_eq!(report.lines().count(), 6);
    }
}
