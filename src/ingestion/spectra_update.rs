// std imports
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

// 3rd party imports
use anyhow::Result;
use fallible_iterator::FallibleIterator;
use indicatif::ProgressStyle;
use tracing::{debug, error, info, info_span, warn, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

// internal imports
use crate::database::store::SpectrumStore;
use crate::entities::configuration::Configuration;
use crate::entities::library_module::LibraryModule;
use crate::functions::post_translational_modification::all_ptm_types;
use crate::functions::variant_expansion::expand_variants;
use crate::ingestion::context::IngestionContext;
use crate::ingestion::errors::IngestionError;
use crate::ingestion::normalizer::Normalizer;
use crate::ingestion::outcome::{
    ArtifactOutcome, PeptideResolution, RecordOutcome, SpectrumResolution, VariantOutcome,
};
use crate::ingestion::protein_source::ProteinSource;
use crate::io::copa::error::CopaError;
use crate::io::copa::reader::{validate_headers, Reader};
use crate::io::copa::record::{SpectralRecord, PEPID_KEY};
use crate::io::ingestion_report::writer::ReportWriter;
use crate::io::spectrum_file::writer::SpectrumFileWriter;

const PROGRESS_STYLE: &str = "{spinner:.cyan} {span_name} {span_fields} {pos} records {elapsed}";

/// Reference to a library module, either its ID or its name.
/// Numeric strings are parsed as ID.
///
#[derive(Clone, Debug, PartialEq)]
pub enum LibraryModuleRef {
    Id(i32),
    Name(String),
}

impl FromStr for LibraryModuleRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i32>() {
            Ok(id) => LibraryModuleRef::Id(id),
            Err(_) => LibraryModuleRef::Name(s.trim().to_string()),
        })
    }
}

impl Display for LibraryModuleRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LibraryModuleRef::Id(id) => write!(f, "#{}", id),
            LibraryModuleRef::Name(name) => write!(f, "'{}'", name),
        }
    }
}

impl LibraryModuleRef {
    /// Looks up the referenced module
    ///
    /// # Arguments
    /// * `store` - Store to look in
    ///
    pub fn resolve(&self, store: &mut dyn SpectrumStore) -> Result<Option<LibraryModule>> {
        match self {
            LibraryModuleRef::Id(id) => store.get_library_module_by_id(*id),
            LibraryModuleRef::Name(name) => store.get_library_module_by_name(name),
        }
    }
}

/// Inserts all modification types missing in the store. Returns the number of inserted types.
///
/// # Arguments
/// * `store` - Store to seed
///
pub fn seed_ptm_types(store: &mut dyn SpectrumStore) -> Result<usize> {
    let mut inserted = 0;
    for ptm_type in all_ptm_types() {
        if store.get_ptm_type(ptm_type.get_id())?.is_none() {
            store.insert_ptm_type(&ptm_type)?;
            inserted += 1;
        }
    }
    info!("Seeded {} modification types", inserted);
    Ok(inserted)
}

/// Returns true if the first and the last modification type exist
///
fn is_seeded(store: &mut dyn SpectrumStore) -> Result<bool> {
    Ok(store.get_ptm_type(0)?.is_some() && store.get_ptm_type(u8::MAX)?.is_some())
}

/// Counters of one ingested file
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IngestionSummary {
    pub records: usize,
    pub failed_records: usize,
    pub variants: usize,
    pub reverse_hits: usize,
    pub failed_variants: usize,
    pub created_peptides: usize,
    pub created_spectra: usize,
    pub reconciled_spectra: usize,
    pub added_links: usize,
    pub retired_links: usize,
    pub unresolved_links: usize,
    pub written_artifacts: usize,
    /// False discovery estimate after the last variant
    pub fdr: f64,
}

impl IngestionSummary {
    fn add(&mut self, outcome: &RecordOutcome) {
        self.records += 1;
        let variants = match outcome.get_variants() {
            Some(variants) => variants,
            None => {
                self.failed_records += 1;
                return;
            }
        };
        for (_, variant_outcome) in variants {
            self.variants += 1;
            match variant_outcome {
                Ok(VariantOutcome::SkippedReverseHit) => self.reverse_hits += 1,
                Ok(VariantOutcome::Ingested(ingested)) => {
                    if ingested.get_peptide() == PeptideResolution::Created {
                        self.created_peptides += 1;
                    }
                    match ingested.get_spectrum() {
                        SpectrumResolution::Created => self.created_spectra += 1,
                        SpectrumResolution::Reconciled => self.reconciled_spectra += 1,
                        SpectrumResolution::Unchanged => (),
                    }
                    self.added_links += ingested.get_links().get_added().len();
                    self.retired_links += ingested.get_links().get_retired().len();
                    self.unresolved_links += ingested.get_links().get_unresolved().len();
                    if matches!(ingested.get_artifact(), ArtifactOutcome::Written(_)) {
                        self.written_artifacts += 1;
                    }
                }
                Err(_) => self.failed_variants += 1,
            }
        }
    }
}

impl Display for IngestionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records ({} failed), {} variants ({} reverse, {} failed), \
            {} new peptides, {} new / {} reconciled spectra, \
            links +{} -{} ({} unresolved), {} artifacts, FDR {:.4}",
            self.records,
            self.failed_records,
            self.variants,
            self.reverse_hits,
            self.failed_variants,
            self.created_peptides,
            self.created_spectra,
            self.reconciled_spectra,
            self.added_links,
            self.retired_links,
            self.unresolved_links,
            self.written_artifacts,
            self.fdr
        )
    }
}

/// Ingests one COPA stream into a library module.
/// Records are processed one by one, stopping between two `next_record` calls cancels the run
/// while already processed variants stay in the store.
///
pub struct SpectraUpdate<'a, R: BufRead> {
    store: &'a mut dyn SpectrumStore,
    protein_source: &'a mut dyn ProteinSource,
    reader: Reader<R>,
    normalizer: Normalizer,
    context: IngestionContext,
    max_ambiguous_residues: usize,
    file_name: String,
    summary: IngestionSummary,
}

impl<'a> SpectraUpdate<'a, BufReader<File>> {
    /// Opens the COPA file and prepares the ingestion.
    /// All headers are checked first, a malformed one fails before any record is processed.
    ///
    /// # Arguments
    /// * `copa_file_path` - Path to COPA file
    /// * `library_module` - Target module
    /// * `store` - Entity store
    /// * `protein_source` - Source for proteins unknown to the store
    /// * `configuration` - Output and limit settings
    ///
    pub fn open(
        copa_file_path: &Path,
        library_module: &LibraryModuleRef,
        store: &'a mut dyn SpectrumStore,
        protein_source: &'a mut dyn ProteinSource,
        configuration: &Configuration,
    ) -> Result<Self, IngestionError> {
        let reader = Reader::open(copa_file_path)?;
        let file_name = copa_file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        // Malformed headers end the run before any record is committed
        let records = validate_headers(BufReader::new(
            File::open(copa_file_path).map_err(CopaError::Io)?,
        ))?;
        debug!("{}: headers of {} records are valid", file_name, records);
        Self::new(
            reader,
            file_name,
            library_module,
            store,
            protein_source,
            configuration,
        )
    }
}

impl<'a, R: BufRead> SpectraUpdate<'a, R> {
    /// Prepares the ingestion of an already opened COPA stream.
    /// Fails if the library module does not exist. Missing modification types are seeded.
    ///
    /// # Arguments
    /// * `reader` - COPA reader
    /// * `file_name` - Name of the stream for logging and the report
    /// * `library_module` - Target module
    /// * `store` - Entity store
    /// * `protein_source` - Source for proteins unknown to the store
    /// * `configuration` - Output and limit settings
    ///
    pub fn new(
        reader: Reader<R>,
        file_name: String,
        library_module: &LibraryModuleRef,
        store: &'a mut dyn SpectrumStore,
        protein_source: &'a mut dyn ProteinSource,
        configuration: &Configuration,
    ) -> Result<Self, IngestionError> {
        let module = library_module
            .resolve(store)
            .map_err(IngestionError::StoreError)?
            .ok_or_else(|| IngestionError::ModuleNotFound(library_module.to_string()))?;

        if !is_seeded(store).map_err(IngestionError::StoreError)? {
            seed_ptm_types(store).map_err(IngestionError::StoreError)?;
        }

        let spectrum_file_writer = match configuration.get_spectrum_output_dir() {
            Some(output_dir) => match SpectrumFileWriter::new(output_dir) {
                Ok(writer) => Some(writer),
                Err(err) => {
                    warn!("peak artifacts disabled: {:#}", err);
                    None
                }
            },
            None => None,
        };

        info!(
            "Ingesting {} into module {} ({})",
            file_name,
            module.get_name(),
            module.get_id()
        );

        Ok(Self {
            store,
            protein_source,
            reader,
            normalizer: Normalizer::new(module, spectrum_file_writer),
            context: IngestionContext::new(),
            max_ambiguous_residues: configuration.get_max_ambiguous_residues(),
            file_name,
            summary: IngestionSummary::default(),
        })
    }

    pub fn get_library_module(&self) -> &LibraryModule {
        self.normalizer.get_library_module()
    }

    pub fn get_context(&self) -> &IngestionContext {
        &self.context
    }

    pub fn get_summary(&self) -> &IngestionSummary {
        &self.summary
    }

    pub fn get_file_name(&self) -> &str {
        &self.file_name
    }

    /// Logs a warning for each given attribute which differs from the module's.
    /// Returns true if all given attributes match.
    ///
    /// # Arguments
    /// * `instrument` - Expected instrument
    /// * `enzyme` - Expected enzyme
    ///
    pub fn check_module(&self, instrument: Option<&str>, enzyme: Option<&str>) -> bool {
        let module = self.normalizer.get_library_module();
        let mut is_matching = true;
        for (attribute, expected, actual) in [
            ("instrument", instrument, module.get_instrument()),
            ("enzyme", enzyme, module.get_enzyme()),
        ] {
            if let Some(expected) = expected {
                if !expected.eq_ignore_ascii_case(actual) {
                    warn!(
                        "module {} has {} '{}', expected '{}'",
                        module.get_name(),
                        attribute,
                        actual,
                        expected
                    );
                    is_matching = false;
                }
            }
        }
        is_matching
    }

    /// Processes the next record. Returns None at the end of the stream.
    /// Only format errors are returned as error, everything else is part of the outcome.
    /// Records returned before a format error are already committed to the store.
    ///
    pub fn next_record(&mut self) -> Result<Option<RecordOutcome>, IngestionError> {
        let outcome = match self.reader.next() {
            Ok(Some(raw_record)) => {
                let line = raw_record.get_line_number();
                let pep_id = raw_record.get_field(PEPID_KEY).map(|pep_id| pep_id.to_string());
                match SpectralRecord::try_from(raw_record) {
                    Ok(record) => self.process_record(record),
                    Err(err) => {
                        error!("{}: record skipped: {}", self.file_name, err);
                        RecordOutcome::failed(line, pep_id, err.to_string())
                    }
                }
            }
            Ok(None) => return Ok(None),
            Err(err) => {
                let line = match &err {
                    CopaError::PeakParse { line, .. } => *line,
                    _ => return Err(err.into()),
                };
                error!("{}: record skipped: {}", self.file_name, err);
                RecordOutcome::failed(line, None, err.to_string())
            }
        };
        self.summary.add(&outcome);
        self.summary.fdr = self.context.get_fdr();
        Ok(Some(outcome))
    }

    fn process_record(&mut self, record: SpectralRecord) -> RecordOutcome {
        let variants = match expand_variants(record.get_sequence(), self.max_ambiguous_residues)
        {
            Ok(variants) => variants,
            Err(err) => {
                error!("{}: record skipped: {}", self.file_name, err);
                return RecordOutcome::failed(
                    record.get_line_number(),
                    record.get_pep_id().map(|pep_id| pep_id.to_string()),
                    err.to_string(),
                );
            }
        };
        debug!(
            "record in line {} expanded to {} variants",
            record.get_line_number(),
            variants.len()
        );
        let mut outcomes = Vec::with_capacity(variants.len());
        for variant in variants {
            let outcome = self.normalizer.normalize_variant(
                self.store,
                self.protein_source,
                &mut self.context,
                &record,
                &variant,
            );
            if let Err(err) = outcome.as_ref() {
                error!("{}: {}", self.file_name, err);
            }
            outcomes.push((variant, outcome));
        }
        RecordOutcome::processed(
            record.get_line_number(),
            record.get_pep_id().map(|pep_id| pep_id.to_string()),
            outcomes,
        )
    }

    /// Processes all remaining records and flushes the store.
    ///
    /// Records are committed while the file is streamed. A format error ends the run, but the
    /// records before it stay ingested. Report and store are flushed before the error is
    /// returned, and rerunning the corrected file reconciles the committed records unchanged.
    ///
    /// # Arguments
    /// * `report` - Optional report receiving one row per variant or failed record
    ///
    pub fn run<W: Write>(
        mut self,
        mut report: Option<&mut ReportWriter<W>>,
    ) -> Result<IngestionSummary, IngestionError> {
        let progress_span = info_span!("ingesting", file = self.file_name.as_str());
        if let Ok(style) = ProgressStyle::with_template(PROGRESS_STYLE) {
            progress_span.pb_set_style(&style);
        }
        let progress_span_enter = progress_span.enter();

        let ingested = self.ingest_records(&mut report);
        if let Err(err) = ingested.as_ref() {
            error!(
                "{}: stopped after {} records: {}",
                self.file_name, self.summary.records, err
            );
        }
        if let Some(report) = report.as_mut() {
            report.flush().map_err(IngestionError::ReportError)?;
        }
        self.store.flush().map_err(IngestionError::StoreError)?;
        ingested?;

        std::mem::drop(progress_span_enter);
        std::mem::drop(progress_span);

        info!("{}: {}", self.file_name, self.summary);
        Ok(self.summary)
    }

    fn ingest_records<W: Write>(
        &mut self,
        report: &mut Option<&mut ReportWriter<W>>,
    ) -> Result<(), IngestionError> {
        while let Some(outcome) = self.next_record()? {
            if let Some(report) = report.as_mut() {
                for row in outcome.to_report_rows(&self.file_name) {
                    report.write(&row).map_err(IngestionError::ReportError)?;
                }
            }
            Span::current().pb_inc(1);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    // std imports
    use std::collections::HashMap;
    use std::fs;
    use std::io::Cursor;

    // internal imports
    use super::*;
    use crate::database::memory::memory_store::MemoryStore;
    use crate::entities::protein::Protein;
    use crate::functions::variant_expansion::MAX_AMBIGUOUS_RESIDUES;
    use crate::ingestion::protein_source::{EmptyProteinSource, UniprotTextSource};
    use crate::io::ingestion_report::writer::ReportStatus;
    use crate::tools::tests::{
        get_test_dir, get_test_store, COPA_TEST_FILE, UNIPROT_TEST_FILE,
    };

    fn get_protein_source() -> UniprotTextSource {
        UniprotTextSource::from_file(Path::new(UNIPROT_TEST_FILE)).unwrap()
    }

    fn ingest_fixture(store: &mut MemoryStore) -> IngestionSummary {
        let mut proteins = get_protein_source();
        SpectraUpdate::open(
            Path::new(COPA_TEST_FILE),
            &LibraryModuleRef::Id(1),
            store,
            &mut proteins,
            &Configuration::default(),
        )
        .unwrap()
        .run::<File>(None)
        .unwrap()
    }

    fn ingest_str(
        store: &mut MemoryStore,
        protein_source: &mut dyn ProteinSource,
        content: &str,
    ) -> IngestionSummary {
        SpectraUpdate::new(
            Reader::new(Cursor::new(content.to_string())),
            "inline.copa".to_string(),
            &LibraryModuleRef::Id(1),
            store,
            protein_source,
            &Configuration::default(),
        )
        .unwrap()
        .run::<File>(None)
        .unwrap()
    }

    #[test]
    fn test_library_module_ref() {
        assert_eq!(
            "42".parse::<LibraryModuleRef>().unwrap(),
            LibraryModuleRef::Id(42)
        );
        assert_eq!(
            "human_heart".parse::<LibraryModuleRef>().unwrap(),
            LibraryModuleRef::Name("human_heart".to_string())
        );
    }

    #[test]
    fn test_fixture() {
        let mut store = get_test_store();
        let summary = ingest_fixture(&mut store);
        assert_eq!(summary.records, 4);
        assert_eq!(summary.failed_records, 0);
        assert_eq!(summary.variants, 5);
        assert_eq!(summary.reverse_hits, 1);
        assert_eq!(summary.failed_variants, 0);
        // PEPTIDE, GVFIRRDAHK, GVFLRRDAHK, LLDNEQIAQMSGR
        assert_eq!(summary.created_peptides, 4);
        assert_eq!(summary.created_spectra, 4);
        // P12345 + Q99999 for the first record, P12345 for the J variants and the last record
        assert_eq!(summary.added_links, 5);
        assert_eq!(summary.fdr, 0.2);
        assert_eq!(store.count_ptm_types(), 256);
        assert_eq!(store.count_proteins(), 2);
        assert!(store.get_peptide_by_sequence("EDITPEP").unwrap().is_none());
    }

    #[test]
    fn test_idempotence() {
        let mut store = get_test_store();
        ingest_fixture(&mut store);
        let peptides = store.list_peptides().unwrap();
        let spectrum_count = store.count_spectra();
        let link_count = store.count_spectrum_proteins();

        let summary = ingest_fixture(&mut store);
        assert_eq!(summary.created_peptides, 0);
        assert_eq!(summary.created_spectra, 0);
        assert_eq!(summary.reconciled_spectra, 0);
        assert_eq!(summary.added_links, 0);
        assert_eq!(summary.retired_links, 0);
        assert_eq!(store.list_peptides().unwrap(), peptides);
        assert_eq!(store.count_spectra(), spectrum_count);
        assert_eq!(store.count_spectrum_proteins(), link_count);
    }

    #[test]
    fn test_links_converge_to_latest_ingestion() {
        let mut store = get_test_store();
        let mut proteins = get_protein_source();
        let first = "H|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||REVERSE:::NotReverseHit|||UNIPROTIDS:::P12345;Q99999\n100.0 1.0\n";
        let second = "H|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||REVERSE:::NotReverseHit|||UNIPROTIDS:::Q99999\n100.0 1.0\n";
        ingest_str(&mut store, &mut proteins, first);
        let summary = ingest_str(&mut store, &mut proteins, second);
        assert_eq!(summary.retired_links, 1);
        assert_eq!(summary.added_links, 0);

        let spectrum = store.get_spectrum("PEPTIDE", 1, 2).unwrap().unwrap();
        let links = store.list_spectrum_proteins(spectrum.get_id()).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].get_protein_accession(), "Q99999");
        assert_eq!(
            store
                .list_spectrum_protein_history(spectrum.get_id())
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_failed_records_do_not_stop_the_run() {
        let mut store = get_test_store();
        let content = "\
H|||PEPID:::1|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||REVERSE:::NotReverseHit
100.0 1.0
not a peak
H|||PEPID:::2|||SEQ:::K.PEPTIDE.R|||CHARGE:::zero|||REVERSE:::NotReverseHit
100.0 1.0
H|||PEPID:::3|||SEQ:::K.LLDNEQIAQMSGR.-|||CHARGE:::2|||REVERSE:::NotReverseHit
100.0 1.0
";
        let mut report = ReportWriter::from_writer(Vec::new());
        let summary = SpectraUpdate::new(
            Reader::new(Cursor::new(content.to_string())),
            "inline.copa".to_string(),
            &LibraryModuleRef::Name("spectra".to_string()),
            &mut store,
            &mut EmptyProteinSource,
            &Configuration::default(),
        )
        .unwrap()
        .run(Some(&mut report))
        .unwrap();
        assert_eq!(summary.records, 3);
        assert_eq!(summary.failed_records, 2);
        assert_eq!(summary.created_spectra, 1);
        assert!(store
            .get_peptide_by_sequence("LLDNEQIAQMSGR")
            .unwrap()
            .is_some());
        assert!(store.get_peptide_by_sequence("PEPTIDE").unwrap().is_none());

        let report = String::from_utf8(report.into_inner().unwrap()).unwrap();
        assert_eq!(report.lines().count(), 4);
        assert_eq!(report.matches("failed_record").count(), 2);
    }

    #[test]
    fn test_non_finite_score_keeps_snapshot_readable() {
        let snapshot_path = get_test_dir("spectra_update_non_finite").join("store.json");
        get_test_store().save(&snapshot_path).unwrap();
        let mut store = MemoryStore::open(&snapshot_path).unwrap();
        let content = "\
H|||PEPID:::1|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||XCORR:::NaN|||REVERSE:::NotReverseHit
100.0 1.0
H|||PEPID:::2|||SEQ:::K.LLDNEQIAQMSGR.-|||CHARGE:::2|||XCORR:::2.7|||REVERSE:::NotReverseHit
100.0 1.0
";
        let summary = ingest_str(&mut store, &mut EmptyProteinSource, content);
        assert_eq!(summary.failed_records, 1);
        assert_eq!(summary.created_spectra, 1);

        // Run flushed the snapshot, it must open again and a second run changes nothing
        let mut reopened = MemoryStore::open(&snapshot_path).unwrap();
        assert_eq!(reopened.count_spectra(), 1);
        let summary = ingest_str(&mut reopened, &mut EmptyProteinSource, content);
        assert_eq!(summary.created_spectra, 0);
        assert_eq!(summary.reconciled_spectra, 0);
    }

    #[test]
    fn test_open_rejects_malformed_header_before_ingesting() {
        let copa_path = get_test_dir("spectra_update_open_malformed").join("broken.copa");
        fs::write(
            &copa_path,
            "\
H|||PEPID:::1|||SEQ:::K.LLDNEQIAQMSGR.-|||CHARGE:::2|||REVERSE:::NotReverseHit
100.0 1.0
H|||:::broken|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||REVERSE:::NotReverseHit
100.0 1.0
",
        )
        .unwrap();
        let mut store = get_test_store();
        let mut protein_source = EmptyProteinSource;
        let result = SpectraUpdate::open(
            &copa_path,
            &LibraryModuleRef::Id(1),
            &mut store,
            &mut protein_source,
            &Configuration::default(),
        );
        assert!(matches!(
            result,
            Err(IngestionError::FormatError(CopaError::MalformedHeader { line: 3, .. }))
        ));
        assert_eq!(store.count_spectra(), 0);
        assert_eq!(store.count_peptides(), 0);
    }

    #[test]
    fn test_format_error_keeps_committed_records() {
        let snapshot_path = get_test_dir("spectra_update_format_error").join("store.json");
        get_test_store().save(&snapshot_path).unwrap();
        let mut store = MemoryStore::open(&snapshot_path).unwrap();
        let content = "\
H|||PEPID:::1|||SEQ:::K.LLDNEQIAQMSGR.-|||CHARGE:::2|||REVERSE:::NotReverseHit
100.0 1.0
H|||:::broken|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||REVERSE:::NotReverseHit
100.0 1.0
";
        let mut report = ReportWriter::from_writer(Vec::new());
        let err = SpectraUpdate::new(
            Reader::new(Cursor::new(content.to_string())),
            "inline.copa".to_string(),
            &LibraryModuleRef::Id(1),
            &mut store,
            &mut EmptyProteinSource,
            &Configuration::default(),
        )
        .unwrap()
        .run(Some(&mut report))
        .unwrap_err();
        match err {
            IngestionError::FormatError(CopaError::MalformedHeader { line, .. }) => {
                assert_eq!(line, 3)
            }
            other => panic!("unexpected error: {}", other),
        }
        // Report holds the header and the row of the first record
        let report = String::from_utf8(report.into_inner().unwrap()).unwrap();
        assert_eq!(report.lines().count(), 2);

        // The first record was flushed, the corrected file only adds the second one
        let mut reopened = MemoryStore::open(&snapshot_path).unwrap();
        assert_eq!(reopened.count_spectra(), 1);
        assert!(reopened
            .get_peptide_by_sequence("PEPTIDE")
            .unwrap()
            .is_none());
        let summary = ingest_str(
            &mut reopened,
            &mut EmptyProteinSource,
            &content.replace("H|||:::broken", "H|||PEPID:::2"),
        );
        assert_eq!(summary.created_spectra, 1);
        assert_eq!(summary.reconciled_spectra, 0);
        assert_eq!(reopened.count_spectra(), 2);
    }

    #[test]
    fn test_next_record_allows_cancellation() {
        let mut store = get_test_store();
        let mut proteins: HashMap<String, Protein> = HashMap::new();
        let content = fs::read_to_string(COPA_TEST_FILE).unwrap();
        let mut update = SpectraUpdate::new(
            Reader::new(Cursor::new(content)),
            "spectra.copa".to_string(),
            &LibraryModuleRef::Id(1),
            &mut store,
            &mut proteins,
            &Configuration::default(),
        )
        .unwrap();
        let outcome = update.next_record().unwrap().unwrap();
        assert_eq!(outcome.get_pep_id(), Some("1"));
        let rows = outcome.to_report_rows(update.get_file_name());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_status(), ReportStatus::Ingested);
        // Accessions are unresolved without proteins
        assert_eq!(update.get_summary().unresolved_links, 2);
        assert_eq!(update.get_context().get_total_variants(), 1);
        std::mem::drop(update);
        assert_eq!(store.count_spectra(), 1);
    }

    #[test]
    fn test_invalid_extension() {
        let test_dir = get_test_dir("spectra_update_invalid_extension");
        let path = test_dir.join("spectra.txt");
        fs::copy(COPA_TEST_FILE, &path).unwrap();
        let mut store = get_test_store();
        let mut proteins = EmptyProteinSource;
        let result = SpectraUpdate::open(
            &path,
            &LibraryModuleRef::Id(1),
            &mut store,
            &mut proteins,
            &Configuration::default(),
        );
        assert!(matches!(
            result,
            Err(IngestionError::FormatError(CopaError::InvalidExtension(_)))
        ));
        std::mem::drop(result);
        assert_eq!(store.count_ptm_types(), 0);
    }

    #[test]
    fn test_missing_module() {
        let mut store = get_test_store();
        let mut proteins = EmptyProteinSource;
        let result = SpectraUpdate::open(
            Path::new(COPA_TEST_FILE),
            &LibraryModuleRef::Name("unknown".to_string()),
            &mut store,
            &mut proteins,
            &Configuration::default(),
        );
        assert!(matches!(result, Err(IngestionError::ModuleNotFound(_))));
    }

    #[test]
    fn test_malformed_header_is_fatal() {
        let mut store = get_test_store();
        let mut proteins = EmptyProteinSource;
        let mut update = SpectraUpdate::new(
            Reader::new(Cursor::new("H|||:::value|||SEQ:::K.PEPTIDE.R\n".to_string())),
            "inline.copa".to_string(),
            &LibraryModuleRef::Id(1),
            &mut store,
            &mut proteins,
            &Configuration::default(),
        )
        .unwrap();
        assert!(matches!(
            update.next_record(),
            Err(IngestionError::FormatError(CopaError::MalformedHeader { .. }))
        ));
    }

    #[test]
    fn test_artifacts_and_module_check() {
        let test_dir = get_test_dir("spectra_update_artifacts");
        let configuration = Configuration::new(
            Some(test_dir.clone()),
            None,
            None,
            MAX_AMBIGUOUS_RESIDUES,
        );
        let mut store = get_test_store();
        let mut proteins = get_protein_source();
        let update = SpectraUpdate::open(
            Path::new(COPA_TEST_FILE),
            &LibraryModuleRef::Id(1),
            &mut store,
            &mut proteins,
            &configuration,
        )
        .unwrap();
        assert!(update.check_module(Some("ltq"), Some("Trypsin")));
        assert!(!update.check_module(Some("Orbitrap"), None));
        let summary = update.run::<File>(None).unwrap();
        assert_eq!(summary.written_artifacts, 4);
        assert_eq!(fs::read_dir(&test_dir).unwrap().count(), 4);
    }
}
