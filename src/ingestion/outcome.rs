// std imports
use std::fmt::Display;
use std::path::PathBuf;

// internal imports
use crate::functions::sequence::ModifiedSequence;
use crate::ingestion::errors::VariantError;
use crate::io::ingestion_report::writer::{ReportRow, ReportStatus};

/// How the peptide of a variant was resolved
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PeptideResolution {
    Created,
    Existing,
}

/// How the spectrum of a variant was resolved
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpectrumResolution {
    Created,
    /// Existing spectrum with identical attributes
    Unchanged,
    /// Existing spectrum which was updated in place
    Reconciled,
}

/// Changes of the protein links of a spectrum, accessions in order of processing
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkReconciliation {
    added: Vec<String>,
    retired: Vec<String>,
    kept: Vec<String>,
    unresolved: Vec<String>,
}

impl LinkReconciliation {
    pub fn new(
        added: Vec<String>,
        retired: Vec<String>,
        kept: Vec<String>,
        unresolved: Vec<String>,
    ) -> Self {
        Self {
            added,
            retired,
            kept,
            unresolved,
        }
    }

    pub fn get_added(&self) -> &Vec<String> {
        &self.added
    }

    pub fn get_retired(&self) -> &Vec<String> {
        &self.retired
    }

    pub fn get_kept(&self) -> &Vec<String> {
        &self.kept
    }

    /// Accessions neither known to the store nor to the protein source
    ///
    pub fn get_unresolved(&self) -> &Vec<String> {
        &self.unresolved
    }
}

/// Result of writing the spectrum artifact
#[derive(Clone, Debug, PartialEq)]
pub enum ArtifactOutcome {
    Written(PathBuf),
    /// No output directory configured
    NotConfigured,
    Failed(String),
}

/// Resolutions of each step of an ingested variant
///
#[derive(Clone, Debug, PartialEq)]
pub struct IngestedVariant {
    peptide_id: i64,
    peptide: PeptideResolution,
    spectrum_id: i64,
    spectrum: SpectrumResolution,
    links: LinkReconciliation,
    artifact: ArtifactOutcome,
}

impl IngestedVariant {
    pub fn new(
        peptide_id: i64,
        peptide: PeptideResolution,
        spectrum_id: i64,
        spectrum: SpectrumResolution,
        links: LinkReconciliation,
        artifact: ArtifactOutcome,
    ) -> Self {
        Self {
            peptide_id,
            peptide,
            spectrum_id,
            spectrum,
            links,
            artifact,
        }
    }

    pub fn get_peptide_id(&self) -> i64 {
        self.peptide_id
    }

    pub fn get_peptide(&self) -> PeptideResolution {
        self.peptide
    }

    pub fn get_spectrum_id(&self) -> i64 {
        self.spectrum_id
    }

    pub fn get_spectrum(&self) -> SpectrumResolution {
        self.spectrum
    }

    pub fn get_links(&self) -> &LinkReconciliation {
        &self.links
    }

    pub fn get_artifact(&self) -> &ArtifactOutcome {
        &self.artifact
    }
}

impl Display for IngestedVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "peptide {:?}, spectrum {:?}, links +{} -{} ={} ?{}",
            self.peptide,
            self.spectrum,
            self.links.added.len(),
            self.links.retired.len(),
            self.links.kept.len(),
            self.links.unresolved.len()
        )?;
        if !self.links.unresolved.is_empty() {
            write!(f, " (unresolved: {})", self.links.unresolved.join(";"))?;
        }
        if let ArtifactOutcome::Failed(reason) = &self.artifact {
            write!(f, ", artifact failed: {}", reason)?;
        }
        Ok(())
    }
}

/// Terminal state of a variant
#[derive(Clone, Debug, PartialEq)]
pub enum VariantOutcome {
    SkippedReverseHit,
    Ingested(IngestedVariant),
}

/// Outcome of one record: either the outcome of each of its variants or the reason the whole record failed
///
#[derive(Debug)]
pub struct RecordOutcome {
    line: usize,
    pep_id: Option<String>,
    result: Result<Vec<(ModifiedSequence, Result<VariantOutcome, VariantError>)>, String>,
}

impl RecordOutcome {
    /// Creates the outcome of a processed record
    ///
    pub fn processed(
        line: usize,
        pep_id: Option<String>,
        variants: Vec<(ModifiedSequence, Result<VariantOutcome, VariantError>)>,
    ) -> Self {
        Self {
            line,
            pep_id,
            result: Ok(variants),
        }
    }

    /// Creates the outcome of a record which could not be processed
    ///
    pub fn failed(line: usize, pep_id: Option<String>, reason: String) -> Self {
        Self {
            line,
            pep_id,
            result: Err(reason),
        }
    }

    pub fn get_line(&self) -> usize {
        self.line
    }

    pub fn get_pep_id(&self) -> Option<&str> {
        self.pep_id.as_deref()
    }

    pub fn is_failed(&self) -> bool {
        self.result.is_err()
    }

    pub fn get_variants(
        &self,
    ) -> Option<&Vec<(ModifiedSequence, Result<VariantOutcome, VariantError>)>> {
        self.result.as_ref().ok()
    }

    /// Returns one report row per variant, or a single row for a failed record
    ///
    /// # Arguments
    /// * `file` - Name of the ingested file
    ///
    pub fn to_report_rows(&self, file: &str) -> Vec<ReportRow> {
        let variants = match &self.result {
            Ok(variants) => variants,
            Err(reason) => {
                return vec![ReportRow::new(
                    file.to_string(),
                    self.line,
                    self.pep_id.clone(),
                    None,
                    ReportStatus::FailedRecord,
                    None,
                    reason.clone(),
                )]
            }
        };
        variants
            .iter()
            .map(|(variant, outcome)| {
                let (status, spectrum_id, detail) = match outcome {
                    Ok(VariantOutcome::SkippedReverseHit) => {
                        (ReportStatus::SkippedReverseHit, None, String::new())
                    }
                    Ok(VariantOutcome::Ingested(ingested)) => (
                        ReportStatus::Ingested,
                        Some(ingested.get_spectrum_id()),
                        ingested.to_string(),
                    ),
                    Err(err) => (ReportStatus::FailedVariant, None, err.to_string()),
                };
                ReportRow::new(
                    file.to_string(),
                    self.line,
                    self.pep_id.clone(),
                    Some(variant.get_inner().to_string()),
                    status,
                    spectrum_id,
                    detail,
                )
            })
            .collect()
    }
}
