// std imports
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// 3rd party imports
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// internal imports
use crate::functions::variant_expansion::MAX_AMBIGUOUS_RESIDUES;

/// Keeps the configuration parameters for an ingestion run, e.g. artifact directory, report path ...
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    spectrum_output_dir: Option<PathBuf>,
    report_path: Option<PathBuf>,
    protein_file: Option<PathBuf>,
    max_ambiguous_residues: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            spectrum_output_dir: None,
            report_path: None,
            protein_file: None,
            max_ambiguous_residues: MAX_AMBIGUOUS_RESIDUES,
        }
    }
}

impl Configuration {
    pub fn new(
        spectrum_output_dir: Option<PathBuf>,
        report_path: Option<PathBuf>,
        protein_file: Option<PathBuf>,
        max_ambiguous_residues: usize,
    ) -> Self {
        Self {
            spectrum_output_dir,
            report_path,
            protein_file,
            max_ambiguous_residues,
        }
    }

    /// Reads the configuration from a JSON file. Missing keys fall back to their defaults.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON file
    ///
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(
            File::open(path).with_context(|| format!("opening configuration {}", path.display()))?,
        );
        serde_json::from_reader(reader)
            .with_context(|| format!("parsing configuration {}", path.display()))
    }

    /// Returns a copy where every given value replaces the current one
    ///
    /// # Arguments
    /// * `spectrum_output_dir` - Directory for spectrum artifacts
    /// * `report_path` - Path of the CSV report
    /// * `protein_file` - UniProt text file used as protein source
    /// * `max_ambiguous_residues` - Maximum number of ambiguous residues per sequence
    ///
    pub fn overridden(
        &self,
        spectrum_output_dir: Option<PathBuf>,
        report_path: Option<PathBuf>,
        protein_file: Option<PathBuf>,
        max_ambiguous_residues: Option<usize>,
    ) -> Self {
        Self {
            spectrum_output_dir: spectrum_output_dir.or_else(|| self.spectrum_output_dir.clone()),
            report_path: report_path.or_else(|| self.report_path.clone()),
            protein_file: protein_file.or_else(|| self.protein_file.clone()),
            max_ambiguous_residues: max_ambiguous_residues.unwrap_or(self.max_ambiguous_residues),
        }
    }

    /// Returns the directory for spectrum artifacts, None if artifacts are not written
    ///
    pub fn get_spectrum_output_dir(&self) -> Option<&Path> {
        self.spectrum_output_dir.as_deref()
    }

    /// Returns the path of the CSV report
    ///
    pub fn get_report_path(&self) -> Option<&Path> {
        self.report_path.as_deref()
    }

    /// Returns the UniProt text file used as protein source
    ///
    pub fn get_protein_file(&self) -> Option<&Path> {
        self.protein_file.as_deref()
    }

    /// Returns the maximum number of ambiguous residues per sequence
    ///
    pub fn get_max_ambiguous_residues(&self) -> usize {
        self.max_ambiguous_residues
    }
}
