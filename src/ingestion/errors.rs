// std imports
use std::fmt::Display;

// 3rd party imports
use thiserror::Error;

// internal imports
use crate::io::copa::error::CopaError;

/// Step of the variant processing
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VariantStage {
    Peptide,
    PtmType,
    Spectrum,
    Links,
}

impl Display for VariantStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VariantStage::Peptide => "peptide",
            VariantStage::PtmType => "modification type",
            VariantStage::Spectrum => "spectrum",
            VariantStage::Links => "protein links",
        };
        write!(f, "{}", name)
    }
}

/// A variant was abandoned. Effects of earlier steps remain in the store.
#[derive(Error, Debug)]
#[error("variant {variant} abandoned at {stage}: {cause:#}")]
pub struct VariantError {
    variant: String,
    stage: VariantStage,
    cause: anyhow::Error,
}

impl VariantError {
    pub fn new(variant: String, stage: VariantStage, cause: anyhow::Error) -> Self {
        Self {
            variant,
            stage,
            cause,
        }
    }

    pub fn get_variant(&self) -> &str {
        &self.variant
    }

    pub fn get_stage(&self) -> VariantStage {
        self.stage
    }

    pub fn get_cause(&self) -> &anyhow::Error {
        &self.cause
    }
}

/// Errors ending an ingestion run
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Format error: {0}")]
    FormatError(#[from] CopaError),
    #[error("Library module {0} not found")]
    ModuleNotFound(String),
    #[error("Store error: {0:#}")]
    StoreError(anyhow::Error),
    #[error("Report error: {0:#}")]
    ReportError(anyhow::Error),
}
