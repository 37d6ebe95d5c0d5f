// std imports
use std::path::PathBuf;

// 3rd party imports
use thiserror::Error;

/// Errors raised while streaming a COPA file
#[derive(Error, Debug)]
pub enum CopaError {
    #[error("file '{0}' must have the .copa extension")]
    InvalidExtension(PathBuf),
    #[error("malformed header token '{token}' in line {line}")]
    MalformedHeader { line: usize, token: String },
    #[error("peak line {line} is not a pair of numbers: '{content}'")]
    PeakParse { line: usize, content: String },
    #[error("could not read COPA stream")]
    Io(#[from] std::io::Error),
}

impl CopaError {
    /// Returns true if the error ends the whole run. A peak error only fails its record,
    /// the reader resumes at the following header.
    ///
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CopaError::PeakParse { .. })
    }
}
