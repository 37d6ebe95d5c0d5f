// std imports
use std::path::PathBuf;

// 3rd party imports
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Could not access snapshot {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Snapshot {path} is not valid: {source}")]
    FormatError {
        path: PathBuf,
        source: serde_json::Error,
    },
}
