/// IO for COPA spectral exports
pub mod copa;
/// Operator facing CSV report of an ingestion run
pub mod ingestion_report;
/// Per spectrum peak artifacts
pub mod spectrum_file;
/// IO code for UniProt text files:
/// <https://web.expasy.org/docs/userman.html>
pub mod uniprot_text;
