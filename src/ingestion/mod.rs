/// Counters of one ingestion run
pub mod context;
/// Ingestion of all COPA files of a directory
pub mod directory;
/// Errors of the ingestion
pub mod errors;
/// Per variant resolution of peptides, spectra and protein links
pub mod normalizer;
/// Outcomes of records and variants
pub mod outcome;
/// Post-ingestion update of the link flags
pub mod peptide_states;
/// Sources for proteins unknown to the store
pub mod protein_source;
/// Ingestion of a single COPA file
pub mod spectra_update;
