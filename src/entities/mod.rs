// Struct which keeps configuration parameters
pub mod configuration;
/// Library modules and species
pub mod library_module;
/// Structs and functions for working with peptide entities.
pub mod peptide;
/// Structs and functions for working with protein entities.
pub mod protein;
/// Combinations of known post translational modifications
pub mod ptm_type;
/// Observed spectra
pub mod spectrum;
/// Links between spectra and proteins, including their history
pub mod spectrum_protein;
