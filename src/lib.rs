// # Create absolute path to readme ti increase compatible for different build targets
//  https://gist.github.com/JakeHartnell/2c1fa387f185f5dc46c9429470a2e2be
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Readme.md"))]

// 3rd party imports
#[allow(unused_imports)]
#[macro_use]
extern crate lazy_static;

// Internal imports including macros
/// Contains mass related functions
#[macro_use]
pub mod mass;
/// Test helpers
pub mod tools;

/// Chemistry related information, e.g. amino acid and modification masses
pub mod chemistry;
/// Store abstraction with in-memory and PostgreSQL implementations
pub mod database;
/// Contains different entities, e.g. peptides, spectra, proteins, etc.
pub mod entities;
/// Sequence handling, variant expansion, mass calculation and modification classification
pub mod functions;
/// Ingestion of COPA files into the store
pub mod ingestion;
/// Input and output functions
pub mod io;
