/// Module for mass conversion. All masses are handled as integer internally
/// to keep summation of residue masses free of floating point drift.
#[macro_use]
pub mod convert;
