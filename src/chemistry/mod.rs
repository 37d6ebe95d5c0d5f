/// Information about amino acids and their monoisotopic masses
pub mod amino_acid;
/// Reference masses of the modifications annotated in spectral libraries
pub mod modification;
/// Information about additional molecules, e.g water
pub mod molecule;
