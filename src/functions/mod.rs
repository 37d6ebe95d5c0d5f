/// Modified sequence notation of spectral libraries
pub mod sequence;
/// Expansion of ambiguous residues into concrete sequence variants
pub mod variant_expansion;
/// Molecular weight and theoretical precursor m/z
pub mod mass_calculation;
/// Classification of annotated mass deltas into modification types
pub mod post_translational_modification;
