/// Counters of one ingestion run, used for the cumulative false discovery estimate.
/// Each run owns its own context, contexts are never shared between runs.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IngestionContext {
    total_variants: u64,
    reverse_hits: u64,
}

impl IngestionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a processed variant and returns the false discovery estimate including it.
    ///
    /// # Arguments
    /// * `is_reverse_hit` - True if the variant is a decoy match
    ///
    pub fn register_variant(&mut self, is_reverse_hit: bool) -> f64 {
        self.total_variants += 1;
        if is_reverse_hit {
            self.reverse_hits += 1;
        }
        self.get_fdr()
    }

    /// Returns reverse hits divided by all variants, `0.0` before the first variant
    ///
    pub fn get_fdr(&self) -> f64 {
        if self.total_variants == 0 {
            return 0.0;
        }
        self.reverse_hits as f64 / self.total_variants as f64
    }

    pub fn get_total_variants(&self) -> u64 {
        self.total_variants
    }

    pub fn get_reverse_hits(&self) -> u64 {
        self.reverse_hits
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fdr() {
        let mut context = IngestionContext::new();
        assert_eq!(context.get_fdr(), 0.0);
        assert_eq!(context.register_variant(false), 0.0);
        assert_eq!(context.register_variant(true), 0.5);
        let fdr = context.register_variant(false);
        assert!((fdr - 1.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(context.get_total_variants(), 3);
        assert_eq!(context.get_reverse_hits(), 1);
    }

    #[test]
    fn test_contexts_are_independent() {
        let mut first = IngestionContext::new();
        first.register_variant(true);
        let mut second = IngestionContext::new();
        assert_eq!(second.register_variant(false), 0.0);
        assert_eq!(first.get_fdr(), 1.0);
    }
}
