use crate::constants::pipeline::DEFAULT_CHUNK_SIZE;
use crate::constants::splits::DEFAULT_SEED;
use crate::splits::SplitRatios;
use crate::stopwords::Language;

/// Configuration for one cleaning run.
#[derive(Clone, Copy, Debug)]
pub struct CleanConfig {
    /// Maximum rows read per chunk (must be positive).
    pub chunk_size: usize,
    /// Stopword language used by the normalizer.
    pub language: Language,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            language: Language::English,
        }
    }
}

/// Configuration for deterministic split assignment.
#[derive(Clone, Copy, Debug)]
pub struct SplitConfig {
    /// Train/validation/test ratio targets.
    pub ratios: SplitRatios,
    /// Seed for the deterministic row shuffle.
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            ratios: SplitRatios::default(),
            seed: DEFAULT_SEED,
        }
    }
}
