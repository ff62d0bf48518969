//! Sampling parameters.

use serde::{Deserialize, Serialize};

/// Default subset size, in examples (or groups in per-group mode).
pub const DEFAULT_SUBSET_SIZE: usize = 1000;

/// How the stream is counted and selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SamplingMode {
    /// Uniform reservoir sample over individual examples.
    PerRecord,
    /// Contiguous groups sharing a group identifier, in stream order, until the
    /// group count reaches `n`.
    PerGroup,
}

/// Parameters of one subsetting run.
///
/// ```
/// use egs_subset::{SamplingMode, SubsetConfig};
///
/// let cfg = SubsetConfig::default().with_n(200).with_seed(7).with_per_group(true);
/// assert_eq!(cfg.mode(), SamplingMode::PerGroup);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsetConfig {
    /// Target subset size. Counts groups when `per_group` is set.
    pub n: usize,
    /// Shuffle the selected examples before output. Ignored in per-group mode.
    pub randomize_order: bool,
    /// Select whole groups instead of individual examples.
    pub per_group: bool,
    /// Seed for the run's random generator.
    pub seed: u64,
}

impl Default for SubsetConfig {
    fn default() -> Self {
        Self {
            n: DEFAULT_SUBSET_SIZE,
            randomize_order: true,
            per_group: false,
            seed: 0,
        }
    }
}

impl SubsetConfig {
    #[must_use]
    pub const fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    #[must_use]
    pub const fn with_randomize_order(mut self, randomize_order: bool) -> Self {
        self.randomize_order = randomize_order;
        self
    }

    #[must_use]
    pub const fn with_per_group(mut self, per_group: bool) -> Self {
        self.per_group = per_group;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub const fn mode(&self) -> SamplingMode {
        if self.per_group {
            SamplingMode::PerGroup
        } else {
            SamplingMode::PerRecord
        }
    }

    /// Whether the output will be shuffled. Per-group output never is.
    #[must_use]
    pub const fn shuffles_output(&self) -> bool {
        self.randomize_order && !self.per_group
    }
}
