//! Single-pass, fixed-memory subset selection.
//!
//! [`SubsetSampler`] consumes a stream of [`Example`]s one at a time and keeps
//! at most `n` of them:
//!
//! - **Per-record mode** is classic reservoir sampling (Algorithm R): the first
//!   `n` examples fill the reservoir, and example number `k > n` replaces a
//!   uniformly chosen slot with probability `n / k`. Every example seen ends up
//!   in the final reservoir with probability `n / N`.
//! - **Per-group mode** counts runs of contiguous examples sharing a
//!   [group identifier](crate::group_id) and keeps examples while the group
//!   count stays below `n`. The record that brings the count to `n` asks the
//!   caller to stop reading, so the first `n - 1` groups are kept. It makes no
//!   random draws and is a stream-order prefix, not a uniform sample over
//!   groups. The group tracker starts out as the empty identifier, so leading
//!   records with an empty identifier (`"-0"`) are kept without being counted.
//!
//! All random decisions come from one generator owned by the sampler, which is
//! then handed to the [output sequencer](crate::sequencer) by
//! [`SubsetSampler::finish`]. A fixed seed and a fixed input therefore always
//! reproduce the same output.

use crate::config::{SamplingMode, SubsetConfig};
use crate::group::group_id;
use crate::record::Example;
use crate::sequencer::sequence;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Upper bound on the reservoir slots reserved up front. Larger reservoirs
/// grow on demand as they fill.
const PREALLOC_LIMIT: usize = 1 << 16;

/// What the caller should do after offering an example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep feeding examples.
    Continue,
    /// Stop reading the stream; nothing further will be kept.
    Halt,
}

/// The selected examples in emission order, plus how much of the stream was
/// counted to get them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subset<V> {
    pub examples: Vec<Example<V>>,
    /// Examples (per-record mode) or groups (per-group mode) counted.
    pub num_read: u64,
}

impl<V> Subset<V> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

/// Streaming subset selector. See the [module docs](self).
///
/// ```
/// use egs_subset::{Example, SubsetConfig, SubsetSampler};
///
/// let cfg = SubsetConfig::default().with_n(10).with_seed(3);
/// let mut sampler = SubsetSampler::new(cfg);
/// for i in 0..1_000 {
///     sampler.offer(Example::new(format!("utt{i}-0"), i));
/// }
/// let subset = sampler.finish();
/// assert_eq!(subset.len(), 10);
/// assert_eq!(subset.num_read, 1_000);
/// ```
#[derive(Debug, Clone)]
pub struct SubsetSampler<V, R = ChaCha8Rng> {
    config: SubsetConfig,
    rng: R,
    reservoir: Vec<Example<V>>,
    num_read: u64,
    prev_group: String,
    halted: bool,
}

impl<V> SubsetSampler<V, ChaCha8Rng> {
    /// Sampler driven by a `ChaCha8Rng` seeded from `config.seed`.
    #[must_use]
    pub fn new(config: SubsetConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(config.seed))
    }
}

impl<V, R: Rng> SubsetSampler<V, R> {
    /// Sampler driven by a caller-supplied generator. `config.seed` is ignored.
    pub fn with_rng(config: SubsetConfig, rng: R) -> Self {
        let reserve = match config.mode() {
            SamplingMode::PerRecord => config.n.min(PREALLOC_LIMIT),
            SamplingMode::PerGroup => 0,
        };
        Self {
            config,
            rng,
            reservoir: Vec::with_capacity(reserve),
            num_read: 0,
            prev_group: String::new(),
            halted: false,
        }
    }

    pub fn config(&self) -> &SubsetConfig {
        &self.config
    }

    pub fn mode(&self) -> SamplingMode {
        self.config.mode()
    }

    /// Target subset size `n`.
    pub fn capacity(&self) -> usize {
        self.config.n
    }

    /// Examples (per-record) or groups (per-group) counted so far.
    pub fn num_read(&self) -> u64 {
        self.num_read
    }

    /// Number of examples currently held.
    pub fn len(&self) -> usize {
        self.reservoir.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservoir.is_empty()
    }

    /// True once per-group mode has asked to stop.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The reservoir as it currently stands, in slot order.
    pub fn reservoir(&self) -> &[Example<V>] {
        &self.reservoir
    }

    /// Offer the next example of the stream.
    ///
    /// Once [`Flow::Halt`] has been returned, further offers are ignored and
    /// also return `Halt`.
    pub fn offer(&mut self, example: Example<V>) -> Flow {
        if self.halted {
            return Flow::Halt;
        }
        match self.config.mode() {
            SamplingMode::PerRecord => {
                self.offer_record(example);
                Flow::Continue
            }
            SamplingMode::PerGroup => self.offer_grouped(example),
        }
    }

    fn offer_record(&mut self, example: Example<V>) {
        let n = self.config.n;
        self.num_read += 1;
        if self.num_read <= n as u64 {
            self.reservoir.push(example);
            return;
        }
        if n == 0 {
            return;
        }
        #[allow(clippy::cast_precision_loss)]
        let keep_prob = n as f64 / self.num_read as f64;
        if self.rng.random_bool(keep_prob) {
            let slot = self.rng.random_range(0..n);
            self.reservoir[slot] = example;
        }
    }

    fn offer_grouped(&mut self, example: Example<V>) -> Flow {
        let group = group_id(&example.key);
        if group != self.prev_group {
            self.num_read += 1;
        }
        if self.num_read >= self.config.n as u64 {
            self.halted = true;
            return Flow::Halt;
        }
        if group != self.prev_group {
            self.prev_group = group.to_owned();
        }
        self.reservoir.push(example);
        Flow::Continue
    }

    /// Finish the stream: order the reservoir for output using the same
    /// generator that drove selection.
    pub fn finish(mut self) -> Subset<V> {
        let examples = sequence(
            self.reservoir,
            self.config.mode(),
            self.config.randomize_order,
            &mut self.rng,
        );
        Subset {
            examples,
            num_read: self.num_read,
        }
    }
}

/// Sample an in-memory or otherwise infallible stream.
///
/// Stops pulling from `examples` as soon as the sampler halts.
pub fn sample_stream<V, I>(config: SubsetConfig, examples: I) -> Subset<V>
where
    I: IntoIterator<Item = Example<V>>,
{
    let mut sampler = SubsetSampler::new(config);
    for example in examples {
        if sampler.offer(example) == Flow::Halt {
            break;
        }
    }
    sampler.finish()
}

/// Sample a fallible stream, returning the first error unchanged.
///
/// Stops pulling from `examples` as soon as the sampler halts, so a halted
/// per-group run never sees errors further down the stream.
pub fn try_sample_stream<V, E, I>(config: SubsetConfig, examples: I) -> Result<Subset<V>, E>
where
    I: IntoIterator<Item = Result<Example<V>, E>>,
{
    let mut sampler = SubsetSampler::new(config);
    for example in examples {
        if sampler.offer(example?) == Flow::Halt {
            break;
        }
    }
    Ok(sampler.finish())
}
