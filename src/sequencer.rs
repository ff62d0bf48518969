//! Output ordering for a finished reservoir.

use crate::config::SamplingMode;
use crate::record::Example;
use rand::Rng;
use rand::seq::SliceRandom;

/// Put a finished reservoir into emission order.
///
/// - Per-record mode with `randomize_order`: a uniform random permutation
///   (Fisher-Yates) drawn from `rng`.
/// - Per-record mode without it: the reservoir order as built. That order is
///   an artifact of filling and slot replacement, not stream order.
/// - Per-group mode: untouched, whatever `randomize_order` says, so the
///   records of each group stay contiguous and in stream order.
pub fn sequence<V, R>(
    mut reservoir: Vec<Example<V>>,
    mode: SamplingMode,
    randomize_order: bool,
    rng: &mut R,
) -> Vec<Example<V>>
where
    R: Rng + ?Sized,
{
    if mode == SamplingMode::PerRecord && randomize_order {
        reservoir.shuffle(rng);
    }
    reservoir
}
