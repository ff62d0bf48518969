//! Pre-built example streams.

use crate::record::Example;
use serde_json::{Value, json};

/// `count` single-example utterances, keyed `utt{i}-0` with value `i`.
///
/// ```
/// use egs_subset::testing::keyed_examples;
///
/// let v = keyed_examples(3);
/// assert_eq!(v[2].key, "utt2-0");
/// assert_eq!(v[2].value, 2);
/// ```
#[must_use]
pub fn keyed_examples(count: u32) -> Vec<Example<u32>> {
    (0..count)
        .map(|i| Example::new(format!("utt{i}-0"), i))
        .collect()
}

/// Contiguous groups of the given sizes. Group `g` has keys `grp{g}-{j}`;
/// values number the examples in stream order.
///
/// ```
/// use egs_subset::testing::grouped_examples;
///
/// let keys: Vec<_> = grouped_examples(&[2, 1])
///     .into_iter()
///     .map(|e| e.key)
///     .collect();
/// assert_eq!(keys, ["grp0-0", "grp0-1", "grp1-0"]);
/// ```
#[must_use]
pub fn grouped_examples(sizes: &[usize]) -> Vec<Example<u32>> {
    let mut out = Vec::with_capacity(sizes.iter().sum());
    let mut next = 0u32;
    for (g, &size) in sizes.iter().enumerate() {
        for j in 0..size {
            out.push(Example::new(format!("grp{g}-{j}"), next));
            next += 1;
        }
    }
    out
}

/// Example archive records shaped like neural-net training examples:
/// `groups` utterances of `frames_per_group` examples each.
#[must_use]
pub fn sample_training_examples(groups: usize, frames_per_group: usize) -> Vec<Example<Value>> {
    let mut out = Vec::with_capacity(groups * frames_per_group);
    for g in 0..groups {
        for t in 0..frames_per_group {
            out.push(Example::new(
                format!("spk{}-utt{g}-{t}", g % 3),
                json!({
                    "labels": [[t, 1.0]],
                    "features": [g as f64 * 0.5, t as f64 * 0.25],
                    "left_context": 4,
                }),
            ));
        }
    }
    out
}
