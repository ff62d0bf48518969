//! Assertions for sampler output.

use crate::group::group_id;
use crate::record::Example;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

/// Assert that no group identifier reappears after a different one.
///
/// # Panics
///
/// Panics naming the first group that was split.
///
/// # Example
///
/// ```
/// use egs_subset::Example;
/// use egs_subset::testing::assert_groups_contiguous;
///
/// assert_groups_contiguous(&[Example::new("a-0", ()), Example::new("a-1", ()), Example::new("b-0", ())]);
/// ```
pub fn assert_groups_contiguous<V>(examples: &[Example<V>]) {
    let mut closed: HashSet<&str> = HashSet::new();
    let mut current: Option<&str> = None;
    for (i, example) in examples.iter().enumerate() {
        let group = group_id(&example.key);
        if current == Some(group) {
            continue;
        }
        assert!(
            !closed.contains(group),
            "Group {group:?} is split: it reappears at index {i} (key {:?})",
            example.key
        );
        if let Some(prev) = current {
            closed.insert(prev);
        }
        current = Some(group);
    }
}

/// Assert that two example lists hold the same keys with the same
/// multiplicities, ignoring order.
///
/// # Panics
///
/// Panics listing the keys whose counts differ.
pub fn assert_same_keys<V>(actual: &[Example<V>], expected: &[Example<V>]) {
    let count = |v: &[Example<V>]| {
        let mut m: HashMap<String, usize> = HashMap::new();
        for e in v {
            *m.entry(e.key.clone()).or_default() += 1;
        }
        m
    };
    let a = count(actual);
    let e = count(expected);
    if a != e {
        let mut diff: Vec<_> = a
            .keys()
            .chain(e.keys())
            .collect::<HashSet<_>>()
            .into_iter()
            .filter(|k| a.get(*k) != e.get(*k))
            .map(|k| (k.clone(), a.get(k).copied().unwrap_or(0), e.get(k).copied().unwrap_or(0)))
            .collect();
        diff.sort();
        panic!("Key multisets differ (key, actual, expected): {diff:?}");
    }
}

/// Assert that every example in `subset` occurs in `stream`, key and payload
/// intact, and that no stream example was emitted twice.
///
/// # Panics
///
/// Panics on the first example that is foreign or duplicated.
pub fn assert_subset_of<V: Debug + PartialEq>(subset: &[Example<V>], stream: &[Example<V>]) {
    let by_key: HashMap<&str, &Example<V>> = stream.iter().map(|e| (e.key.as_str(), e)).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    for example in subset {
        let Some(original) = by_key.get(example.key.as_str()) else {
            panic!("Example {:?} is not in the input stream", example.key);
        };
        assert_eq!(
            *original, example,
            "Example {:?} does not match its input record",
            example.key
        );
        assert!(
            seen.insert(example.key.as_str()),
            "Example {:?} emitted more than once",
            example.key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ex(keys: &[&str]) -> Vec<Example<()>> {
        keys.iter().map(|k| Example::new(*k, ())).collect()
    }

    #[test]
    #[should_panic(expected = "is split")]
    fn split_group_is_caught() {
        assert_groups_contiguous(&ex(&["a-0", "b-0", "a-1"]));
    }

    #[test]
    fn same_keys_ignores_order() {
        assert_same_keys(&ex(&["x", "y", "x"]), &ex(&["x", "x", "y"]));
    }

    #[test]
    #[should_panic(expected = "Key multisets differ")]
    fn same_keys_counts_duplicates() {
        assert_same_keys(&ex(&["x", "y"]), &ex(&["x", "x", "y"]));
    }

    #[test]
    #[should_panic(expected = "more than once")]
    fn duplicates_are_not_a_subset() {
        assert_subset_of(&ex(&["a", "a"]), &ex(&["a", "b"]));
    }
}
