//! Group identifiers derived from example keys.
//!
//! Examples cut from the same utterance share a key prefix and differ only in
//! their final `-`-delimited segment (`utt7-0`, `utt7-1`, ...). Per-group
//! sampling keeps or rejects all of them together.

/// Return the group identifier of `key`: everything before its last `-`.
///
/// A key with no `-` is its own group.
///
/// # Examples
/// ```
/// use egs_subset::group_id;
///
/// assert_eq!(group_id("spk1-utt3-0042"), "spk1-utt3");
/// assert_eq!(group_id("standalone"), "standalone");
/// ```
#[must_use]
pub fn group_id(key: &str) -> &str {
    match key.rfind('-') {
        Some(idx) => &key[..idx],
        None => key,
    }
}
