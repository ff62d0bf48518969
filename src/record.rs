//! Keyed training examples.

use serde::{Deserialize, Serialize};

/// One keyed record from an example stream.
///
/// The payload is opaque to the sampler: it is moved around whole and never
/// inspected. On disk a record is one JSON Lines object,
/// `{"key": "...", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Example<V> {
    pub key: String,
    pub value: V,
}

impl<V> Example<V> {
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Group identifier of this example's key. See [`crate::group_id`].
    #[must_use]
    pub fn group_id(&self) -> &str {
        crate::group::group_id(&self.key)
    }

    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

impl<V> From<(String, V)> for Example<V> {
    fn from((key, value): (String, V)) -> Self {
        Self { key, value }
    }
}

impl<V> From<(&str, V)> for Example<V> {
    fn from((key, value): (&str, V)) -> Self {
        Self::new(key, value)
    }
}
