//! In-memory source and sink.

use super::{RecordSink, RecordSource};
use crate::record::Example;
use anyhow::{Result, bail};
use std::collections::VecDeque;

/// A [`RecordSource`] over a vector of examples.
///
/// Tracks how many examples have been handed out, so tests can check where a
/// per-group run stopped reading.
#[derive(Debug, Clone, Default)]
pub struct VecSource<V> {
    pending: VecDeque<Example<V>>,
    consumed: usize,
}

impl<V> VecSource<V> {
    pub fn new(examples: impl IntoIterator<Item = Example<V>>) -> Self {
        Self {
            pending: examples.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Examples handed out by [`RecordSource::advance`] so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Examples not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl<V> RecordSource<V> for VecSource<V> {
    fn has_next(&self) -> bool {
        !self.pending.is_empty()
    }

    fn current_key(&self) -> &str {
        &self.pending[0].key
    }

    fn current_value(&self) -> &V {
        &self.pending[0].value
    }

    fn advance(&mut self) -> Result<Example<V>> {
        let Some(example) = self.pending.pop_front() else {
            bail!("advance past the end of an in-memory source");
        };
        self.consumed += 1;
        Ok(example)
    }
}

/// A [`RecordSink`] collecting examples into a vector.
#[derive(Debug, Clone, Default)]
pub struct VecSink<V> {
    examples: Vec<Example<V>>,
    finished: bool,
}

impl<V> VecSink<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            examples: Vec::new(),
            finished: false,
        }
    }

    #[must_use]
    pub fn examples(&self) -> &[Example<V>] {
        &self.examples
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.examples.iter().map(|e| e.key.as_str()).collect()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn into_examples(self) -> Vec<Example<V>> {
        self.examples
    }
}

impl<V> RecordSink<V> for VecSink<V> {
    fn write(&mut self, key: String, value: V) -> Result<()> {
        if self.finished {
            bail!("write after finish");
        }
        self.examples.push(Example { key, value });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_walks_in_order() -> Result<()> {
        let mut src = VecSource::new(vec![Example::new("a", 1), Example::new("b", 2)]);
        assert!(src.has_next());
        assert_eq!(src.current_key(), "a");
        assert_eq!(*src.current_value(), 1);
        assert_eq!(src.advance()?, Example::new("a", 1));
        assert_eq!(src.current_key(), "b");
        let rest: Vec<_> = src.examples().collect::<Result<_>>()?;
        assert_eq!(rest, vec![Example::new("b", 2)]);
        assert!(!src.has_next());
        assert_eq!(src.consumed(), 2);
        assert!(src.advance().is_err());
        Ok(())
    }

    #[test]
    fn sink_rejects_writes_after_finish() -> Result<()> {
        let mut sink = VecSink::new();
        let n = sink.write_all(vec![Example::new("x", 0u8), Example::new("y", 1)])?;
        assert_eq!(n, 2);
        sink.finish()?;
        assert!(sink.write("z".into(), 2).is_err());
        assert_eq!(sink.keys(), vec!["x", "y"]);
        Ok(())
    }
}
