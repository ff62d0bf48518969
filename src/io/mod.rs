//! Stream collaborators around the sampler.
//!
//! The sampler itself never touches files. It is fed by a [`RecordSource`]
//! and its output is drained into a [`RecordSink`]:
//!
//! - [`jsonl`]: streaming JSON Lines reader/writer (`-` means stdin/stdout)
//! - [`memory`]: in-memory source and sink, handy in tests
//! - [`compression`]: transparent gzip/zstd wrapping, picked by extension or
//!   magic bytes

use crate::record::Example;
use anyhow::Result;

pub mod compression;
pub mod jsonl;
pub mod memory;

/// Sequential cursor over keyed examples.
///
/// Keys come out in source order. Per-group sampling additionally relies on
/// all examples of a group being contiguous.
pub trait RecordSource<V> {
    /// Whether a current example is available.
    fn has_next(&self) -> bool;

    /// Key of the current example.
    ///
    /// # Panics
    /// May panic when called while [`has_next`](Self::has_next) is false.
    fn current_key(&self) -> &str;

    /// Payload of the current example.
    ///
    /// # Panics
    /// May panic when called while [`has_next`](Self::has_next) is false.
    fn current_value(&self) -> &V;

    /// Hand over the current example and load the next one.
    ///
    /// # Errors
    /// Returns an error when the next example cannot be read or decoded.
    fn advance(&mut self) -> Result<Example<V>>;

    /// Iterate the remaining examples. A failed read is yielded as `Err`;
    /// callers should stop at the first one.
    fn examples(&mut self) -> Examples<'_, Self, V>
    where
        Self: Sized,
    {
        Examples {
            source: self,
            _v: std::marker::PhantomData,
        }
    }
}

/// Iterator returned by [`RecordSource::examples`].
pub struct Examples<'a, S, V> {
    source: &'a mut S,
    _v: std::marker::PhantomData<V>,
}

impl<S: RecordSource<V>, V> Iterator for Examples<'_, S, V> {
    type Item = Result<Example<V>>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.source.has_next() {
            return None;
        }
        Some(self.source.advance())
    }
}

/// Destination for the selected examples, written once each in final order.
pub trait RecordSink<V> {
    /// # Errors
    /// Returns an error when the example cannot be encoded or written.
    fn write(&mut self, key: String, value: V) -> Result<()>;

    /// Flush buffered output and finalize any compression stream.
    ///
    /// # Errors
    /// Returns an error when flushing or finalizing fails.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }

    /// Write every example in order, returning how many were written.
    ///
    /// # Errors
    /// Stops at and returns the first write error.
    fn write_all<I>(&mut self, examples: I) -> Result<usize>
    where
        I: IntoIterator<Item = Example<V>>,
        Self: Sized,
    {
        let mut written = 0;
        for example in examples {
            let (key, value) = example.into_parts();
            self.write(key, value)?;
            written += 1;
        }
        Ok(written)
    }
}

impl<V, K: RecordSink<V> + ?Sized> RecordSink<V> for &mut K {
    fn write(&mut self, key: String, value: V) -> Result<()> {
        (**self).write(key, value)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}
