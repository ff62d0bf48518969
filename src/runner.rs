//! Drives one subsetting run from a source to a sink.

use crate::config::{SamplingMode, SubsetConfig};
use crate::io::jsonl::{JsonlReader, JsonlWriter};
use crate::io::{RecordSink, RecordSource};
use crate::sampler::{Subset, try_sample_stream};
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub mode: SamplingMode,
    /// Examples (per-record) or groups (per-group) counted from the input.
    pub num_read: u64,
    /// Examples written to the output.
    pub selected: usize,
    /// Whether the output order was shuffled.
    pub shuffled: bool,
}

impl RunSummary {
    /// A run that read nothing is a failure, even though it completed cleanly.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.num_read != 0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Runner {
    pub config: SubsetConfig,
}

impl Runner {
    #[must_use]
    pub const fn new(config: SubsetConfig) -> Self {
        Self { config }
    }

    /// Sample everything `source` yields (or up to the per-group halt).
    ///
    /// # Errors
    /// Returns the first read error from `source`, unmodified.
    pub fn sample<V, S>(&self, source: &mut S) -> Result<Subset<V>>
    where
        S: RecordSource<V>,
    {
        debug!(config = ?self.config, "sampling");
        try_sample_stream(self.config, source.examples())
    }

    /// Write a finished subset to `sink` and finish the sink.
    ///
    /// # Errors
    /// Returns the first write or flush error from `sink`.
    pub fn emit<V, K>(&self, subset: Subset<V>, sink: &mut K) -> Result<RunSummary>
    where
        K: RecordSink<V>,
    {
        let num_read = subset.num_read;
        let selected = sink.write_all(subset.examples)?;
        sink.finish()?;
        let summary = RunSummary {
            mode: self.config.mode(),
            num_read,
            selected,
            shuffled: self.config.shuffles_output(),
        };
        report(&summary);
        Ok(summary)
    }

    /// Sample `source` into `sink`.
    ///
    /// # Errors
    /// Propagates source and sink errors.
    pub fn run<V, S, K>(&self, source: &mut S, sink: &mut K) -> Result<RunSummary>
    where
        S: RecordSource<V>,
        K: RecordSink<V>,
    {
        let subset = self.sample(source)?;
        self.emit(subset, sink)
    }

    /// Sample a JSON Lines archive into another. The output is only created
    /// once the input has been fully sampled.
    ///
    /// # Errors
    /// Returns an error if either file cannot be opened or any example fails
    /// to parse or write.
    pub fn run_files<V>(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<RunSummary>
    where
        V: DeserializeOwned + Serialize,
    {
        let input = input.as_ref();
        let output = output.as_ref();
        let mut reader = JsonlReader::<V>::open(input)?;
        let subset = self
            .sample(&mut reader)
            .with_context(|| format!("sample {}", input.display()))?;
        let mut writer = JsonlWriter::create(output)?;
        self.emit(subset, &mut writer)
    }
}

fn report(summary: &RunSummary) {
    let unit = match summary.mode {
        SamplingMode::PerRecord => "examples",
        SamplingMode::PerGroup => "groups",
    };
    info!(
        num_read = summary.num_read,
        selected = summary.selected,
        shuffled = summary.shuffled,
        "selected a subset of {} examples out of {} {unit}",
        summary.selected,
        summary.num_read
    );
    if !summary.is_success() {
        warn!("no examples were read from the input");
    }
}
