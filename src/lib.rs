//! # egs-subset
//!
//! Bounded-memory random subsets of keyed example streams.
//!
//! Given a stream of `(key, value)` training examples of unknown and possibly
//! huge length, `egs-subset` keeps a subset of at most `n` of them while
//! holding only that subset in memory. It is meant for cutting a smaller,
//! representative training set out of a large example archive in one pass.
//!
//! ## Key Features
//!
//! - **Per-record mode** - uniform reservoir sample of `n` examples
//! - **Per-group mode** - keep whole groups of contiguous examples that share
//!   a key prefix (the key up to its last `-`), in stream order until the
//!   group count reaches `n`
//! - **Reproducible** - one explicitly seeded generator per run
//! - **Streaming I/O** - JSON Lines archives, stdin/stdout, gzip and zstd
//!
//! ## Quick Start
//!
//! ```
//! use egs_subset::*;
//!
//! let stream = (0..10_000).map(|i| Example::new(format!("utt{i}-0"), i));
//! let cfg = SubsetConfig::default().with_n(100).with_seed(17);
//! let subset = sample_stream(cfg, stream);
//!
//! assert_eq!(subset.len(), 100);
//! assert_eq!(subset.num_read, 10_000);
//! ```
//!
//! Driving files end to end:
//!
//! ```no_run
//! use egs_subset::{Runner, SubsetConfig};
//! use serde_json::Value;
//! # fn main() -> anyhow::Result<()> {
//! let summary = Runner::new(SubsetConfig::default().with_n(1000))
//!     .run_files::<Value>("egs.jsonl.gz", "subset.jsonl")?;
//! assert!(summary.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`sampler`] - the streaming selector and its stream drivers
//! - [`sequencer`] - output ordering of a finished reservoir
//! - [`group`] - group identifiers derived from keys
//! - [`config`] - run parameters
//! - [`io`] - source/sink traits, JSON Lines, compression
//! - [`runner`] - source-to-sink driver and run summary
//! - [`cli`] - the `egs-subset` command line
//! - [`testing`] - fixtures and assertions for downstream tests

pub mod cli;
pub mod config;
pub mod group;
pub mod io;
pub mod record;
pub mod runner;
pub mod sampler;
pub mod sequencer;
pub mod testing;

pub use config::{SamplingMode, SubsetConfig};
pub use group::group_id;
pub use io::{RecordSink, RecordSource};
pub use record::Example;
pub use runner::{RunSummary, Runner};
pub use sampler::{Flow, Subset, SubsetSampler, sample_stream, try_sample_stream};
pub use sequencer::sequence;
