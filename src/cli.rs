//! Command-line front end for the `egs-subset` binary.

use crate::config::{DEFAULT_SUBSET_SIZE, SubsetConfig};
use crate::runner::{RunSummary, Runner};
use anyhow::Result;
use clap::{ArgAction, Parser, error::ErrorKind};
use serde_json::Value;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

/// Exit status when the input held no examples.
pub const EXIT_EMPTY_INPUT: u8 = 1;
/// Exit status for bad arguments (clap's usage status).
pub const EXIT_USAGE: u8 = 2;
/// Exit status for I/O and decoding failures.
pub const EXIT_FAILURE: u8 = 3;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "egs-subset",
    version,
    disable_help_subcommand = true,
    about = "Creates a random subset of the input examples, of a specified size",
    long_about = "Creates a random subset of the input examples, of a specified size. \
                  Uses no more memory than the size of the subset.",
    after_help = "Examples are JSON Lines records {\"key\": ..., \"value\": ...}; \
                  use - for stdin/stdout. .gz and .zst files are (de)compressed transparently.\n\n\
                  e.g.\n  egs-subset --n=1000 egs.jsonl.gz subset.jsonl"
)]
pub struct SubsetArgs {
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_SUBSET_SIZE,
        help = "Number of examples to output; in per-group mode, reading stops at the n-th group"
    )]
    pub n: usize,
    #[arg(
        long = "randomize-order",
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "If true, randomize the order of the output (ignored in per-group mode)"
    )]
    pub randomize_order: bool,
    #[arg(
        long = "per-group",
        visible_alias = "per-utt",
        value_name = "BOOL",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "If true, keep whole groups of examples sharing a key prefix (the key up to its last '-')"
    )]
    pub per_group: bool,
    #[arg(
        long = "srand",
        visible_alias = "seed",
        value_name = "SEED",
        default_value_t = 0,
        help = "Seed for the random number generator"
    )]
    pub seed: u64,
    #[arg(value_name = "INPUT", help = "Input examples, or - for stdin")]
    pub input: PathBuf,
    #[arg(value_name = "OUTPUT", help = "Output examples, or - for stdout")]
    pub output: PathBuf,
}

impl SubsetArgs {
    #[must_use]
    pub fn config(&self) -> SubsetConfig {
        SubsetConfig::default()
            .with_n(self.n)
            .with_randomize_order(self.randomize_order)
            .with_per_group(self.per_group)
            .with_seed(self.seed)
    }
}

/// Parse arguments. Help and version requests are printed and yield `None`.
///
/// # Errors
/// Returns the clap error for any other parse failure.
pub fn parse_cli<I>(args: I) -> Result<Option<SubsetArgs>, clap::Error>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    match SubsetArgs::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err),
        },
    }
}

/// Parse `args` (including the program name) and run. No input is opened
/// when the arguments are invalid.
///
/// # Errors
/// Usage errors come back as a wrapped [`clap::Error`]; I/O and decoding
/// errors are propagated as-is.
pub fn run_cli<I>(args: I) -> Result<Option<RunSummary>>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    let Some(cli) = parse_cli(args)? else {
        return Ok(None);
    };
    let summary = Runner::new(cli.config()).run_files::<Value>(&cli.input, &cli.output)?;
    Ok(Some(summary))
}

/// Map the result of [`run_cli`] to a process exit status.
#[must_use]
pub fn exit_status(result: &Result<Option<RunSummary>>) -> u8 {
    match result {
        Ok(None) => 0,
        Ok(Some(summary)) if summary.is_success() => 0,
        Ok(Some(_)) => EXIT_EMPTY_INPUT,
        Err(err) if err.downcast_ref::<clap::Error>().is_some() => EXIT_USAGE,
        Err(_) => EXIT_FAILURE,
    }
}

/// Write a failed run's error to `out`: clap's own rendering for usage errors,
/// `error: ` plus the context chain for everything else.
///
/// # Errors
/// Returns the error from writing to `out`.
pub fn report_error<W: Write>(err: &anyhow::Error, out: &mut W) -> std::io::Result<()> {
    match err.downcast_ref::<clap::Error>() {
        Some(usage) => write!(out, "{}", usage.render()),
        None => writeln!(out, "error: {err:#}"),
    }
}

/// Install the stderr `tracing` subscriber, honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
