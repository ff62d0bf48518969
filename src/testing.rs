//! Testing utilities for code built on the sampler.
//!
//! - **Fixtures**: keyed and grouped example streams
//! - **Assertions**: group contiguity, key multisets, subset membership
//! - **Mock I/O**: temporary JSON Lines archives
//!
//! # Quick Start
//!
//! ```
//! use egs_subset::testing::*;
//! use egs_subset::{SubsetConfig, sample_stream};
//!
//! let stream = grouped_examples(&[2, 1, 3]);
//! let cfg = SubsetConfig::default().with_n(2).with_per_group(true);
//! let subset = sample_stream(cfg, stream.clone());
//!
//! assert_groups_contiguous(&subset.examples);
//! assert_subset_of(&subset.examples, &stream);
//! assert_eq!(subset.len(), 2);
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock_io;

pub use assertions::*;
pub use fixtures::*;
pub use mock_io::*;
