//! Temporary example archives for I/O tests.

use crate::io::jsonl::write_examples;
use crate::record::Example;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

/// A temporary file that is deleted when dropped.
pub struct TempFilePath {
    #[allow(dead_code)]
    temp_file: NamedTempFile,
    path: PathBuf,
}

impl TempFilePath {
    /// Create an empty temporary file whose name ends in `suffix`
    /// (e.g. `".jsonl.gz"`), so compression is picked up from the name.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created.
    pub fn with_suffix(suffix: &str) -> std::io::Result<Self> {
        let temp_file = tempfile::Builder::new().suffix(suffix).tempfile()?;
        let path = temp_file.path().to_path_buf();
        Ok(Self { temp_file, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A temporary directory that is deleted when dropped.
pub struct TempDirPath {
    #[allow(dead_code)]
    temp_dir: TempDir,
    path: PathBuf,
}

impl TempDirPath {
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();
        Ok(Self { temp_dir, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of `filename` inside this directory. The file is not created.
    #[must_use]
    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }
}

/// Write `examples` to a fresh temporary archive named `*{suffix}`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
///
/// # Example
///
/// ```
/// use egs_subset::io::jsonl::read_examples;
/// use egs_subset::testing::{keyed_examples, mock_jsonl_file};
///
/// let file = mock_jsonl_file(&keyed_examples(4), ".jsonl").unwrap();
/// let back = read_examples::<u32>(file.path()).unwrap();
/// assert_eq!(back.len(), 4);
/// ```
pub fn mock_jsonl_file<V: Serialize>(
    examples: &[Example<V>],
    suffix: &str,
) -> anyhow::Result<TempFilePath> {
    let temp = TempFilePath::with_suffix(suffix)?;
    write_examples(temp.path(), examples)?;
    Ok(temp)
}
