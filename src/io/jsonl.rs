//! JSON Lines example archives.
//!
//! One example per line, `{"key": "<string>", "value": <any JSON>}`.
//!
//! - [`JsonlReader`] streams a file (or stdin) one line at a time and is a
//!   [`RecordSource`]; the whole archive is never held in memory.
//! - [`JsonlWriter`] is the matching [`RecordSink`].
//! - [`read_examples`] / [`write_examples`] are whole-file conveniences.
//!
//! # Notes
//! - Empty/whitespace-only lines are skipped on read but still counted for
//!   line numbers in error messages.
//! - The path `-` means stdin for readers and stdout for writers.
//! - Compression is detected as described in [`crate::io::compression`].

use super::compression::{CompressedWriter, auto_detect_reader, auto_detect_writer};
use super::{RecordSink, RecordSource};
use crate::record::Example;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{File, create_dir_all};
use std::io::{BufRead, Write};
use std::path::Path;

/// Path that selects stdin/stdout instead of a file.
pub const STDIO_PATH: &str = "-";

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

/// Streaming reader over a JSON Lines archive.
pub struct JsonlReader<V> {
    input: Box<dyn BufRead>,
    label: String,
    line_no: usize,
    buf: String,
    current: Option<Example<V>>,
}

impl<V: DeserializeOwned> JsonlReader<V> {
    /// Open `path` (or stdin for `-`) and load the first example.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its first example
    /// cannot be parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if is_stdio(path) {
            let input = auto_detect_reader(std::io::stdin(), path)
                .context("setup decompression for <stdin>")?;
            return Self::from_reader(input, "<stdin>");
        }
        let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let input = auto_detect_reader(f, path)
            .with_context(|| format!("setup decompression for {}", path.display()))?;
        Self::from_reader(input, path.display().to_string())
    }

    /// Read from an already-open stream. `label` names it in error messages.
    ///
    /// # Errors
    /// Returns an error if the first example cannot be read or parsed.
    pub fn from_reader(input: impl BufRead + 'static, label: impl Into<String>) -> Result<Self> {
        let mut reader = Self {
            input: Box::new(input),
            label: label.into(),
            line_no: 0,
            buf: String::new(),
            current: None,
        };
        reader.current = reader.read_next()?;
        Ok(reader)
    }

    /// 1-based number of the last line read (0 before the first).
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    fn read_next(&mut self) -> Result<Option<Example<V>>> {
        loop {
            self.buf.clear();
            let n = self
                .input
                .read_line(&mut self.buf)
                .with_context(|| format!("read line {} in {}", self.line_no + 1, self.label))?;
            if n == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            let example = serde_json::from_str(line)
                .with_context(|| format!("parse JSONL line {} in {}", self.line_no, self.label))?;
            return Ok(Some(example));
        }
    }
}

impl<V: DeserializeOwned> RecordSource<V> for JsonlReader<V> {
    fn has_next(&self) -> bool {
        self.current.is_some()
    }

    fn current_key(&self) -> &str {
        &self.current.as_ref().expect("current_key on exhausted reader").key
    }

    fn current_value(&self) -> &V {
        &self.current.as_ref().expect("current_value on exhausted reader").value
    }

    fn advance(&mut self) -> Result<Example<V>> {
        let Some(example) = self.current.take() else {
            bail!("advance past the end of {}", self.label);
        };
        self.current = self.read_next()?;
        Ok(example)
    }
}

#[derive(Serialize)]
struct ExampleRef<'a, V> {
    key: &'a str,
    value: &'a V,
}

/// Writer producing a JSON Lines archive, compressed by extension.
pub struct JsonlWriter {
    out: Option<CompressedWriter<Box<dyn Write>>>,
    label: String,
    written: usize,
}

impl JsonlWriter {
    /// Create `path` (or use stdout for `-`). Parent directories are created
    /// as needed.
    ///
    /// # Errors
    /// Returns an error if the file or its directories cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if is_stdio(path) {
            return Ok(Self::from_writer(std::io::stdout(), "<stdout>"));
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
        }
        let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let out: Box<dyn Write> = Box::new(f);
        let out = auto_detect_writer(out, path)
            .with_context(|| format!("setup compression for {}", path.display()))?;
        Ok(Self {
            out: Some(out),
            label: path.display().to_string(),
            written: 0,
        })
    }

    /// Uncompressed writer over an already-open stream.
    pub fn from_writer(out: impl Write + 'static, label: impl Into<String>) -> Self {
        let out: Box<dyn Write> = Box::new(out);
        Self {
            out: Some(CompressedWriter::Plain(std::io::BufWriter::new(out))),
            label: label.into(),
            written: 0,
        }
    }

    /// Examples written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Append one example as a single JSON line.
    ///
    /// # Errors
    /// Returns an error if the value cannot be serialized or written, or if
    /// the writer was already finished.
    pub fn write_example<V: Serialize>(&mut self, key: &str, value: &V) -> Result<()> {
        let Some(out) = self.out.as_mut() else {
            bail!("write to {} after finish", self.label);
        };
        serde_json::to_writer(&mut *out, &ExampleRef { key, value }).with_context(|| {
            format!("serialize example #{} ({key}) to {}", self.written, self.label)
        })?;
        out.write_all(b"\n")
            .with_context(|| format!("write to {}", self.label))?;
        self.written += 1;
        Ok(())
    }
}

impl<V: Serialize> RecordSink<V> for JsonlWriter {
    fn write(&mut self, key: String, value: V) -> Result<()> {
        self.write_example(&key, &value)
    }

    fn finish(&mut self) -> Result<()> {
        match self.out.take() {
            Some(out) => out
                .finish()
                .with_context(|| format!("flush {}", self.label)),
            None => Ok(()),
        }
    }
}

/// Read a whole archive into memory.
///
/// # Errors
/// Returns an error if the file cannot be opened or any line fails to parse.
pub fn read_examples<V: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<Example<V>>> {
    let mut reader = JsonlReader::open(path)?;
    reader.examples().collect()
}

/// Write `examples` as an archive, returning the number written.
///
/// # Errors
/// Returns an error if the file cannot be created or any example fails to
/// serialize or flush.
pub fn write_examples<V: Serialize>(path: impl AsRef<Path>, examples: &[Example<V>]) -> Result<usize> {
    let mut writer = JsonlWriter::create(path)?;
    for example in examples {
        writer.write_example(&example.key, &example.value)?;
    }
    RecordSink::<V>::finish(&mut writer)?;
    Ok(writer.written())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::io::Cursor;

    fn reader(text: &str) -> Result<JsonlReader<Value>> {
        JsonlReader::from_reader(Cursor::new(text.as_bytes().to_vec()), "mem")
    }

    #[test]
    fn skips_blank_lines() -> Result<()> {
        let mut r = reader("\n{\"key\":\"a-0\",\"value\":1}\n   \n{\"key\":\"a-1\",\"value\":[2]}\n")?;
        assert_eq!(r.current_key(), "a-0");
        assert_eq!(r.current_value(), &json!(1));
        let all: Vec<_> = r.examples().collect::<Result<_>>()?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[1], Example::new("a-1", json!([2])));
        assert_eq!(r.line_number(), 4);
        Ok(())
    }

    #[test]
    fn empty_input_has_nothing() -> Result<()> {
        let r = reader("")?;
        assert!(!r.has_next());
        Ok(())
    }

    #[test]
    fn parse_error_names_the_line() {
        let mut r = reader("{\"key\":\"a\",\"value\":0}\nnot json\n").unwrap();
        let err = r.advance().unwrap_err();
        assert!(format!("{err:#}").contains("parse JSONL line 2 in mem"), "{err:#}");
    }

    #[test]
    fn bad_first_line_fails_on_open() {
        let err = reader("{\"value\":0}\n").err().unwrap();
        assert!(format!("{err:#}").contains("line 1"));
    }
}
