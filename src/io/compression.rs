//! Transparent compression for example archives.
//!
//! Readers are wrapped by file extension first and by magic bytes second, so
//! a gzip stream piped through stdin is still recognized. Writers are wrapped
//! by extension only.
//!
//! | codec | extensions | magic | feature |
//! |---|---|---|---|
//! | gzip | `.gz`, `.gzip` | `1f 8b` | `compression-gzip` |
//! | zstd | `.zst`, `.zstd` | `28 b5 2f fd` | `compression-zstd` |
//!
//! With a codec's feature disabled its files are passed through as-is.
//!
//! ```no_run
//! use egs_subset::io::compression::{auto_detect_reader, auto_detect_writer};
//! use std::fs::File;
//! use std::io::Write;
//! # fn main() -> anyhow::Result<()> {
//! let reader = auto_detect_reader(File::open("egs.jsonl.gz")?, "egs.jsonl.gz")?;
//! let mut writer = auto_detect_writer(File::create("subset.jsonl.zst")?, "subset.jsonl.zst")?;
//! writer.write_all(b"{}\n")?;
//! writer.finish()?;
//! # drop(reader);
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A compression format this crate knows how to detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Gzip,
    Zstd,
}

impl Codec {
    pub const ALL: [Self; 2] = [Self::Gzip, Self::Zstd];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Zstd => "zstd",
        }
    }

    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Gzip => &[".gz", ".gzip"],
            Self::Zstd => &[".zst", ".zstd"],
        }
    }

    #[must_use]
    pub const fn magic_bytes(self) -> &'static [u8] {
        match self {
            Self::Gzip => &[0x1f, 0x8b],
            Self::Zstd => &[0x28, 0xb5, 0x2f, 0xfd],
        }
    }

    /// Whether support for this codec was compiled in.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        match self {
            Self::Gzip => cfg!(feature = "compression-gzip"),
            Self::Zstd => cfg!(feature = "compression-zstd"),
        }
    }

    /// Enabled codec matching the path's extension, case-insensitively.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        Self::ALL
            .into_iter()
            .filter(|c| c.is_enabled())
            .find(|c| c.extensions().iter().any(|ext| name.ends_with(ext)))
    }

    /// Enabled codec whose signature starts `header`.
    #[must_use]
    pub fn from_magic(header: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .filter(|c| c.is_enabled())
            .find(|c| header.starts_with(c.magic_bytes()))
    }

    fn decode<R: BufRead + 'static>(self, reader: R) -> Result<Box<dyn BufRead>> {
        match self {
            #[cfg(feature = "compression-gzip")]
            Self::Gzip => Ok(Box::new(BufReader::new(
                flate2::bufread::MultiGzDecoder::new(reader),
            ))),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd => {
                let decoder = zstd::stream::read::Decoder::with_buffer(reader)?;
                Ok(Box::new(BufReader::new(decoder)))
            }
            #[allow(unreachable_patterns)]
            other => {
                drop(reader);
                anyhow::bail!("{} support is not compiled in", other.name())
            }
        }
    }

    fn encode<W: Write>(self, writer: BufWriter<W>) -> Result<CompressedWriter<W>> {
        match self {
            #[cfg(feature = "compression-gzip")]
            Self::Gzip => Ok(CompressedWriter::Gzip(flate2::write::GzEncoder::new(
                writer,
                flate2::Compression::default(),
            ))),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd => Ok(CompressedWriter::Zstd(zstd::stream::write::Encoder::new(
                writer, 3,
            )?)),
            #[allow(unreachable_patterns)]
            other => {
                drop(writer);
                anyhow::bail!("{} support is not compiled in", other.name())
            }
        }
    }
}

/// Wrap `reader` with a decompressor when `path_hint` or the stream header
/// says it is compressed. Otherwise the stream is returned buffered as-is.
///
/// # Errors
/// Returns an error if the header cannot be read or the decoder cannot be set up.
pub fn auto_detect_reader<R: Read + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> Result<Box<dyn BufRead>> {
    let mut buffered = BufReader::new(reader);
    let codec = match Codec::from_path(&path_hint) {
        Some(codec) => Some(codec),
        None => {
            let header = buffered.fill_buf().context("peek stream header")?;
            Codec::from_magic(header)
        }
    };
    match codec {
        Some(codec) => codec
            .decode(buffered)
            .with_context(|| format!("set up {} decoder", codec.name())),
        None => Ok(Box::new(buffered)),
    }
}

/// Wrap `writer` with a compressor chosen by `path_hint`'s extension.
///
/// Call [`CompressedWriter::finish`] when done; dropping the writer instead
/// may leave a truncated compressed stream.
///
/// # Errors
/// Returns an error if the encoder cannot be set up.
pub fn auto_detect_writer<W: Write>(
    writer: W,
    path_hint: impl AsRef<Path>,
) -> Result<CompressedWriter<W>> {
    let buffered = BufWriter::new(writer);
    match Codec::from_path(&path_hint) {
        Some(codec) => codec
            .encode(buffered)
            .with_context(|| format!("set up {} encoder", codec.name())),
        None => Ok(CompressedWriter::Plain(buffered)),
    }
}

/// Buffered writer, optionally compressing.
pub enum CompressedWriter<W: Write> {
    Plain(BufWriter<W>),
    #[cfg(feature = "compression-gzip")]
    Gzip(flate2::write::GzEncoder<BufWriter<W>>),
    #[cfg(feature = "compression-zstd")]
    Zstd(zstd::stream::write::Encoder<'static, BufWriter<W>>),
}

impl<W: Write> CompressedWriter<W> {
    #[must_use]
    pub fn codec(&self) -> Option<Codec> {
        match self {
            Self::Plain(_) => None,
            #[cfg(feature = "compression-gzip")]
            Self::Gzip(_) => Some(Codec::Gzip),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd(_) => Some(Codec::Zstd),
        }
    }

    /// Write any compression trailer and flush everything to the inner writer.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    pub fn finish(self) -> std::io::Result<()> {
        let mut inner = match self {
            Self::Plain(w) => w,
            #[cfg(feature = "compression-gzip")]
            Self::Gzip(enc) => enc.finish()?,
            #[cfg(feature = "compression-zstd")]
            Self::Zstd(enc) => enc.finish()?,
        };
        inner.flush()
    }
}

impl<W: Write> Write for CompressedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            #[cfg(feature = "compression-gzip")]
            Self::Gzip(w) => w.write(buf),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            #[cfg(feature = "compression-gzip")]
            Self::Gzip(w) => w.flush(),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd(w) => w.flush(),
        }
    }
}
