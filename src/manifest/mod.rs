//! Chunk manifests: one line per chunk, in input order.
//!
//! Each line is `<start>\t<length>\t<hexdigest>\n` with decimal offsets and a
//! lowercase hex digest. There is no header and no summary line, so a
//! manifest is the concatenation of its entries' [`Display`] output.
//!
//! The boundary pass is sequential, but a record is final the moment it is
//! emitted. [`build`] and [`write_manifest`] hash each record right away;
//! with the `parallel` feature, [`build_parallel`] scans first and then
//! hashes all records on the rayon pool.
//!
//! Manifests always carry digests. The `enabled` flag of
//! [`HashConfig`](crate::HashConfig) only applies to [`Chunk`](crate::Chunk)
//! production; the manifest uses its `algorithm`.
//!
//! # Example
//!
//! ```
//! use rollchunk::{manifest, ChunkConfig, Source};
//!
//! let source = Source::from_bytes(&b"hello world"[..]);
//! let mut out = Vec::new();
//!
//! let count = manifest::write_manifest(&source, ChunkConfig::default(), &mut out)?;
//! assert_eq!(count, 1);
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "0\t11\t2aae6c35c94fcfb415dbe95f408b9ce91ee846ed\n"
//! );
//! # Ok::<(), rollchunk::ChunkError>(())
//! ```
//!
//! [`Display`]: std::fmt::Display

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::debug;

use crate::chunk::{ChunkHash, ChunkRecord};
use crate::config::ChunkConfig;
use crate::error::ChunkError;
use crate::hash::{ChunkHasher, HashAlgorithm};
use crate::scanner;

/// One manifest line: where a chunk lives and what it hashes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManifestEntry {
    /// Position of the chunk.
    pub record: ChunkRecord,
    /// Digest of the chunk's bytes.
    pub digest: ChunkHash,
}

impl ManifestEntry {
    /// Creates an entry.
    pub const fn new(record: ChunkRecord, digest: ChunkHash) -> Self {
        Self { record, digest }
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.record, self.digest)
    }
}

impl FromStr for ManifestEntry {
    type Err = ChunkError;

    /// Parses one line; a single trailing newline is accepted.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let mut fields = line.split('\t');

        let (Some(start), Some(length), Some(digest), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(parse_error(format!("expected 3 tab-separated fields in {:?}", line)));
        };

        let start = start
            .parse::<u64>()
            .map_err(|e| parse_error(format!("start {:?}: {}", start, e)))?;
        let length = length
            .parse::<u64>()
            .map_err(|e| parse_error(format!("length {:?}: {}", length, e)))?;
        let digest = ChunkHash::from_hex(digest)
            .ok_or_else(|| parse_error(format!("digest {:?}", digest)))?;

        Ok(Self::new(ChunkRecord::new(start, length), digest))
    }
}

fn parse_error(message: String) -> ChunkError {
    ChunkError::Parse { message }
}

/// Writes manifest lines to any [`Write`] sink.
///
/// The writer does not buffer; wrap unbuffered sinks such as stdout in a
/// [`std::io::BufWriter`].
#[derive(Debug)]
pub struct ManifestWriter<W: Write> {
    inner: W,
    entries: usize,
    covered: u64,
}

impl<W: Write> ManifestWriter<W> {
    /// Creates a writer over `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            entries: 0,
            covered: 0,
        }
    }

    /// Writes one entry as a line.
    pub fn write_entry(&mut self, entry: &ManifestEntry) -> Result<(), ChunkError> {
        writeln!(self.inner, "{}", entry)?;
        self.entries += 1;
        self.covered += entry.record.length;
        Ok(())
    }

    /// Returns the number of entries written so far.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Returns the total length of all chunks written so far.
    pub fn bytes_covered(&self) -> u64 {
        self.covered
    }

    /// Returns a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Flushes and returns the underlying sink.
    pub fn finish(mut self) -> Result<W, ChunkError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Computes the digest of one record's bytes within `source`.
///
/// Returns error if the record does not lie within `source`.
pub fn digest_record(
    source: &[u8],
    record: &ChunkRecord,
    algorithm: HashAlgorithm,
) -> Result<ChunkHash, ChunkError> {
    let bytes = record
        .bytes(source)
        .ok_or(ChunkError::RecordOutOfBounds {
            start: record.start,
            length: record.length,
            source_len: source.len() as u64,
        })?;
    Ok(ChunkHasher::digest(algorithm, bytes))
}

/// Scans `source` and returns its manifest, hashing each record as soon as
/// the scanner emits it.
pub fn build(source: &[u8], config: ChunkConfig) -> Result<Vec<ManifestEntry>, ChunkError> {
    let algorithm = config.hash_config().algorithm;

    let entries = scanner::boundaries(source, config)?
        .map(|record| {
            digest_record(source, &record, algorithm).map(|digest| ManifestEntry::new(record, digest))
        })
        .collect::<Result<Vec<_>, ChunkError>>()?;

    debug!(chunks = entries.len(), bytes = source.len(), %algorithm, "built manifest");
    Ok(entries)
}

/// Scans `source` sequentially, then hashes all records in parallel.
///
/// The result is identical to [`build`], in scan order.
#[cfg(feature = "parallel")]
pub fn build_parallel(
    source: &[u8],
    config: ChunkConfig,
) -> Result<Vec<ManifestEntry>, ChunkError> {
    use rayon::prelude::*;

    let algorithm = config.hash_config().algorithm;
    let records = scanner::scan(source, config)?;

    let entries = records
        .par_iter()
        .map(|record| {
            digest_record(source, record, algorithm).map(|digest| ManifestEntry::new(*record, digest))
        })
        .collect::<Result<Vec<_>, ChunkError>>()?;

    debug!(
        chunks = entries.len(),
        bytes = source.len(),
        threads = rayon::current_num_threads(),
        %algorithm,
        "built manifest in parallel"
    );
    Ok(entries)
}

/// Scans `source` and streams its manifest to `writer`.
///
/// Returns the number of lines written. The writer is flushed before
/// returning.
pub fn write_manifest<W: Write>(
    source: &[u8],
    config: ChunkConfig,
    writer: W,
) -> Result<usize, ChunkError> {
    let algorithm = config.hash_config().algorithm;
    let mut out = ManifestWriter::new(writer);

    for record in scanner::boundaries(source, config)? {
        let digest = digest_record(source, &record, algorithm)?;
        out.write_entry(&ManifestEntry::new(record, digest))?;
    }

    let count = out.entries();
    debug!(chunks = count, bytes = out.bytes_covered(), %algorithm, "wrote manifest");
    out.finish()?;
    Ok(count)
}

/// Reads a manifest back, one entry per line.
pub fn read_manifest<R: BufRead>(reader: R) -> Result<Vec<ManifestEntry>, ChunkError> {
    reader
        .lines()
        .map(|line| line?.parse::<ManifestEntry>())
        .collect()
}
