//! Core scanning engine - ChunkScanner with streaming API.
//!
//! The scanner feeds every byte to a [`RollingChecksum`] and applies the size
//! policy on top of its split predicate:
//!
//! - a split is *forced* when the current chunk reaches `max_size`
//! - a split is *eligible* when the checksum is a split candidate and the
//!   chunk is already longer than `min_size`
//! - either kind is *suppressed* when its offset lies past
//!   `total_len - min_size`, so the last chunk is never tiny
//!
//! The checksum keeps rolling across boundaries; only the chunk counters
//! restart. Because the suppression rule needs to know where the input
//! ends, the scanner is created with the total input length.
//!
//! # Example
//!
//! ```
//! use rollchunk::{ChunkConfig, ChunkScanner};
//!
//! let config = ChunkConfig::new(64, 512)?.with_window_size(16).with_split_bits(6);
//! let data: Vec<u8> = (0..4096u32).map(|i| (i * 7 + 13) as u8).collect();
//!
//! let mut scanner = ChunkScanner::new(config, data.len() as u64)?;
//! let mut records = Vec::new();
//!
//! // Feed data in any segmentation
//! for part in data.chunks(1000) {
//!     records.extend(scanner.push(part));
//! }
//! records.extend(scanner.finish());
//!
//! let total: u64 = records.iter().map(|r| r.length).sum();
//! assert_eq!(total, data.len() as u64);
//! # Ok::<(), rollchunk::ChunkError>(())
//! ```

use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::chunk::ChunkRecord;
use crate::config::ChunkConfig;
use crate::error::ChunkError;
use crate::rollsum::RollingChecksum;

/// A scanner that decides chunk boundaries over a byte stream of known length.
///
/// `ChunkScanner` consumes bytes strictly left to right, one at a time, and
/// emits a [`ChunkRecord`] the moment a boundary is confirmed. A record is
/// final when emitted; later input never changes it.
///
/// # Determinism
///
/// Identical byte streams produce identical records regardless of how the
/// bytes are split across `push()` calls.
///
/// # Checkpointing
///
/// The whole scan state is the rolling window plus a few counters. Cloning a
/// scanner captures it, and the clone continues exactly where the original
/// stood.
#[derive(Debug, Clone)]
pub struct ChunkScanner {
    checksum: RollingChecksum,
    config: ChunkConfig,
    min_size: u64,
    max_size: u64,
    total_len: u64,

    /// Absolute offset of the next byte to be consumed.
    position: u64,

    /// Offset of the current chunk's first byte.
    chunk_start: u64,

    /// Bytes accumulated into the current chunk.
    chunk_len: u64,

    /// Splits refused because they fell too close to the end of input.
    suppressed: u64,
}

impl ChunkScanner {
    /// Creates a scanner for an input of `total_len` bytes.
    ///
    /// Returns error if the configuration does not validate.
    pub fn new(config: ChunkConfig, total_len: u64) -> Result<Self, ChunkError> {
        let checksum = RollingChecksum::new(&config)?;

        Ok(Self {
            checksum,
            config,
            min_size: config.min_size() as u64,
            max_size: config.max_size() as u64,
            total_len,
            position: 0,
            chunk_start: 0,
            chunk_len: 0,
            suppressed: 0,
        })
    }

    /// Consumes one byte and returns the record it completes, if any.
    #[inline]
    pub fn step(&mut self, byte: u8) -> Option<ChunkRecord> {
        let offset = self.position;
        self.position += 1;
        self.chunk_len += 1;
        self.checksum.push(byte);

        let forced = self.chunk_len == self.max_size;
        let eligible = self.checksum.is_split_candidate() && self.chunk_len > self.min_size;
        if !forced && !eligible {
            return None;
        }

        // offset > total_len - min_size, without underflow
        if offset + self.min_size > self.total_len {
            self.suppressed += 1;
            trace!(
                offset,
                chunk_len = self.chunk_len,
                forced,
                "suppressing split near end of input"
            );
            return None;
        }

        let record = ChunkRecord::new(self.chunk_start, self.chunk_len);
        trace!(start = record.start, length = record.length, forced, "chunk boundary");

        self.chunk_start = self.position;
        self.chunk_len = 0;
        Some(record)
    }

    /// Consumes bytes until a boundary is confirmed or `data` runs out.
    ///
    /// Returns how many bytes of `data` were consumed and the record that was
    /// completed, if any.
    pub fn next_boundary(&mut self, data: &[u8]) -> (usize, Option<ChunkRecord>) {
        for (i, &byte) in data.iter().enumerate() {
            if let Some(record) = self.step(byte) {
                return (i + 1, Some(record));
            }
        }
        (data.len(), None)
    }

    /// Pushes a segment of the stream and returns every record it completes.
    ///
    /// Bytes after the last boundary stay in the current chunk and are
    /// accounted for by later calls or by [`ChunkScanner::finish`].
    pub fn push(&mut self, data: &[u8]) -> Vec<ChunkRecord> {
        data.iter().filter_map(|&byte| self.step(byte)).collect()
    }

    /// Emits the trailing chunk, if any bytes are pending.
    ///
    /// The remainder is emitted unconditionally, even when shorter than
    /// `min_size`. Calling `finish()` again returns `None`.
    pub fn finish(&mut self) -> Option<ChunkRecord> {
        if self.chunk_len == 0 {
            return None;
        }

        let record = ChunkRecord::new(self.chunk_start, self.chunk_len);
        debug!(
            start = record.start,
            length = record.length,
            suppressed = self.suppressed,
            "final chunk"
        );

        self.chunk_start = self.position;
        self.chunk_len = 0;
        Some(record)
    }

    /// Resets the scanner for a new input of `total_len` bytes.
    pub fn reset(&mut self, total_len: u64) {
        self.checksum.reset();
        self.total_len = total_len;
        self.position = 0;
        self.chunk_start = 0;
        self.chunk_len = 0;
        self.suppressed = 0;
    }

    /// Returns the offset of the next byte to be consumed.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the offset of the current (unfinished) chunk.
    pub fn chunk_start(&self) -> u64 {
        self.chunk_start
    }

    /// Returns the number of bytes in the current chunk.
    pub fn pending_len(&self) -> u64 {
        self.chunk_len
    }

    /// Returns how many splits were suppressed near the end of input.
    ///
    /// Forced splits count too, which is how the final record can exceed
    /// `max_size`.
    pub fn suppressed_splits(&self) -> u64 {
        self.suppressed
    }

    /// Returns the input length the scanner was created for.
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Returns the configuration used by this scanner.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Returns the rolling checksum state.
    pub fn checksum(&self) -> &RollingChecksum {
        &self.checksum
    }
}

/// An iterator over the chunk records of an in-memory buffer.
///
/// Created by [`boundaries`]. Records are produced lazily, the trailing
/// remainder last.
#[derive(Debug, Clone)]
pub struct Boundaries<'a> {
    data: &'a [u8],
    cursor: usize,
    scanner: ChunkScanner,
}

impl Iterator for Boundaries<'_> {
    type Item = ChunkRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor < self.data.len() {
            let (consumed, record) = self.scanner.next_boundary(&self.data[self.cursor..]);
            self.cursor += consumed;
            if record.is_some() {
                return record;
            }
        }
        self.scanner.finish()
    }
}

impl FusedIterator for Boundaries<'_> {}

/// Returns a lazy iterator over the chunk records of `data`.
///
/// # Example
///
/// ```
/// use rollchunk::{ChunkConfig, scanner};
///
/// let config = ChunkConfig::default().with_max_size(1 << 20);
/// let zeros = vec![0u8; 2 << 20];
///
/// let records: Vec<_> = scanner::boundaries(&zeros, config)?.collect();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].start, 1 << 20);
/// # Ok::<(), rollchunk::ChunkError>(())
/// ```
pub fn boundaries(data: &[u8], config: ChunkConfig) -> Result<Boundaries<'_>, ChunkError> {
    Ok(Boundaries {
        data,
        cursor: 0,
        scanner: ChunkScanner::new(config, data.len() as u64)?,
    })
}

/// Scans `data` and collects all of its chunk records.
pub fn scan(data: &[u8], config: ChunkConfig) -> Result<Vec<ChunkRecord>, ChunkError> {
    Ok(boundaries(data, config)?.collect())
}
