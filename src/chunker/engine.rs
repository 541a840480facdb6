//! Streaming chunker - Chunker with push/finish API.
//!
//! [`Chunker`] drives a [`ChunkScanner`] over `Bytes` segments of a stream
//! and turns its records into [`Chunk`]s that carry their data:
//!
//! - `push()` - Feed data in any size (1 byte, 8KB, 1MB, etc.)
//! - `finish()` - Flush the trailing chunk when the stream ends
//!
//! A chunk that lies inside a single pushed segment is a zero-copy slice of
//! it; only chunks spanning segments are copied.
//!
//! # Example
//!
//! ```
//! use rollchunk::{Chunker, ChunkConfig};
//! use bytes::Bytes;
//!
//! let config = ChunkConfig::new(16, 256)?.with_window_size(16).with_split_bits(5);
//! let parts = [Bytes::from_static(b"first part, "), Bytes::from_static(b"second part")];
//! let total: u64 = parts.iter().map(|p| p.len() as u64).sum();
//!
//! let mut chunker = Chunker::new(config, total)?;
//! let mut chunks = Vec::new();
//! for part in parts {
//!     chunks.extend(chunker.push(part));
//! }
//! chunks.extend(chunker.finish());
//!
//! assert_eq!(chunks.iter().map(|c| c.len()).sum::<usize>(), 23);
//! # Ok::<(), rollchunk::ChunkError>(())
//! ```

use bytes::{Bytes, BytesMut};

use crate::chunk::{Chunk, ChunkRecord};
use crate::config::ChunkConfig;
use crate::error::ChunkError;
use crate::hash::ChunkHasher;
use crate::scanner::ChunkScanner;

/// Bytes of the unfinished chunk that arrived in earlier segments.
///
/// A single segment tail is kept as a shared slice; it is only copied once
/// a second segment has to be appended to it.
#[derive(Debug, Default)]
enum Pending {
    #[default]
    Empty,
    Shared(Bytes),
    Owned(BytesMut),
}

impl Pending {
    fn append(&mut self, data: Bytes) {
        if data.is_empty() {
            return;
        }
        match self {
            Pending::Empty => *self = Pending::Shared(data),
            Pending::Shared(head) => {
                let mut owned = BytesMut::with_capacity(head.len() + data.len());
                owned.extend_from_slice(head);
                owned.extend_from_slice(&data);
                *self = Pending::Owned(owned);
            }
            Pending::Owned(owned) => owned.extend_from_slice(&data),
        }
    }

    fn take(&mut self) -> Bytes {
        match std::mem::take(self) {
            Pending::Empty => Bytes::new(),
            Pending::Shared(bytes) => bytes,
            Pending::Owned(owned) => owned.freeze(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Pending::Empty => 0,
            Pending::Shared(bytes) => bytes.len(),
            Pending::Owned(owned) => owned.len(),
        }
    }
}

/// A chunker that turns a byte stream of known length into chunks.
///
/// Boundaries are exactly those of [`crate::scanner::scan`] over the
/// concatenated stream, whatever the segment sizes. When hashing is enabled
/// in the config, every chunk carries its digest. Bytes are hashed as they
/// are scanned, so a chunk spanning segments is never read twice.
///
/// # Memory Considerations
///
/// Bytes of the current, unfinished chunk that arrived in earlier segments
/// are held internally, so at most about `max_size + min_size` bytes are
/// pending at any time.
#[derive(Debug)]
pub struct Chunker {
    scanner: ChunkScanner,
    pending: Pending,
    /// Digest of `pending`; `None` when hashing is disabled.
    hasher: Option<ChunkHasher>,
    config: ChunkConfig,
}

impl Chunker {
    /// Creates a chunker for a stream of `total_len` bytes.
    ///
    /// Returns error if the configuration does not validate.
    pub fn new(config: ChunkConfig, total_len: u64) -> Result<Self, ChunkError> {
        let hash_config = config.hash_config();
        Ok(Self {
            scanner: ChunkScanner::new(config, total_len)?,
            pending: Pending::Empty,
            hasher: hash_config
                .enabled
                .then(|| ChunkHasher::new(hash_config.algorithm)),
            config,
        })
    }

    /// Wraps chunk data and attaches the running digest.
    fn create_chunk(&mut self, data: Bytes, record: ChunkRecord) -> Chunk {
        debug_assert_eq!(data.len() as u64, record.length);

        let chunk = Chunk::new(data, record.start);
        match &mut self.hasher {
            Some(hasher) => chunk.with_hash(hasher.finish_chunk()),
            None => chunk,
        }
    }

    /// Pushes the next segment of the stream and returns the chunks it
    /// completes.
    ///
    /// Bytes after the last boundary are kept until a later `push()` or
    /// [`Chunker::finish`].
    pub fn push(&mut self, data: Bytes) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut cursor = 0;

        while cursor < data.len() {
            let (consumed, record) = self.scanner.next_boundary(&data[cursor..]);
            let end = cursor + consumed;

            if let Some(hasher) = &mut self.hasher {
                hasher.update(&data[cursor..end]);
            }
            self.pending.append(data.slice(cursor..end));
            if let Some(record) = record {
                let chunk_data = self.pending.take();
                chunks.push(self.create_chunk(chunk_data, record));
            }
            cursor = end;
        }

        chunks
    }

    /// Finalizes the stream and returns the trailing chunk, if any.
    ///
    /// The trailing chunk is emitted even when shorter than `min_size`.
    pub fn finish(&mut self) -> Option<Chunk> {
        let record = self.scanner.finish()?;
        let data = self.pending.take();
        Some(self.create_chunk(data, record))
    }

    /// Resets the chunker for a new stream of `total_len` bytes.
    pub fn reset(&mut self, total_len: u64) {
        self.scanner.reset(total_len);
        self.pending = Pending::Empty;
        if let Some(hasher) = &mut self.hasher {
            hasher.reset();
        }
    }

    /// Returns the offset of the next chunk to be emitted.
    pub fn offset(&self) -> u64 {
        self.scanner.chunk_start()
    }

    /// Returns the number of bytes consumed but not yet emitted.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns the configuration used by this chunker.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }
}

/// Chunks an in-memory buffer.
///
/// Every chunk is a zero-copy slice of `data`.
///
/// # Example
///
/// ```
/// use rollchunk::{chunker, ChunkConfig};
///
/// let chunks = chunker::chunk_bytes(&b"hello world"[..], ChunkConfig::default())?;
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].hash.unwrap().to_hex(), "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
/// # Ok::<(), rollchunk::ChunkError>(())
/// ```
pub fn chunk_bytes(data: impl Into<Bytes>, config: ChunkConfig) -> Result<Vec<Chunk>, ChunkError> {
    let data = data.into();
    let mut chunker = Chunker::new(config, data.len() as u64)?;

    let mut chunks = chunker.push(data);
    chunks.extend(chunker.finish());
    Ok(chunks)
}
