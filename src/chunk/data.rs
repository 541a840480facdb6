//! The Chunk type - a decided chunk together with its bytes.

use bytes::Bytes;
use std::fmt;

use super::{ChunkHash, ChunkRecord};

/// A content-defined chunk with its data and metadata.
///
/// When produced from an in-memory [`Bytes`] buffer, `data` is a zero-copy
/// slice of that buffer.
///
/// # Example
///
/// ```
/// use rollchunk::{Chunk, ChunkRecord};
/// use bytes::Bytes;
///
/// let chunk = Chunk::new(Bytes::from_static(b"hello world"), 0);
///
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.record(), ChunkRecord::new(0, 11));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk data.
    pub data: Bytes,

    /// Offset of the chunk in the original stream.
    pub offset: u64,

    /// The content digest of this chunk (if computed).
    pub hash: Option<ChunkHash>,
}

impl Chunk {
    /// Creates a new chunk at the given offset.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset,
            hash: None,
        }
    }

    /// Sets the hash.
    pub fn with_hash(mut self, hash: ChunkHash) -> Self {
        self.hash = Some(hash);
        self
    }

    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the offset/length record describing this chunk.
    pub fn record(&self) -> ChunkRecord {
        ChunkRecord::new(self.offset, self.data.len() as u64)
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({} bytes @ {}", self.len(), self.offset)?;
        if let Some(hash) = self.hash {
            write!(f, ", hash={}", hash)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let chunk = Chunk::new(&b"hello"[..], 100);
        assert_eq!(chunk.len(), 5);
        assert!(!chunk.is_empty());
        assert_eq!(chunk.end(), 105);
        assert!(chunk.hash.is_none());
    }

    #[test]
    fn test_record() {
        let chunk = Chunk::new(vec![0u8; 42], 8);
        assert_eq!(chunk.record(), ChunkRecord::new(8, 42));
    }

    #[test]
    fn test_with_hash() {
        let hash = ChunkHash::Sha1([1u8; 20]);
        let chunk = Chunk::new(&b"hello"[..], 0).with_hash(hash);
        assert_eq!(chunk.hash, Some(hash));
    }

    #[test]
    fn test_display() {
        let s = Chunk::new(&b"hello"[..], 100).to_string();
        assert!(s.contains("5 bytes"));
        assert!(s.contains("@ 100"));
    }
}
