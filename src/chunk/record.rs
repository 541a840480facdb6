//! The ChunkRecord type - where a chunk lives in the input.

use std::fmt;
use std::ops::Range;

/// Position of one chunk within the scanned input.
///
/// Records are emitted in ascending order and tile the input exactly: each
/// record starts where the previous one ended, the first starts at 0, and
/// the lengths sum to the input size.
///
/// # Example
///
/// ```
/// use rollchunk::ChunkRecord;
///
/// let record = ChunkRecord::new(100, 28);
/// assert_eq!(record.end(), 128);
/// assert_eq!(record.bytes(&[7u8; 200]).map(|b| b.len()), Some(28));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkRecord {
    /// Offset of the first byte (inclusive).
    pub start: u64,

    /// Number of bytes in the chunk.
    pub length: u64,
}

impl ChunkRecord {
    /// Creates a record.
    pub const fn new(start: u64, length: u64) -> Self {
        Self { start, length }
    }

    /// Returns the end offset (exclusive).
    pub const fn end(&self) -> u64 {
        self.start + self.length
    }

    /// Returns the chunk as a range of offsets.
    pub const fn range(&self) -> Range<u64> {
        self.start..self.end()
    }

    /// Returns true if the chunk has no bytes.
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the chunk's bytes within `source`, or `None` if the record
    /// lies outside it.
    pub fn bytes<'a>(&self, source: &'a [u8]) -> Option<&'a [u8]> {
        let start = usize::try_from(self.start).ok()?;
        let end = usize::try_from(self.end()).ok()?;
        source.get(start..end)
    }
}

impl fmt::Display for ChunkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.start, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_and_range() {
        let record = ChunkRecord::new(100, 5);
        assert_eq!(record.end(), 105);
        assert_eq!(record.range(), 100..105);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_bytes_in_bounds() {
        let source = b"hello world";
        let record = ChunkRecord::new(6, 5);
        assert_eq!(record.bytes(source), Some(&b"world"[..]));
    }

    #[test]
    fn test_bytes_out_of_bounds() {
        let source = b"hello";
        assert_eq!(ChunkRecord::new(3, 5).bytes(source), None);
        assert_eq!(ChunkRecord::new(u64::MAX - 1, 1).bytes(source), None);
    }

    #[test]
    fn test_display_is_tab_separated() {
        assert_eq!(ChunkRecord::new(0, 1048576).to_string(), "0\t1048576");
    }

    #[test]
    fn test_ordering_follows_start() {
        let mut records = vec![ChunkRecord::new(10, 2), ChunkRecord::new(0, 10)];
        records.sort();
        assert_eq!(records[0].start, 0);
    }
}
