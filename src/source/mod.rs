//! Read-only byte sources for the boundary scan.
//!
//! A [`Source`] is a fixed-length, random-access view of the whole input.
//! Files are memory-mapped so the scanner walks the page cache directly;
//! in-memory data is held as [`Bytes`].

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use bytes::Bytes;
use memmap2::Mmap;
use tracing::debug;

use crate::error::ChunkError;

/// A fixed-length byte source.
///
/// Dereferences to `[u8]`, so it can be handed to [`crate::scanner::scan`],
/// sliced by [`crate::ChunkRecord::bytes`], and shared across threads for
/// hashing.
///
/// # Example
///
/// ```
/// use rollchunk::Source;
///
/// let source = Source::from_bytes(&b"hello world"[..]);
/// assert_eq!(source.len(), 11);
/// assert_eq!(&source[..5], b"hello");
/// ```
#[derive(Debug)]
pub enum Source {
    /// A memory-mapped file.
    Mapped(Mmap),
    /// Bytes already in memory.
    Memory(Bytes),
}

impl Source {
    /// Opens and maps the file at `path`.
    ///
    /// A zero-length file yields an empty source without creating a mapping.
    /// The file must not be truncated while the source is alive.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ChunkError> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| ChunkError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| ChunkError::Metadata {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        if len == 0 {
            debug!(path = %path.display(), "empty input, skipping mmap");
            return Ok(Source::Memory(Bytes::new()));
        }

        // SAFETY: the map is read-only and lives no longer than this value;
        // concurrent truncation by another process is outside our control
        // and documented on `open`.
        #[allow(unsafe_code)]
        let map = unsafe { Mmap::map(&file) }.map_err(|source| ChunkError::Map {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), len, "mapped input");
        Ok(Source::Mapped(map))
    }

    /// Wraps bytes that are already in memory.
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Source::Memory(data.into())
    }

    /// Returns the source as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Source::Mapped(map) => &map[..],
            Source::Memory(bytes) => &bytes[..],
        }
    }

    /// Returns the source length in bytes.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if the source has no bytes.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Returns true if the source is backed by a file mapping.
    pub fn is_mapped(&self) -> bool {
        matches!(self, Source::Mapped(_))
    }
}

impl Deref for Source {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for Source {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl From<Bytes> for Source {
    fn from(bytes: Bytes) -> Self {
        Source::Memory(bytes)
    }
}

impl From<Vec<u8>> for Source {
    fn from(data: Vec<u8>) -> Self {
        Source::Memory(Bytes::from(data))
    }
}
