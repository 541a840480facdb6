//! ChunkIter - chunks pulled from a [`std::io::Read`] source.
//!
//! # Example
//!
//! ```no_run
//! use rollchunk::{chunker, ChunkConfig};
//! use std::fs::File;
//!
//! let file = File::open("data.bin")?;
//! let len = file.metadata()?.len();
//!
//! for chunk in chunker::chunk_reader(file, len, ChunkConfig::default())? {
//!     let chunk = chunk?;
//!     println!("{} bytes @ {}", chunk.len(), chunk.offset);
//! }
//! # Ok::<(), rollchunk::ChunkError>(())
//! ```

use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use super::Chunker;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// Bytes requested from the reader per `read()` call.
const READ_BUF_SIZE: usize = 64 * 1024;

/// An iterator that yields chunks from a reader.
///
/// The reader must produce exactly the number of bytes the iterator was
/// created with, because the tail rule depends on where the input ends.
/// Reading more or fewer yields [`ChunkError::LengthMismatch`].
///
/// I/O errors are yielded once, after which the iterator is exhausted.
/// `ErrorKind::Interrupted` is retried.
pub struct ChunkIter<R> {
    reader: R,
    chunker: Chunker,
    ready: VecDeque<Chunk>,
    buffer: BytesMut,
    total_len: u64,
    read_len: u64,
    finished: bool,
}

impl<R: Read> ChunkIter<R> {
    /// Creates an iterator over `reader`, which will produce `total_len` bytes.
    ///
    /// Returns error if the configuration does not validate.
    pub fn new(reader: R, config: ChunkConfig, total_len: u64) -> Result<Self, ChunkError> {
        Ok(Self {
            reader,
            chunker: Chunker::new(config, total_len)?,
            ready: VecDeque::new(),
            buffer: BytesMut::new(),
            total_len,
            read_len: 0,
            finished: false,
        })
    }

    /// Returns the number of bytes read from the reader so far.
    pub fn bytes_read(&self) -> u64 {
        self.read_len
    }

    fn fail(&mut self, err: ChunkError) -> Option<Result<Chunk, ChunkError>> {
        self.finished = true;
        self.ready.clear();
        Some(Err(err))
    }
}

impl<R: Read> Iterator for ChunkIter<R> {
    type Item = Result<Chunk, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chunk) = self.ready.pop_front() {
                return Some(Ok(chunk));
            }
            if self.finished {
                return None;
            }

            self.buffer.resize(READ_BUF_SIZE, 0);
            match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    self.finished = true;
                    if self.read_len != self.total_len {
                        let (expected, actual) = (self.total_len, self.read_len);
                        return self.fail(ChunkError::LengthMismatch { expected, actual });
                    }
                    self.ready.extend(self.chunker.finish());
                }
                Ok(n) => {
                    self.read_len += n as u64;
                    if self.read_len > self.total_len {
                        let (expected, actual) = (self.total_len, self.read_len);
                        return self.fail(ChunkError::LengthMismatch { expected, actual });
                    }
                    self.buffer.truncate(n);
                    let data = self.buffer.split().freeze();
                    self.ready.extend(self.chunker.push(data));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return self.fail(e.into()),
            }
        }
    }
}

/// Creates a chunking iterator over a reader of `total_len` bytes.
pub fn chunk_reader<R: Read>(
    reader: R,
    total_len: u64,
    config: ChunkConfig,
) -> Result<ChunkIter<R>, ChunkError> {
    ChunkIter::new(reader, config, total_len)
}
