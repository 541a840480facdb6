//! Chunks with data, for callers that want bytes rather than records.
//!
//! - [`Chunker`] - Streaming engine with `push()`/`finish()` API
//! - [`ChunkIter`] - Iterator over chunks read from a [`std::io::Read`]
//! - [`chunk_bytes`] - One-shot chunking of an in-memory buffer

mod engine;
mod iter;

pub use engine::{Chunker, chunk_bytes};
pub use iter::{ChunkIter, chunk_reader};
