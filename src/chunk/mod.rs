//! Chunk types.
//!
//! - [`ChunkRecord`] - Offset and length of one chunk
//! - [`ChunkHash`] - Fixed-length content digest (SHA-1 or BLAKE3)
//! - [`Chunk`] - A record together with its bytes and optional digest

mod data;
mod hash;
mod record;

pub use data::Chunk;
pub use hash::ChunkHash;
pub use record::ChunkRecord;
