//! rollchunk
//!
//! Content-Defined Chunking (CDC) with a windowed rolling checksum.
//!
//! `rollchunk` splits a byte stream into variable-length, content-aligned
//! chunks and describes each one by offset, length and digest. Boundaries
//! depend only on nearby content, so an insertion early in a file leaves the
//! chunks after it unchanged up to the shift. Typical uses:
//!
//! - deduplication
//! - content-addressable storage
//! - delta synchronization
//!
//! The crate intentionally:
//! - does NOT store chunks
//! - does NOT index previously seen chunks
//! - does NOT parallelize the boundary pass
//!
//! The core is two small state machines: [`RollingChecksum`] slides a
//! window over the input, and [`ChunkScanner`] applies the size policy to its
//! split predicate and emits [`ChunkRecord`]s. Everything else (sources,
//! digests, manifests) is built around them.
//!
//! # Manifest
//!
//! ```no_run
//! use rollchunk::{manifest, ChunkConfig, Source};
//!
//! fn main() -> Result<(), rollchunk::ChunkError> {
//!     let source = Source::open("data.bin")?;
//!     let stdout = std::io::stdout().lock();
//!
//!     manifest::write_manifest(&source, ChunkConfig::default(), stdout)?;
//!     Ok(())
//! }
//! ```
//!
//! # Records only
//!
//! ```
//! use rollchunk::{scanner, ChunkConfig};
//!
//! let data = vec![0u8; 3 << 20];
//! for record in scanner::boundaries(&data, ChunkConfig::default())? {
//!     println!("{}\t{}", record.start, record.length);
//! }
//! # Ok::<(), rollchunk::ChunkError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod error;
mod hash;
mod rollsum;
mod source;

pub mod chunker;
pub mod config;
pub mod manifest;
pub mod scanner;

//
// Public surface
//

pub use chunk::{Chunk, ChunkHash, ChunkRecord};
pub use chunker::{ChunkIter, Chunker};
pub use config::{ChunkConfig, HashConfig};
pub use error::ChunkError;
pub use hash::{ChunkHasher, HashAlgorithm};
pub use manifest::{ManifestEntry, ManifestWriter};
pub use rollsum::RollingChecksum;
pub use scanner::{Boundaries, ChunkScanner};
pub use source::Source;
