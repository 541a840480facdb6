//! Error types for rollchunk.
//!
//! The boundary scan itself cannot fail. Everything here belongs to the
//! code around it, from config validation to file mapping.
//!
//! Messages name the failing operation only; the underlying system error is
//! reachable through [`std::error::Error::source`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring, sourcing, or writing a manifest.
#[derive(Debug, Error)]
pub enum ChunkError {
    /// An I/O error occurred while reading input or writing output.
    #[error("i/o error")]
    Io(#[from] io::Error),

    /// The input file could not be opened.
    #[error("open {}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying system error.
        #[source]
        source: io::Error,
    },

    /// The input file's metadata could not be read.
    #[error("stat {}", path.display())]
    Metadata {
        /// Path whose metadata was requested.
        path: PathBuf,
        /// Underlying system error.
        #[source]
        source: io::Error,
    },

    /// The input file could not be memory-mapped.
    #[error("mmap {}", path.display())]
    Map {
        /// Path that failed to map.
        path: PathBuf,
        /// Underlying system error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A reader produced a different number of bytes than announced.
    #[error("input length mismatch: expected {expected} bytes, read {actual}")]
    LengthMismatch {
        /// Length the scan was started with.
        expected: u64,
        /// Bytes actually read (so far).
        actual: u64,
    },

    /// A chunk record does not lie within its source.
    #[error("record {start}+{length} outside source of {source_len} bytes")]
    RecordOutOfBounds {
        /// Record start offset.
        start: u64,
        /// Record length.
        length: u64,
        /// Length of the source the record was applied to.
        source_len: u64,
    },

    /// A manifest line could not be parsed.
    #[error("invalid manifest line: {message}")]
    Parse {
        /// Description of what was malformed.
        message: String,
    },
}
