//! Configuration for chunking behavior.
//!
//! - [`ChunkConfig`] - Rolling window parameters, chunk size bounds and hashing
//! - [`HashConfig`] - Digest computation control
//!
//! The defaults reproduce the reference manifests, so two tools configured
//! with [`ChunkConfig::default`] agree on every boundary.
//!
//! # Example
//!
//! ```
//! use rollchunk::{ChunkConfig, HashConfig};
//!
//! let config = ChunkConfig::new(1024, 16 * 1024)?
//!     .with_split_bits(12)
//!     .with_window_size(32)
//!     .with_hash_config(HashConfig::disabled());
//! config.validate()?;
//! # Ok::<(), rollchunk::ChunkError>(())
//! ```

use crate::error::ChunkError;
use crate::hash::HashAlgorithm;

/// Default rolling window size in bytes.
pub const DEFAULT_WINDOW_SIZE: usize = 64;

/// Default offset constant added to every byte before summation.
pub const DEFAULT_CHAR_OFFSET: u32 = 31;

/// Default number of low checksum bits that must be set for a split candidate.
pub const DEFAULT_SPLIT_BITS: u32 = 17;

/// Default minimum chunk size (64 KiB), the "too small" threshold.
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 1 << 16;

/// Default maximum chunk size (1 MiB).
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1 << 20;

/// Largest supported rolling window; the ring buffer is a fixed array of this size.
pub const MAX_WINDOW_SIZE: usize = 1024;

/// Largest supported split bit-count (the mask must fit in a `u32`).
pub const MAX_SPLIT_BITS: u32 = 31;

/// Configuration for content-defined chunking.
///
/// Policy parameters:
/// - `window_size` (W): bytes covered by the rolling checksum
/// - `char_offset` (C): constant added to each byte value
/// - `split_bits` (B): a position is a split candidate when the low B bits of
///   the checksum are all set, giving an expected chunk length of `2^B`
/// - `min_size`: candidates are only accepted once a chunk is longer than this,
///   and no split may leave fewer than this many bytes at the end of the input
/// - `max_size`: hard upper bound that forces a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkConfig {
    window_size: usize,
    char_offset: u32,
    split_bits: u32,
    min_size: usize,
    max_size: usize,
    hash_config: HashConfig,
}

impl ChunkConfig {
    /// Creates a configuration with the given size bounds and default
    /// rolling-window parameters.
    ///
    /// Returns error if `max_size` is zero or smaller than `min_size`.
    pub fn new(min_size: usize, max_size: usize) -> Result<Self, ChunkError> {
        let config = Self {
            min_size,
            max_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the rolling window size.
    pub fn with_window_size(mut self, size: usize) -> Self {
        self.window_size = size;
        self
    }

    /// Sets the per-byte offset constant.
    pub fn with_char_offset(mut self, offset: u32) -> Self {
        self.char_offset = offset;
        self
    }

    /// Sets the number of low checksum bits tested by the split predicate.
    pub fn with_split_bits(mut self, bits: u32) -> Self {
        self.split_bits = bits;
        self
    }

    /// Sets the minimum chunk size.
    pub fn with_min_size(mut self, size: usize) -> Self {
        self.min_size = size;
        self
    }

    /// Sets the maximum chunk size.
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Sets the hash configuration.
    pub fn with_hash_config(mut self, config: HashConfig) -> Self {
        self.hash_config = config;
        self
    }

    /// Returns the rolling window size.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the per-byte offset constant.
    pub fn char_offset(&self) -> u32 {
        self.char_offset
    }

    /// Returns the split bit-count.
    pub fn split_bits(&self) -> u32 {
        self.split_bits
    }

    /// Returns `2^split_bits - 1`.
    pub fn split_mask(&self) -> u32 {
        (1u32 << self.split_bits.min(MAX_SPLIT_BITS)) - 1
    }

    /// Returns the minimum chunk size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Returns the maximum chunk size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the hash configuration.
    pub fn hash_config(&self) -> &HashConfig {
        &self.hash_config
    }

    /// Validates the current configuration.
    ///
    /// Builder methods do not validate; call this (or construct through
    /// [`ChunkConfig::new`]) before handing the config to a scanner.
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.window_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "window size must be non-zero",
            });
        }

        if self.window_size > MAX_WINDOW_SIZE {
            return Err(ChunkError::InvalidConfig {
                message: "window size exceeds MAX_WINDOW_SIZE",
            });
        }

        if self.split_bits == 0 || self.split_bits > MAX_SPLIT_BITS {
            return Err(ChunkError::InvalidConfig {
                message: "split bits must be between 1 and 31",
            });
        }

        if self.max_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "max_size must be non-zero",
            });
        }

        if self.min_size > self.max_size {
            return Err(ChunkError::InvalidConfig {
                message: "min_size cannot be greater than max_size",
            });
        }

        Ok(())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            char_offset: DEFAULT_CHAR_OFFSET,
            split_bits: DEFAULT_SPLIT_BITS,
            min_size: DEFAULT_MIN_CHUNK_SIZE,
            max_size: DEFAULT_MAX_CHUNK_SIZE,
            hash_config: HashConfig::default(),
        }
    }
}

/// Configuration for chunk hashing.
///
/// Controls whether a digest is computed for each chunk, and which one.
/// SHA-1 is the default because the reference manifests carry 40-character
/// SHA-1 digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashConfig {
    /// Whether to compute digests.
    pub enabled: bool,
    /// Digest algorithm used when enabled.
    pub algorithm: HashAlgorithm,
}

impl HashConfig {
    /// Creates a new hash configuration.
    pub const fn new(enabled: bool, algorithm: HashAlgorithm) -> Self {
        Self { enabled, algorithm }
    }

    /// Enables hashing with the default algorithm.
    pub const fn enabled() -> Self {
        Self {
            enabled: true,
            algorithm: HashAlgorithm::Sha1,
        }
    }

    /// Disables hashing.
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            algorithm: HashAlgorithm::Sha1,
        }
    }

    /// Enables hashing with the given algorithm.
    pub const fn with_algorithm(algorithm: HashAlgorithm) -> Self {
        Self {
            enabled: true,
            algorithm,
        }
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self::enabled()
    }
}
