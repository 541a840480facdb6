//! Content digests for decided chunks.
//!
//! The boundary scan never looks at digests; hashing runs on records after
//! they are emitted. SHA-1 is always available because the reference
//! manifests use it. BLAKE3 is available with the `hash-blake3` feature.
//!
//! - [`HashAlgorithm`] - Which digest to compute
//! - [`ChunkHasher`] - Incremental hasher for the selected algorithm

#[cfg(feature = "hash-blake3")]
mod blake3;
mod sha1;

#[cfg(feature = "hash-blake3")]
use self::blake3::Blake3Hasher;
use self::sha1::Sha1Hasher;

use std::fmt;
use std::str::FromStr;

use crate::chunk::ChunkHash;
use crate::error::ChunkError;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-1, 20-byte digest.
    #[default]
    Sha1,
    /// BLAKE3, 32-byte digest.
    #[cfg(feature = "hash-blake3")]
    Blake3,
}

impl HashAlgorithm {
    /// Returns the digest length in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            #[cfg(feature = "hash-blake3")]
            HashAlgorithm::Blake3 => 32,
        }
    }

    /// Returns the lowercase algorithm name.
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            #[cfg(feature = "hash-blake3")]
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ChunkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(HashAlgorithm::Sha1),
            #[cfg(feature = "hash-blake3")]
            "blake3" => Ok(HashAlgorithm::Blake3),
            _ => Err(ChunkError::InvalidConfig {
                message: "unknown hash algorithm",
            }),
        }
    }
}

/// An incremental hasher for one [`HashAlgorithm`].
#[derive(Debug, Clone)]
pub struct ChunkHasher {
    state: HasherState,
}

/// Per-algorithm hasher state.
#[derive(Debug, Clone)]
enum HasherState {
    Sha1(Sha1Hasher),
    #[cfg(feature = "hash-blake3")]
    Blake3(Blake3Hasher),
}

impl ChunkHasher {
    /// Creates a hasher for `algorithm`.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let state = match algorithm {
            HashAlgorithm::Sha1 => HasherState::Sha1(Sha1Hasher::new()),
            #[cfg(feature = "hash-blake3")]
            HashAlgorithm::Blake3 => HasherState::Blake3(Blake3Hasher::new()),
        };
        Self { state }
    }

    /// Updates the hasher with more data.
    pub fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            HasherState::Sha1(h) => h.update(data),
            #[cfg(feature = "hash-blake3")]
            HasherState::Blake3(h) => h.update(data),
        }
    }

    /// Returns the digest of everything fed since creation or the last reset.
    pub fn finalize(&self) -> ChunkHash {
        match &self.state {
            HasherState::Sha1(h) => h.finalize(),
            #[cfg(feature = "hash-blake3")]
            HasherState::Blake3(h) => h.finalize(),
        }
    }

    /// Resets the hasher to its initial state.
    pub fn reset(&mut self) {
        match &mut self.state {
            HasherState::Sha1(h) => h.reset(),
            #[cfg(feature = "hash-blake3")]
            HasherState::Blake3(h) => h.reset(),
        }
    }

    /// Finalizes, resets, and returns the digest.
    pub fn finish_chunk(&mut self) -> ChunkHash {
        let hash = self.finalize();
        self.reset();
        hash
    }

    /// Hashes `data` in one shot.
    pub fn digest(algorithm: HashAlgorithm, data: &[u8]) -> ChunkHash {
        match algorithm {
            HashAlgorithm::Sha1 => Sha1Hasher::hash(data),
            #[cfg(feature = "hash-blake3")]
            HashAlgorithm::Blake3 => Blake3Hasher::hash(data),
        }
    }
}
