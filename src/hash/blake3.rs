//! BLAKE3 chunk hashing.

use crate::chunk::ChunkHash;

/// A hasher that computes BLAKE3 digests.
#[derive(Debug, Clone, Default)]
pub(crate) struct Blake3Hasher {
    state: ::blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates a new hasher.
    pub(crate) fn new() -> Self {
        Self {
            state: ::blake3::Hasher::new(),
        }
    }

    /// Updates the hasher with more data.
    pub(crate) fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Finalizes and returns the digest.
    pub(crate) fn finalize(&self) -> ChunkHash {
        ChunkHash::Blake3(self.state.finalize().into())
    }

    /// Resets the hasher to its initial state.
    pub(crate) fn reset(&mut self) {
        self.state.reset();
    }

    /// Hashes data in one shot.
    pub(crate) fn hash(data: &[u8]) -> ChunkHash {
        ChunkHash::Blake3(::blake3::hash(data).into())
    }
}
