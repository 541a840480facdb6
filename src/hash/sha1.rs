//! SHA-1 chunk hashing, the digest used by reference manifests.

use ::sha1::{Digest, Sha1};

use crate::chunk::ChunkHash;

/// A hasher that computes SHA-1 digests.
#[derive(Debug, Clone, Default)]
pub(crate) struct Sha1Hasher {
    state: Sha1,
}

impl Sha1Hasher {
    /// Creates a new hasher.
    pub(crate) fn new() -> Self {
        Self { state: Sha1::new() }
    }

    /// Updates the hasher with more data.
    pub(crate) fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Returns the digest without consuming the state.
    pub(crate) fn finalize(&self) -> ChunkHash {
        ChunkHash::Sha1(self.state.clone().finalize().into())
    }

    /// Resets the hasher to its initial state.
    pub(crate) fn reset(&mut self) {
        Digest::reset(&mut self.state);
    }

    /// Hashes data in one shot.
    pub(crate) fn hash(data: &[u8]) -> ChunkHash {
        ChunkHash::Sha1(Sha1::digest(data).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            Sha1Hasher::hash(b"").to_hex(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(
            Sha1Hasher::hash(b"abc").to_hex(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            Sha1Hasher::hash(b"hello world").to_hex(),
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
    }

    #[test]
    fn test_incremental_hashing() {
        let mut hasher = Sha1Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        assert_eq!(hasher.finalize(), Sha1Hasher::hash(b"hello world"));
    }

    #[test]
    fn test_finalize_does_not_consume() {
        let mut hasher = Sha1Hasher::new();
        hasher.update(b"ab");
        let first = hasher.finalize();
        assert_eq!(first, hasher.finalize());
        hasher.update(b"c");
        assert_eq!(hasher.finalize(), Sha1Hasher::hash(b"abc"));
    }

    #[test]
    fn test_reset() {
        let mut hasher = Sha1Hasher::new();
        hasher.update(b"some data");

        hasher.reset();
        hasher.update(b"hello world");

        assert_eq!(hasher.finalize(), Sha1Hasher::hash(b"hello world"));
    }
}
