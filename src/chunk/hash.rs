//! Chunk hash types.

use std::fmt;

use crate::hash::HashAlgorithm;

/// A fixed-size digest of chunk content.
///
/// One variant per supported algorithm, so a digest always carries the
/// length its algorithm produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChunkHash {
    /// 160-bit SHA-1 digest (40 hex characters).
    Sha1([u8; 20]),
    /// 256-bit BLAKE3 digest (64 hex characters).
    #[cfg(feature = "hash-blake3")]
    Blake3([u8; 32]),
}

impl ChunkHash {
    /// Returns the algorithm that produced this digest.
    pub fn algorithm(&self) -> HashAlgorithm {
        match self {
            ChunkHash::Sha1(_) => HashAlgorithm::Sha1,
            #[cfg(feature = "hash-blake3")]
            ChunkHash::Blake3(_) => HashAlgorithm::Blake3,
        }
    }

    /// Returns the digest as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ChunkHash::Sha1(bytes) => bytes,
            #[cfg(feature = "hash-blake3")]
            ChunkHash::Blake3(bytes) => bytes,
        }
    }

    /// Returns the digest length in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Always false; digests have a fixed non-zero length.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Parses a hex digest, inferring the algorithm from its length.
    ///
    /// Returns `None` if the string is not valid hex or its length matches no
    /// supported algorithm (40 for SHA-1, 64 for BLAKE3).
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        match hex_str.len() {
            40 => {
                let mut bytes = [0u8; 20];
                hex::decode_to_slice(hex_str, &mut bytes).ok()?;
                Some(ChunkHash::Sha1(bytes))
            }
            #[cfg(feature = "hash-blake3")]
            64 => {
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(hex_str, &mut bytes).ok()?;
                Some(ChunkHash::Blake3(bytes))
            }
            _ => None,
        }
    }
}

impl AsRef<[u8]> for ChunkHash {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for ChunkHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths() {
        assert_eq!(ChunkHash::Sha1([0; 20]).len(), 20);
        #[cfg(feature = "hash-blake3")]
        assert_eq!(ChunkHash::Blake3([0; 32]).len(), 32);
    }

    #[test]
    fn test_to_hex() {
        let hash = ChunkHash::Sha1([0xAB; 20]);
        let hex = hash.to_hex();
        assert_eq!(hex.len(), 40);
        assert!(hex.chars().all(|c| c == 'a' || c == 'b'));
        assert_eq!(hex, hash.to_string());
    }

    #[test]
    fn test_display_is_lowercase() {
        let mut bytes = [0u8; 20];
        bytes[..8].copy_from_slice(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]);
        let s = ChunkHash::Sha1(bytes).to_string();
        assert!(s.starts_with("0123456789abcdef"));
    }

    #[test]
    fn test_from_hex() {
        let sha1 = ChunkHash::from_hex("2aae6c35c94fcfb415dbe95f408b9ce91ee846ed").unwrap();
        assert!(matches!(sha1, ChunkHash::Sha1(_)));
        assert_eq!(sha1.to_hex(), "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");

        #[cfg(feature = "hash-blake3")]
        assert!(matches!(
            ChunkHash::from_hex(&"0f".repeat(32)),
            Some(ChunkHash::Blake3(_))
        ));

        assert!(ChunkHash::from_hex("abc").is_none());
        assert!(ChunkHash::from_hex(&"zz".repeat(20)).is_none());
    }
}
