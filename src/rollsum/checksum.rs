//! Rolling checksum state and update rule.
//!
//! # Algorithm Overview
//!
//! Two 32-bit accumulators track the trailing window `x_0 .. x_{W-1}`
//! (oldest first) with every byte biased by a constant `C`:
//!
//! - `s1 = Σ x_i + W·C`
//! - `s2 = Σ (W - i)·(x_i + C)` plus a fixed seed bias
//!
//! Sliding the window by one byte only needs the incoming byte and the byte
//! that falls out, which the ring buffer remembers. All arithmetic wraps
//! modulo 2^32; the split predicate relies on the resulting low-bit
//! distribution, so the wrapping is part of the checksum definition.
//!
//! The outgoing term `x + C` is truncated to a byte before it is scaled by
//! `W`. Existing manifests depend on this, so it is part of the definition
//! too. Once a byte with `(x + C) mod 2^32 >= 256` has left the window, `s2`
//! carries an extra multiple of `256·W` and no longer equals the formula
//! above. [`RollingChecksum::direct_sums`] therefore only describes the
//! first `W` pushes.

use std::fmt;

use crate::config::{ChunkConfig, MAX_WINDOW_SIZE};
use crate::error::ChunkError;

/// Rolling checksum over a fixed-size trailing window.
///
/// The state is seeded as though the stream were preceded by `W` zero bytes,
/// so the very first bytes are already checked against a full window.
///
/// # Example
///
/// ```
/// use rollchunk::{ChunkConfig, RollingChecksum};
///
/// let config = ChunkConfig::default().with_window_size(8).with_split_bits(3);
/// let mut sum = RollingChecksum::new(&config)?;
///
/// for &byte in b"rolling along" {
///     sum.push(byte);
/// }
///
/// let window: Vec<u8> = sum.window().collect();
/// assert_eq!(window, b"ng along");
/// # Ok::<(), rollchunk::ChunkError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct RollingChecksum {
    s1: u32,
    s2: u32,

    /// Ring buffer of raw bytes; only `window[..window_size]` is live.
    window: [u8; MAX_WINDOW_SIZE],
    window_size: usize,

    /// Next write position, which is also the oldest byte in the window.
    cursor: usize,

    /// `window_size` as the checksum's arithmetic width.
    width: u32,
    char_offset: u32,
    split_mask: u32,
}

impl RollingChecksum {
    /// Creates a seeded checksum from the window parameters in `config`.
    ///
    /// Returns error if the configuration does not validate.
    pub fn new(config: &ChunkConfig) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self::seeded(
            config.window_size(),
            config.char_offset(),
            config.split_mask(),
        ))
    }

    /// Builds the seeded state for an already validated window size.
    pub(crate) fn seeded(window_size: usize, char_offset: u32, split_mask: u32) -> Self {
        let width = window_size as u32;
        Self {
            s1: width.wrapping_mul(char_offset),
            s2: width
                .wrapping_mul(width.wrapping_sub(1))
                .wrapping_mul(char_offset),
            window: [0; MAX_WINDOW_SIZE],
            window_size,
            cursor: 0,
            width,
            char_offset,
            split_mask,
        }
    }

    /// Resets the checksum to its seeded state.
    pub fn reset(&mut self) {
        *self = Self::seeded(self.window_size, self.char_offset, self.split_mask);
    }

    /// Slides the window forward by one byte.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        let dropped = u32::from(self.window[self.cursor]);
        // Truncated to a byte, not reduced modulo 2^32.
        let outgoing = dropped.wrapping_add(self.char_offset) & 0xFF;

        self.s1 = self
            .s1
            .wrapping_add(u32::from(byte))
            .wrapping_sub(dropped);
        self.s2 = self
            .s2
            .wrapping_add(self.s1)
            .wrapping_sub(self.width.wrapping_mul(outgoing));

        self.window[self.cursor] = byte;
        self.cursor += 1;
        if self.cursor == self.window_size {
            self.cursor = 0;
        }
    }

    /// Returns true if the low split bits of `s2` are all set.
    #[inline]
    pub fn is_split_candidate(&self) -> bool {
        self.s2 & self.split_mask == self.split_mask
    }

    /// Returns the current `(s1, s2)` accumulators.
    pub fn sums(&self) -> (u32, u32) {
        (self.s1, self.s2)
    }

    /// Returns the value tested by the split predicate (`s2`).
    pub fn digest(&self) -> u32 {
        self.s2
    }

    /// Returns the window size.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the mask tested by [`RollingChecksum::is_split_candidate`].
    pub fn split_mask(&self) -> u32 {
        self.split_mask
    }

    /// Iterates the live window, oldest byte first.
    pub fn window(&self) -> impl Iterator<Item = u8> + '_ {
        self.window[self.cursor..self.window_size]
            .iter()
            .chain(&self.window[..self.cursor])
            .copied()
    }

    /// Computes `(s1, s2)` directly from a full window, without rolling.
    ///
    /// `window` is oldest byte first and its length is the window size. The
    /// result equals the state of a freshly seeded [`RollingChecksum`] after
    /// exactly these `W` bytes have been pushed. While only seed bytes have
    /// left the window, so for the first `W` pushes, it also holds for a
    /// zero-padded prefix when `char_offset < 256`.
    pub fn direct_sums(window: &[u8], char_offset: u32) -> (u32, u32) {
        let width = window.len() as u32;
        let mut s1 = width.wrapping_mul(char_offset);
        let mut s2 = 0u32;

        for (i, &byte) in window.iter().enumerate() {
            let weight = width.wrapping_sub(i as u32);
            s1 = s1.wrapping_add(u32::from(byte));
            s2 = s2.wrapping_add(weight.wrapping_mul(u32::from(byte).wrapping_add(char_offset)));
        }

        // Difference between the seed W(W-1)C and the weighted sum of a
        // zero window, C·W(W+1)/2.
        let triangle = (u64::from(width) * (u64::from(width) + 1) / 2) as u32;
        let seed_bias = width
            .wrapping_mul(width.wrapping_sub(1))
            .wrapping_mul(char_offset)
            .wrapping_sub(triangle.wrapping_mul(char_offset));

        // Each of the W seed bytes left the window as the low byte of C.
        let truncation = width
            .wrapping_mul(width)
            .wrapping_mul(char_offset & !0xFF);

        (s1, s2.wrapping_add(seed_bias).wrapping_add(truncation))
    }
}

impl fmt::Debug for RollingChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RollingChecksum")
            .field("s1", &self.s1)
            .field("s2", &self.s2)
            .field("window_size", &self.window_size)
            .field("cursor", &self.cursor)
            .field("char_offset", &self.char_offset)
            .field("split_mask", &self.split_mask)
            .finish()
    }
}

impl Default for RollingChecksum {
    fn default() -> Self {
        let config = ChunkConfig::default();
        Self::seeded(
            config.window_size(),
            config.char_offset(),
            config.split_mask(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ChunkConfig {
        ChunkConfig::default()
            .with_window_size(16)
            .with_split_bits(4)
            .with_min_size(8)
            .with_max_size(256)
    }

    fn padded_tail(data: &[u8], window_size: usize) -> Vec<u8> {
        let mut window = vec![0u8; window_size.saturating_sub(data.len())];
        window.extend_from_slice(&data[data.len().saturating_sub(window_size)..]);
        window
    }

    #[test]
    fn test_seeded_state() {
        let sum = RollingChecksum::default();
        assert_eq!(sum.sums(), (64 * 31, 64 * 63 * 31));
        assert_eq!(sum.window_size(), 64);
        assert_eq!(sum.split_mask(), (1 << 17) - 1);
    }

    #[test]
    fn test_seed_matches_direct_formula_over_zero_window() {
        let sum = RollingChecksum::default();
        assert_eq!(sum.sums(), RollingChecksum::direct_sums(&[0u8; 64], 31));
    }

    #[test]
    fn test_zero_bytes_leave_state_unchanged() {
        let mut sum = RollingChecksum::default();
        let seeded = sum.sums();
        for _ in 0..1000 {
            sum.push(0);
        }
        assert_eq!(sum.sums(), seeded);
    }

    #[test]
    fn test_first_window_matches_direct() {
        let config = small_config();
        let data: Vec<u8> = (0..500u32).map(|i| (i * 7 + 13) as u8).collect();

        for start in 0..data.len() - config.window_size() {
            let window = &data[start..start + config.window_size()];
            let mut sum = RollingChecksum::new(&config).unwrap();
            window.iter().for_each(|&b| sum.push(b));

            assert_eq!(
                sum.sums(),
                RollingChecksum::direct_sums(window, config.char_offset()),
                "mismatch for window at {}",
                start
            );
        }
    }

    #[test]
    fn test_prefix_matches_padded_direct() {
        let config = small_config();
        let data: Vec<u8> = (0..16u32).map(|i| (i * 37 + 200) as u8).collect();
        let mut sum = RollingChecksum::new(&config).unwrap();

        for (i, &byte) in data.iter().enumerate() {
            sum.push(byte);
            let window = padded_tail(&data[..=i], config.window_size());
            assert_eq!(
                sum.sums(),
                RollingChecksum::direct_sums(&window, config.char_offset()),
                "mismatch after byte {}",
                i
            );
        }
    }

    #[test]
    fn test_outgoing_term_is_truncated_to_a_byte() {
        let config = ChunkConfig::default().with_window_size(4);
        let mut sum = RollingChecksum::new(&config).unwrap();
        let seeded = sum.sums();

        // 225 + 31 = 256 leaves the window as 0, not 256.
        for byte in [225, 0, 0, 0, 0] {
            sum.push(byte);
        }

        assert_eq!(sum.window().collect::<Vec<_>>(), vec![0, 0, 0, 0]);
        assert_eq!(sum.sums(), (124, 1396));
        assert_eq!(sum.sums(), (seeded.0, seeded.1 + 4 * 256));
    }

    #[test]
    fn test_low_bytes_leave_no_residue() {
        let mut sum = RollingChecksum::default();
        let seeded = sum.sums();

        for _ in 0..3 {
            for byte in 0..225u8 {
                sum.push(byte);
            }
        }
        for _ in 0..64 {
            sum.push(0);
        }
        assert_eq!(sum.sums(), seeded);
    }

    #[test]
    fn test_wraparound_is_not_an_error() {
        let config = ChunkConfig::default()
            .with_window_size(MAX_WINDOW_SIZE)
            .with_char_offset(u32::MAX / 3);
        let mut sum = RollingChecksum::new(&config).unwrap();
        let data = vec![0xFFu8; MAX_WINDOW_SIZE];

        for &byte in &data {
            sum.push(byte);
        }

        assert_eq!(
            sum.sums(),
            RollingChecksum::direct_sums(&data, config.char_offset())
        );
    }

    #[test]
    fn test_window_order() {
        let config = ChunkConfig::default().with_window_size(4);
        let mut sum = RollingChecksum::new(&config).unwrap();
        assert_eq!(sum.window().collect::<Vec<_>>(), vec![0, 0, 0, 0]);

        for byte in 1..=6u8 {
            sum.push(byte);
        }
        assert_eq!(sum.window().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_split_candidate_tests_low_bits() {
        let config = small_config();
        let mut sum = RollingChecksum::new(&config).unwrap();
        let mut candidates = 0;

        let mut state = 0x9E37_79B9u32;
        for _ in 0..4096 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            sum.push((state >> 24) as u8);
            let expected = sum.digest() & 0xF == 0xF;
            assert_eq!(sum.is_split_candidate(), expected);
            if expected {
                candidates += 1;
            }
        }

        // 1 in 16 on average; allow generous slack
        assert!(candidates > 64, "too few candidates: {}", candidates);
    }

    #[test]
    fn test_reset() {
        let config = small_config();
        let mut sum = RollingChecksum::new(&config).unwrap();
        let fresh = sum.clone();

        for byte in 0..100u8 {
            sum.push(byte);
        }
        assert_ne!(sum, fresh);

        sum.reset();
        assert_eq!(sum, fresh);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ChunkConfig::default().with_window_size(0);
        assert!(RollingChecksum::new(&config).is_err());
    }
}
