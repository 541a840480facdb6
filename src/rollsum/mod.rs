//! Windowed rolling checksum used for boundary detection.
//!
//! The checksum covers the last `W` bytes of the stream and is updated in
//! O(1) per byte, so whether a position is a split candidate depends only on
//! the bytes right before it. That locality is what keeps boundaries stable
//! when data is inserted or removed elsewhere in the stream.
//!
//! The one exception is the byte truncation of the outgoing term: every byte
//! `x` with `x + C >= 256` that leaves the window adds `256·W` to `s2`. When
//! `256·W` lies below the split mask, the number of such bytes seen so far
//! also affects which positions are candidates.
//!
//! - [`RollingChecksum`] - Adler-style `s1`/`s2` accumulators over a ring buffer

mod checksum;

pub use checksum::RollingChecksum;
