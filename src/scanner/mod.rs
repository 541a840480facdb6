//! Boundary decision pass over a byte stream.
//!
//! - [`ChunkScanner`] - Stateful scanner with `step()`/`push()`/`finish()` API
//! - [`Boundaries`] - Lazy iterator of records over an in-memory buffer
//! - [`boundaries`], [`scan`] - Convenience entry points

mod engine;

pub use engine::{Boundaries, ChunkScanner, boundaries, scan};
