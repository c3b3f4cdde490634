//! # Procedural Geometry
//!
//! Geometry streams for the museum's primitives. Everything in the scene is
//! drawn from a unit cube, so the only generator is [`generate_cube`], and the
//! canonical stream is shared statically through [`unit_cube`].
//!
//! Streams are non-indexed triangle lists in the interleaved layout the
//! renderer uploads: 3 position floats followed by 3 normal floats per vertex.
//!
//! ```no_run
//! use vitrine::gfx::geometry::{unit_cube, FLOATS_PER_VERTEX};
//!
//! let stream = unit_cube();
//! assert_eq!(stream.len(), 36 * FLOATS_PER_VERTEX);
//! ```

pub mod primitives;

pub use primitives::*;

/// Floats per interleaved vertex (position + normal)
pub const FLOATS_PER_VERTEX: usize = 6;
