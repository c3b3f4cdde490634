//! # Scene Primitives
//!
//! Vertex format and the shared drawable primitives the museum is built
//! from.
//!
//! ## Key Components
//!
//! - [`Vertex3D`] - Position + normal vertex matching the interleaved stream
//! - [`MeshCatalog`] - CPU-side list of streams; hands out [`DrawableId`]s
//! - [`DrawableRegistry`] - GPU upload of the catalog, owning every [`Drawable`]
//! - [`DrawDrawable`] - Render-pass extension that submits one drawable

pub mod drawable;
pub mod vertex;

// Re-export main types
pub use drawable::{DrawDrawable, Drawable, DrawableId, DrawableRegistry, MeshCatalog};
pub use vertex::Vertex3D;
