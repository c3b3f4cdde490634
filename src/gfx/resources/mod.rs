// src/gfx/resources/mod.rs
//! GPU resources owned by the render engine
//!
//! The depth attachment and the per-frame globals shared by every draw.

pub mod depth_buffer;
pub mod global_bindings;

pub use depth_buffer::DepthBuffer;
pub use global_bindings::{GlobalBindings, GlobalUniform};
