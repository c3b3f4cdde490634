// src/wgpu_utils/mod.rs
//! Small wgpu helpers shared by the renderer
//!
//! Typed uniform buffers and the bind group layouts built on them.

pub mod binding_types;
pub mod uniform_buffer;

pub use binding_types::{single_uniform_layout, uniform_entry};
pub use uniform_buffer::UniformBuffer;
