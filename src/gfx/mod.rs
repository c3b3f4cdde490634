//! # Graphics Module
//!
//! Everything that touches the GPU, plus the camera and geometry the renderer
//! consumes.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Free-fly camera driven by per-frame input snapshots
//! - **Geometry** ([`geometry`]) - Procedural unit cube in the interleaved vertex layout
//! - **Rendering Pipeline** ([`rendering`]) - Draw queue, Phong + spotlight pipeline, render engine
//! - **Scene Primitives** ([`scene`]) - Shared drawables addressed by [`DrawableId`]
//! - **Resource Management** ([`resources`]) - Depth buffer and global uniforms
//!
//! The simulation only sees [`rendering::DrawSink`]; it records draws that the
//! [`RenderEngine`] replays once per frame.
//!
//! [`DrawableId`]: scene::DrawableId

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::fly_camera::FlyCamera;
pub use rendering::render_engine::RenderEngine;
