// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Draw submission, render pipelines and per-frame rendering.

pub mod draw_queue;
pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use draw_queue::{DrawCall, DrawParams, DrawQueue, DrawSink, FrameGlobals, SpotlightParams};
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
