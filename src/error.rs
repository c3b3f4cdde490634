//! Error types for museum setup
//!
//! Only startup can fail. Once the scene is running every condition the
//! frame loop meets (bad target index, zero frame time) is handled as a no-op.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while bringing up the window, GPU and shaders
#[derive(Debug, Error)]
pub enum MuseumError {
    /// Window, surface, adapter or device could not be created
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// WGSL source was rejected by the device
    #[error("shader '{label}' failed to compile: {message}")]
    ShaderCompile { label: String, message: String },

    /// WGSL source file could not be read
    #[error("could not read shader source {path:?}")]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

impl MuseumError {
    pub fn init(message: impl Into<String>) -> Self {
        Self::Initialization(message.into())
    }
}
