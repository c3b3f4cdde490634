// src/lib.rs
//! Vitrine
//!
//! A virtual museum rendered with wgpu and winit: a free-flying camera, a set
//! of exhibits, and a robot that tours them, scans each one and reports what
//! it found through an imgui overlay.
//!
//! ```no_run
//! use vitrine::{MuseumConfig, VitrineApp};
//!
//! let app = VitrineApp::new(MuseumConfig::from_env())?;
//! app.run()?;
//! # Ok::<(), vitrine::MuseumError>(())
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod simulation;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::VitrineApp;
pub use config::MuseumConfig;
pub use error::MuseumError;
