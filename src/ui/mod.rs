//! # User Interface Module
//!
//! Dear ImGui overlay for the museum.
//!
//! ## Key Components
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu, frame timing and input capture
//! - [`panel`] - The museum controls window and the exhibit information popup
//!
//! Panels never mutate the simulation. They return
//! [`UiCommand`](crate::simulation::UiCommand)s which the app applies right
//! after the UI is built, so changes land in the same frame.
//!
//! ## Input Handling
//!
//! [`UiManager::capture`] reports whether ImGui wants the mouse or keyboard;
//! the camera controller ignores whichever one the UI holds.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::museum_ui;
