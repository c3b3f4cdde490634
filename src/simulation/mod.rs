// src/simulation/mod.rs
//! Museum simulation
//!
//! Exhibits, the scanning robot and the per-frame orchestration that turns
//! them into draw calls. Nothing in here touches the GPU; drawing goes
//! through [`DrawSink`](crate::gfx::rendering::DrawSink).

pub mod context;
pub mod exhibit;
pub mod frame;
pub mod navigator;

pub use context::{Lighting, SimulationContext, UiCommand};
pub use exhibit::{ExhibitRecord, ExhibitRegistry};
pub use frame::run_frame;
pub use navigator::{NavEvent, NavState, Navigator, RobotState, TravelMode};
