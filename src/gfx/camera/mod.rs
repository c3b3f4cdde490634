pub mod camera_controller;
pub mod camera_utils;
pub mod fly_camera;

// Re-export main types
pub use camera_controller::{CameraController, UiCapture};
pub use camera_utils::{Camera, CameraManager};
pub use fly_camera::{CameraMovement, FlyCamera};
