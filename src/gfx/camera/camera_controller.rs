use crate::input::InputSnapshot;

use super::fly_camera::FlyCamera;

/// Which input the UI overlay wants for itself this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiCapture {
    pub mouse: bool,
    pub keyboard: bool,
}

/// Drives a [`FlyCamera`] from per-frame input snapshots
///
/// The camera only responds while the cursor is captured. Keyboard movement
/// is further suppressed while the UI holds the keyboard, and look/zoom
/// while it holds the mouse.
pub struct CameraController {
    captured: bool,
}

impl CameraController {
    pub fn new(captured: bool) -> Self {
        Self { captured }
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Applies one frame of input to the camera
    ///
    /// Returns the new capture state when the toggle key flipped it, so the
    /// caller can grab or release the OS cursor.
    pub fn apply(
        &mut self,
        snapshot: &InputSnapshot,
        ui: UiCapture,
        camera: &mut FlyCamera,
        dt: f32,
    ) -> Option<bool> {
        let toggled = snapshot.toggle_capture.then(|| {
            self.captured = !self.captured;
            self.captured
        });

        if !self.captured {
            return toggled;
        }

        if !ui.keyboard {
            for direction in snapshot.movement.directions() {
                camera.process_movement(direction, dt);
            }
        }

        // Motion gathered while released would make the view jump on re-capture
        if !ui.mouse && toggled.is_none() {
            let (dx, dy) = snapshot.look_delta;
            if dx != 0.0 || dy != 0.0 {
                camera.process_look(dx, dy);
            }
            if snapshot.scroll_delta != 0.0 {
                camera.process_scroll(snapshot.scroll_delta);
            }
        }

        toggled
    }
}
