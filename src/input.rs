//! Per-frame input sampling
//!
//! Window and device events are folded into an [`InputState`] as they arrive.
//! Once per frame the app takes an [`InputSnapshot`], which drains the
//! accumulated deltas and one-shot key presses while keeping held movement
//! keys. Everything downstream reads the snapshot, never raw events.

use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::gfx::camera::CameraMovement;

/// Pixel scroll distance treated as one wheel line
const PIXELS_PER_LINE: f32 = 20.0;

/// Movement keys held down this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementIntent {
    /// Every direction currently requested
    pub fn directions(&self) -> impl Iterator<Item = CameraMovement> {
        [
            (self.forward, CameraMovement::Forward),
            (self.backward, CameraMovement::Backward),
            (self.left, CameraMovement::Left),
            (self.right, CameraMovement::Right),
            (self.up, CameraMovement::Up),
            (self.down, CameraMovement::Down),
        ]
        .into_iter()
        .filter_map(|(held, movement)| held.then_some(movement))
    }

    fn slot(&mut self, code: KeyCode) -> Option<&mut bool> {
        match code {
            KeyCode::KeyW => Some(&mut self.forward),
            KeyCode::KeyS => Some(&mut self.backward),
            KeyCode::KeyA => Some(&mut self.left),
            KeyCode::KeyD => Some(&mut self.right),
            KeyCode::KeyE => Some(&mut self.up),
            KeyCode::KeyQ => Some(&mut self.down),
            _ => None,
        }
    }
}

/// Input sampled for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub movement: MovementIntent,
    /// Cursor delta; `y` is positive when the mouse moved up
    pub look_delta: (f32, f32),
    /// Scroll in wheel lines; positive away from the user
    pub scroll_delta: f32,
    /// Cursor-capture toggle pressed since the last snapshot
    pub toggle_capture: bool,
    /// Quit requested since the last snapshot
    pub quit: bool,
}

/// Accumulates events between snapshots
#[derive(Debug, Default)]
pub struct InputState {
    held: MovementIntent,
    look: (f64, f64),
    scroll: f32,
    toggle_capture: bool,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key transition; auto-repeat never re-triggers toggles
    pub fn key(&mut self, code: KeyCode, pressed: bool, repeat: bool) {
        if let Some(slot) = self.held.slot(code) {
            *slot = pressed;
            return;
        }

        if !pressed || repeat {
            return;
        }

        match code {
            KeyCode::KeyM => self.toggle_capture = true,
            KeyCode::Escape => self.quit = true,
            _ => (),
        }
    }

    pub fn mouse_motion(&mut self, dx: f64, dy: f64) {
        self.look.0 += dx;
        self.look.1 += dy;
    }

    pub fn scroll(&mut self, delta: &MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, lines) => *lines,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32 / PIXELS_PER_LINE,
        };
    }

    pub fn window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => self.key(*code, *state == ElementState::Pressed, *repeat),
            WindowEvent::MouseWheel { delta, .. } => self.scroll(delta),
            // Keys released while unfocused never report their release
            WindowEvent::Focused(false) => self.held = MovementIntent::default(),
            _ => (),
        }
    }

    pub fn device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse_motion(delta.0, delta.1);
        }
    }

    /// Drops cursor motion gathered so far
    pub fn discard_motion(&mut self) {
        self.look = (0.0, 0.0);
    }

    /// Drains deltas and one-shot presses into a frame snapshot
    pub fn snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            movement: self.held,
            look_delta: (self.look.0 as f32, -self.look.1 as f32),
            scroll_delta: self.scroll,
            toggle_capture: self.toggle_capture,
            quit: self.quit,
        };

        self.look = (0.0, 0.0);
        self.scroll = 0.0;
        self.toggle_capture = false;
        self.quit = false;

        snapshot
    }
}
