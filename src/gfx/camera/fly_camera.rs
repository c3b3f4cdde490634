use super::camera_utils::Camera;
use cgmath::*;

use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Largest pitch magnitude, in degrees, before the view would flip
pub const PITCH_LIMIT: f32 = 89.0;
/// Field-of-view range, in degrees, reachable by scrolling
pub const ZOOM_RANGE: (f32, f32) = (1.0, 45.0);

/// Directions the fly camera can be pushed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Free-flying first-person camera
///
/// Orientation is stored as yaw/pitch in degrees; `front`, `right` and `up`
/// are an orthonormal basis recomputed whenever the angles change.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub front: Vector3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,
    pub world_up: Vector3<f32>,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees
    pub zoom: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera for FlyCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

impl FlyCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self {
            position: config.position,
            yaw: config.yaw.0,
            pitch: config.pitch.0.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            front: -Vector3::unit_z(), // Recomputed in `update_vectors()`.
            right: Vector3::unit_x(),
            up: Vector3::unit_y(),
            world_up: Vector3::unit_y(),
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            zoom: config.zoom.clamp(ZOOM_RANGE.0, ZOOM_RANGE.1),
            aspect,
            znear: 0.1,
            zfar: 100.0,
        };
        camera.update_vectors();
        camera
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at_rh(eye, eye + self.front, self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(Deg(self.zoom), self.aspect, self.znear, self.zfar)
    }

    /// Moves along one basis axis, scaled by speed and elapsed time
    pub fn process_movement(&mut self, direction: CameraMovement, dt: f32) {
        let velocity = self.movement_speed * dt;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Up => self.position += self.world_up * velocity,
            CameraMovement::Down => self.position -= self.world_up * velocity,
        }
    }

    /// Turns the camera by a cursor delta; positive `y_offset` looks up
    pub fn process_look(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch = (self.pitch + y_offset * self.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Narrows (positive) or widens (negative) the field of view
    pub fn process_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(ZOOM_RANGE.0, ZOOM_RANGE.1);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Recomputes the basis after changing `yaw` or `pitch`.
    fn update_vectors(&mut self) {
        let (yaw, pitch) = (Deg(self.yaw), Deg(self.pitch));
        self.front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}
