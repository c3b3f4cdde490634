use cgmath::{Matrix4, Vector3};

use crate::input::InputSnapshot;

use super::{
    camera_controller::{CameraController, UiCapture},
    fly_camera::FlyCamera,
};

pub struct CameraManager {
    pub camera: FlyCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: FlyCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Feeds one frame of input through the controller into the camera
    ///
    /// Returns the new cursor-capture state if it changed.
    pub fn process_input(&mut self, snapshot: &InputSnapshot, ui: UiCapture, dt: f32) -> Option<bool> {
        self.controller.apply(snapshot, ui, &mut self.camera, dt)
    }

    pub fn position(&self) -> Vector3<f32> {
        self.camera.position
    }

    /// Get the view projection matrix from the camera
    pub fn get_view_proj_matrix(&self) -> cgmath::Matrix4<f32> {
        self.camera.build_view_projection_matrix()
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}
