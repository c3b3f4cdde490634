//! Draw submission contract
//!
//! The frame orchestrator never touches wgpu. It announces the frame's shared
//! uniforms through [`DrawSink::begin_frame`] and then issues one
//! [`DrawSink::draw`] per object, in order. [`DrawQueue`] records those calls;
//! the render engine replays the queue inside its render pass.

use cgmath::{Matrix, Matrix4, SquareMatrix, Vector3};

use crate::gfx::camera::camera_utils::convert_matrix4_to_array;
use crate::gfx::scene::DrawableId;

/// Spotlight cone in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotlightParams {
    pub position: Vector3<f32>,
    /// Unit vector along the cone axis
    pub direction: Vector3<f32>,
    pub color: Vector3<f32>,
    /// Cosine of the full-intensity half angle
    pub inner_cutoff: f32,
    /// Cosine of the half angle where the light fades to zero
    pub outer_cutoff: f32,
    pub enabled: bool,
}

/// Uniforms shared by every draw in a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGlobals {
    pub view_proj: Matrix4<f32>,
    pub view_position: Vector3<f32>,
    pub spotlight: SpotlightParams,
}

/// Per-draw uniform values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    pub model: Matrix4<f32>,
    pub color: Vector3<f32>,
    pub light_position: Vector3<f32>,
    pub view_position: Vector3<f32>,
    pub light_color: Vector3<f32>,
}

/// Receives the ordered draw stream for one frame
pub trait DrawSink {
    /// Starts a frame, discarding anything recorded for the previous one
    fn begin_frame(&mut self, globals: FrameGlobals);

    /// Submits one drawable with its transform and lighting uniforms
    fn draw(&mut self, drawable: DrawableId, params: DrawParams);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub drawable: DrawableId,
    pub params: DrawParams,
}

/// Records one frame of draw calls in submission order
#[derive(Debug, Default)]
pub struct DrawQueue {
    globals: Option<FrameGlobals>,
    calls: Vec<DrawCall>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn globals(&self) -> Option<&FrameGlobals> {
        self.globals.as_ref()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl DrawSink for DrawQueue {
    fn begin_frame(&mut self, globals: FrameGlobals) {
        self.globals = Some(globals);
        self.calls.clear();
    }

    fn draw(&mut self, drawable: DrawableId, params: DrawParams) {
        self.calls.push(DrawCall { drawable, params });
    }
}

/// GPU layout of [`DrawParams`]; must match `DrawUniform` in `museum.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, keeps normals perpendicular under non-uniform scale
    normal_matrix: [[f32; 4]; 4],
    object_color: [f32; 4],
    light_position: [f32; 4],
    view_position: [f32; 4],
    light_color: [f32; 4],
}

impl From<&DrawParams> for DrawUniform {
    fn from(params: &DrawParams) -> Self {
        let normal_matrix = params
            .model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);

        Self {
            model: convert_matrix4_to_array(params.model),
            normal_matrix: convert_matrix4_to_array(normal_matrix),
            object_color: params.color.extend(1.0).into(),
            light_position: params.light_position.extend(1.0).into(),
            view_position: params.view_position.extend(1.0).into(),
            light_color: params.light_color.extend(1.0).into(),
        }
    }
}
