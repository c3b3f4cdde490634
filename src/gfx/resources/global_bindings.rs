//! Global uniform bindings for camera and spotlight data
//!
//! Per-frame state shared by every draw: the camera matrices and the robot's
//! spotlight. Bound at group 0 in the museum pipeline.

use crate::{
    gfx::rendering::draw_queue::FrameGlobals,
    wgpu_utils::{single_uniform_layout, UniformBuffer},
};

/// Uniform layout of the `Globals` struct in `museum.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    view_proj: [[f32; 4]; 4],
    view_position: [f32; 4],

    spot_position: [f32; 4],
    spot_direction: [f32; 4],
    spot_color: [f32; 4],
    /// x: inner cutoff cosine, y: outer cutoff cosine, z: 1.0 when lit
    spot_params: [f32; 4],
}
// Total: 64 + 5 * 16 = 144 bytes

impl From<&FrameGlobals> for GlobalUniform {
    fn from(globals: &FrameGlobals) -> Self {
        let spot = &globals.spotlight;
        Self {
            view_proj: globals.view_proj.into(),
            view_position: globals.view_position.extend(1.0).into(),
            spot_position: spot.position.extend(1.0).into(),
            spot_direction: spot.direction.extend(0.0).into(),
            spot_color: spot.color.extend(1.0).into(),
            spot_params: [
                spot.inner_cutoff,
                spot.outer_cutoff,
                if spot.enabled { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// Buffer, layout and bind group for the frame globals
pub struct GlobalBindings {
    ubo: UniformBuffer<GlobalUniform>,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let ubo = UniformBuffer::new(device, "Globals Uniform");
        let bind_group_layout = single_uniform_layout(device, "Globals Bind Group Layout");
        let bind_group = ubo.bind_group(device, &bind_group_layout, "Globals Bind Group");

        Self {
            ubo,
            bind_group_layout,
            bind_group,
        }
    }

    /// Writes this frame's camera and spotlight state
    pub fn update(&mut self, queue: &wgpu::Queue, globals: &FrameGlobals) {
        self.ubo.write(queue, &GlobalUniform::from(globals));
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::rendering::draw_queue::SpotlightParams;
    use cgmath::{Matrix4, SquareMatrix, Vector3};

    #[test]
    fn test_layout_size_matches_shader() {
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 144);
    }

    #[test]
    fn test_spotlight_toggle_is_encoded() {
        let mut globals = FrameGlobals {
            view_proj: Matrix4::identity(),
            view_position: Vector3::new(1.0, 2.0, 3.0),
            spotlight: SpotlightParams {
                position: Vector3::new(0.0, 0.75, 6.0),
                direction: Vector3::new(0.0, -1.0, 0.0),
                color: Vector3::new(1.0, 1.0, 0.8),
                inner_cutoff: 0.9,
                outer_cutoff: 0.8,
                enabled: true,
            },
        };
        let lit = GlobalUniform::from(&globals);
        assert_eq!(lit.spot_params, [0.9, 0.8, 1.0, 0.0]);
        assert_eq!(lit.spot_direction[3], 0.0);
        assert_eq!(lit.view_position, [1.0, 2.0, 3.0, 1.0]);

        globals.spotlight.enabled = false;
        assert_eq!(GlobalUniform::from(&globals).spot_params[2], 0.0);
    }
}
