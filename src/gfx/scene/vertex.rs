//! # Vertex Data Structures
//!
//! GPU vertex format shared by every drawable in the museum.

use crate::gfx::geometry::FLOATS_PER_VERTEX;

/// A 3D vertex with position and normal data.
///
/// `#[repr(C)]` keeps the layout identical to the interleaved float stream
/// (3 position floats, then 3 normal floats), so a stream can be viewed as a
/// vertex slice without copying.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
}

impl Vertex3D {
    /// Reinterprets an interleaved position+normal stream as vertices
    ///
    /// Returns `None` if the stream does not hold a whole number of vertices.
    pub fn from_interleaved(stream: &[f32]) -> Option<&[Vertex3D]> {
        if stream.len() % FLOATS_PER_VERTEX != 0 {
            return None;
        }
        bytemuck::try_cast_slice(stream).ok()
    }

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x3) at shader location 0
    /// - Attribute 1: Normal (Float32x3) at shader location 1
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}
