//! Shared GPU primitives
//!
//! A [`Drawable`] owns one vertex buffer. Scene entities never own drawables;
//! they hold a [`DrawableId`] into the [`DrawableRegistry`], so one cube
//! buffer can back every exhibit and both robot parts.
//!
//! Handles are handed out by a CPU-side [`MeshCatalog`] while the scene is
//! assembled. The registry is later uploaded from that catalog in the same
//! order, which keeps every handle valid without the simulation ever touching
//! the GPU.

use wgpu::util::DeviceExt;

use crate::error::MuseumError;

use super::vertex::Vertex3D;

/// Handle into the drawable registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableId(usize);

impl DrawableId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Geometry streams waiting to be uploaded, in handle order
#[derive(Debug, Default)]
pub struct MeshCatalog {
    entries: Vec<(String, Vec<f32>)>,
}

impl MeshCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an interleaved position+normal stream and returns its handle
    pub fn register(&mut self, label: &str, stream: &[f32]) -> DrawableId {
        self.entries.push((label.to_string(), stream.to_vec()));
        DrawableId(self.entries.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn label(&self, id: DrawableId) -> Option<&str> {
        self.entries.get(id.0).map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (DrawableId, &str, &[f32])> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (label, stream))| (DrawableId(i), label.as_str(), stream.as_slice()))
    }
}

/// GPU-resident vertex buffer for one primitive
///
/// Immutable after construction. The buffer is released when the drawable
/// is dropped.
pub struct Drawable {
    label: String,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl Drawable {
    pub fn new(device: &wgpu::Device, label: &str, vertices: &[Vertex3D]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            label: label.to_string(),
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }

}

impl Drop for Drawable {
    fn drop(&mut self) {
        log::debug!("Releasing drawable '{}'", self.label);
        self.vertex_buffer.destroy();
    }
}

/// Owns every drawable; entities refer to them by [`DrawableId`]
pub struct DrawableRegistry {
    drawables: Vec<Drawable>,
}

impl DrawableRegistry {
    /// Uploads every catalog stream, preserving handle order
    pub fn upload(device: &wgpu::Device, catalog: &MeshCatalog) -> Result<Self, MuseumError> {
        let mut drawables = Vec::with_capacity(catalog.len());

        for (_, label, stream) in catalog.iter() {
            let vertices = Vertex3D::from_interleaved(stream).ok_or_else(|| {
                MuseumError::init(format!(
                    "mesh '{}' has {} floats, not a whole number of vertices",
                    label,
                    stream.len()
                ))
            })?;
            drawables.push(Drawable::new(device, label, vertices));
        }

        log::debug!("Uploaded {} drawables", drawables.len());
        Ok(Self { drawables })
    }

    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.drawables.get(id.0)
    }
}

/// Render-pass extension that submits a drawable with its per-draw uniforms
pub trait DrawDrawable {
    /// Binds `uniforms` at group 1 and draws the drawable as a triangle list
    ///
    /// Uses whichever pipeline is currently set on the pass.
    fn draw_drawable(&mut self, drawable: &Drawable, uniforms: &wgpu::BindGroup);
}

impl DrawDrawable for wgpu::RenderPass<'_> {
    fn draw_drawable(&mut self, drawable: &Drawable, uniforms: &wgpu::BindGroup) {
        self.set_bind_group(1, uniforms, &[]);
        self.set_vertex_buffer(0, drawable.vertex_buffer.slice(..));
        self.draw(0..drawable.vertex_count, 0..1);
    }
}
