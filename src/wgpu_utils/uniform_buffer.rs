// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;

/// One `T` value living in a GPU uniform buffer
///
/// Remembers the bytes last written so that per-draw slots reused across
/// frames only hit the queue when their contents change.
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    last_written: Option<Vec<u8>>,
    _content: PhantomData<T>,
}

impl<T: bytemuck::Pod> UniformBuffer<T> {
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<T>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            last_written: None,
            _content: PhantomData,
        }
    }

    /// Queues a write of `value`, returning false when it matched the last one
    pub fn write(&mut self, queue: &wgpu::Queue, value: &T) -> bool {
        let bytes = bytemuck::bytes_of(value);
        if self.last_written.as_deref() == Some(bytes) {
            return false;
        }
        queue.write_buffer(&self.buffer, 0, bytes);
        self.last_written = Some(bytes.to_vec());
        true
    }

    /// Bind group exposing this buffer at binding 0 of `layout`
    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: self.buffer.as_entire_binding(),
            }],
        })
    }
}
