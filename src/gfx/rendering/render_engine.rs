//! WGPU-based rendering engine for the museum
//!
//! Owns the surface, device and the single lit pipeline. Each frame it
//! replays the [`DrawQueue`] filled by the frame orchestrator, giving every
//! recorded draw its own uniform slot, and then hands the encoder to the UI
//! overlay.

use std::sync::Arc;
use wgpu::{Device, TextureFormat};

use crate::config::ShaderSourceConfig;
use crate::error::MuseumError;
use crate::gfx::{
    resources::{DepthBuffer, GlobalBindings},
    scene::{DrawDrawable, DrawableRegistry},
};
use crate::wgpu_utils::{single_uniform_layout, UniformBuffer};

use super::draw_queue::{DrawQueue, DrawUniform};
use super::pipeline_manager::{PipelineConfig, PipelineManager};

const MUSEUM_SHADER: &str = include_str!("museum.wgsl");
const MUSEUM_PIPELINE: &str = "Museum";

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

/// Uniform buffer and bind group for one draw call
struct DrawSlot {
    ubo: UniformBuffer<DrawUniform>,
    bind_group: wgpu::BindGroup,
}

impl DrawSlot {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let ubo = UniformBuffer::new(device, "Draw Uniform");
        let bind_group = ubo.bind_group(device, layout, "Draw Bind Group");
        Self { ubo, bind_group }
    }
}

/// Core rendering engine managing GPU resources and draw calls
///
/// The RenderEngine handles all low-level graphics operations including:
/// - Surface and device management
/// - Pipeline creation
/// - Depth buffer handling
/// - Global and per-draw uniform updates
/// - UI overlay rendering
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_buffer: DepthBuffer,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    global_bindings: GlobalBindings,
    draw_layout: wgpu::BindGroupLayout,
    draw_slots: Vec<DrawSlot>,
    draw_queue: DrawQueue,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `vsync` - Present with `Fifo` instead of the lowest-latency mode
    /// * `shader` - Where to read the lighting shader from
    ///
    /// # Errors
    /// [`MuseumError::Initialization`] when no surface, adapter or device is
    /// available, and the shader errors from [`ShaderSourceConfig::load`] and
    /// [`PipelineManager`].
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
        shader: &ShaderSourceConfig,
    ) -> Result<RenderEngine, MuseumError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| MuseumError::init(format!("failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| MuseumError::init(format!("no suitable graphics adapter: {}", e)))?;

        let info = adapter.get_info();
        log::info!("Using adapter '{}' ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| MuseumError::init(format!("failed to request a device: {}", e)))?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| MuseumError::init("surface reports no supported formats"))?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::Fifo
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_buffer = DepthBuffer::new(&device, config.width, config.height);

        let global_bindings = GlobalBindings::new(&device);
        let draw_layout = single_uniform_layout(&device, "Draw Bind Group Layout");

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        let source = shader.load(MUSEUM_SHADER)?;
        pipeline_manager.load_shader("museum", &source)?;
        pipeline_manager.create_pipeline(
            MUSEUM_PIPELINE,
            &PipelineConfig::default()
                .with_label("MUSEUM")
                .with_shader("museum")
                .with_color_format(format)
                .with_depth_format(DepthBuffer::FORMAT)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    draw_layout.clone(),
                ]),
        )?;

        log::info!(
            "Render engine ready: {}x{} {:?}, vsync {}",
            config.width,
            config.height,
            format,
            vsync
        );

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_buffer,
            format,
            pipeline_manager,
            global_bindings,
            draw_layout,
            draw_slots: Vec::new(),
            draw_queue: DrawQueue::new(),
        })
    }

    /// Queue the frame orchestrator submits into
    pub fn draw_queue_mut(&mut self) -> &mut DrawQueue {
        &mut self.draw_queue
    }

    /// Renders the recorded draw queue with an optional UI overlay
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render_frame<F>(&mut self, drawables: &DrawableRegistry, ui_callback: Option<F>)
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(error) => {
                log::warn!("Skipping frame: {}", error);
                return;
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if let Some(globals) = self.draw_queue.globals() {
            self.global_bindings.update(&self.queue, globals);
        }

        let calls = self.draw_queue.calls();
        while self.draw_slots.len() < calls.len() {
            self.draw_slots
                .push(DrawSlot::new(&self.device, &self.draw_layout));
        }
        for (slot, call) in self.draw_slots.iter_mut().zip(calls) {
            slot.ubo.write(&self.queue, &DrawUniform::from(&call.params));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.depth_buffer.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(MUSEUM_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

                for (call, slot) in calls.iter().zip(&self.draw_slots) {
                    match drawables.get(call.drawable) {
                        Some(drawable) => render_pass.draw_drawable(drawable, &slot.bind_group),
                        None => log::debug!("No drawable for {:?}", call.drawable),
                    }
                }
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_buffer = DepthBuffer::new(&self.device, width, height);
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    ///
    /// Used for creating compatible render targets and UI systems.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
