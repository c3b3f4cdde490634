// src/ui/manager.rs
//! ImGui UI manager
//!
//! Handles ImGui integration with wgpu and winit, providing frame management,
//! input handling, and rendering for the museum overlay.

use imgui::{ConfigFlags, Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::Window,
};

use crate::gfx::camera::UiCapture;

/// ImGui UI manager
///
/// Manages ImGui context, platform integration, and rendering pipeline.
/// While the museum owns the cursor (mouse look), ImGui is told to ignore the
/// mouse and leave the OS cursor alone.
pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
    /// A frame was built but its draw data never rendered
    frame_open: bool,
}

impl UiManager {
    /// Creates a new UI manager
    ///
    /// Sets up ImGui with locked DPI handling and the default font.
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating renderer resources
    /// * `queue` - WGPU queue for renderer operations
    /// * `output_color_format` - Target texture format for rendering
    /// * `window` - Window for platform integration
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
    ) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(1.0));

        let font_size = 18.0;
        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: font_size,
                ..Default::default()
            }),
        }]);

        let renderer_config = RendererConfig {
            texture_format: output_color_format,
            ..Default::default()
        };
        let renderer = Renderer::new(&mut context, device, queue, renderer_config);

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
            frame_open: false,
        }
    }

    /// Feeds a window event to ImGui
    ///
    /// Returns true if the UI wants to capture the input.
    pub fn handle_input<T>(&mut self, window: &Window, event: &Event<T>) -> bool {
        match event {
            Event::WindowEvent {
                event: window_event,
                ..
            } => match window_event {
                WindowEvent::CursorMoved { .. }
                | WindowEvent::MouseInput { .. }
                | WindowEvent::MouseWheel { .. }
                | WindowEvent::KeyboardInput { .. }
                | WindowEvent::ModifiersChanged(_)
                | WindowEvent::Resized(_)
                | WindowEvent::ScaleFactorChanged { .. }
                | WindowEvent::Focused(_) => {
                    self.platform
                        .handle_event(self.context.io_mut(), window, event);
                    self.capture() != UiCapture::default()
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Input the UI claimed during the last frame
    pub fn capture(&self) -> UiCapture {
        let io = self.context.io();
        UiCapture {
            mouse: io.want_capture_mouse,
            keyboard: io.want_capture_keyboard,
        }
    }

    /// Hands the mouse to ImGui, or takes it away while the camera looks around
    pub fn set_mouse_enabled(&mut self, enabled: bool) {
        let flags = &mut self.context.io_mut().config_flags;
        flags.set(ConfigFlags::NO_MOUSE, !enabled);
        flags.set(ConfigFlags::NO_MOUSE_CURSOR_CHANGE, !enabled);
        self.last_cursor = None;
    }

    /// Builds this frame's UI and returns whatever the builder produced
    ///
    /// Call once per frame, before [`UiManager::render_display_only`].
    pub fn update_logic<F, R>(&mut self, window: &Window, run_ui: F) -> R
    where
        F: FnOnce(&imgui::Ui) -> R,
    {
        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(error) = self.platform.prepare_frame(self.context.io_mut(), window) {
            log::warn!("Failed to prepare UI frame: {}", error);
        }

        let ui = new_frame(&mut self.context, &mut self.frame_open);
        let output = run_ui(ui);

        if self.last_cursor != ui.mouse_cursor() {
            self.last_cursor = ui.mouse_cursor();
            self.platform.prepare_render(ui, window);
        }

        output
    }

    /// Renders the UI built in the last `update_logic()` call
    ///
    /// Uses `LoadOp::Load` to draw over the museum. Skipping this call for a
    /// frame is fine; the next `update_logic()` closes the stale frame.
    pub fn render_display_only(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) {
        self.frame_open = false;
        let draw_data = self.context.render();

        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imgui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Err(error) = self
            .renderer
            .render(draw_data, queue, device, &mut render_pass)
        {
            log::error!("Failed to render UI: {:?}", error);
        }
    }
}

/// Starts an imgui frame, first ending one whose render was skipped
///
/// Dear ImGui aborts if two frames begin without a render in between, which
/// happens whenever the surface drops a frame.
fn new_frame<'a>(context: &'a mut Context, frame_open: &mut bool) -> &'a mut imgui::Ui {
    if *frame_open {
        log::debug!("Discarding UI frame that was never rendered");
        context.render();
    }
    *frame_open = true;
    context.frame()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headless_context() -> Context {
        let mut context = Context::create();
        context.set_ini_filename(None);
        context.io_mut().display_size = [640.0, 480.0];
        context.fonts().build_rgba32_texture();
        context
    }

    #[test]
    fn test_skipped_render_does_not_break_next_frame() {
        let mut context = headless_context();
        let mut frame_open = false;

        new_frame(&mut context, &mut frame_open).text("dropped");
        assert!(frame_open);

        // no render for the first frame, as when the surface is outdated
        new_frame(&mut context, &mut frame_open).text("shown");
        frame_open = false;
        let draw_data = context.render();
        assert_eq!(draw_data.display_size, [640.0, 480.0]);

        new_frame(&mut context, &mut frame_open);
        assert!(frame_open);
        context.render();
    }
}
