use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, Event, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

use crate::config::MuseumConfig;
use crate::error::MuseumError;
use crate::gfx::{
    scene::{DrawableRegistry, MeshCatalog},
    RenderEngine,
};
use crate::input::InputState;
use crate::simulation::{frame, SimulationContext};
use crate::ui::{panel, UiManager};

/// The virtual museum application
///
/// Owns the event loop; [`VitrineApp::run`] blocks until the window closes.
pub struct VitrineApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

/// GPU-side state, created once the window exists
struct Gpu {
    // Drop order: drawables and UI resources go before the device that made them.
    drawables: DrawableRegistry,
    ui_manager: UiManager,
    render_engine: RenderEngine,
}

struct AppState {
    config: MuseumConfig,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    context: SimulationContext,
    catalog: MeshCatalog,
    input: InputState,
    last_frame: Instant,
    init_error: Option<MuseumError>,
}

impl VitrineApp {
    /// Creates the event loop and the museum scene
    ///
    /// No window or GPU resources exist until the loop starts.
    pub fn new(config: MuseumConfig) -> Result<Self, MuseumError> {
        let event_loop = EventLoop::new()?;
        let (context, catalog) = SimulationContext::museum(&config);

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                gpu: None,
                context,
                catalog,
                input: InputState::new(),
                last_frame: Instant::now(),
                init_error: None,
            },
        })
    }

    /// Run the application (consumes self and starts the event loop)
    ///
    /// # Errors
    /// Returns the first setup failure (window, GPU, shader), or an event loop
    /// error.
    pub fn run(mut self) -> Result<(), MuseumError> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop.run_app(&mut self.app_state)?;

        match self.app_state.init_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_gpu(&mut self, window: Arc<Window>) -> Result<Gpu, MuseumError> {
        let (width, height) = window.inner_size().into();
        let window_config = &self.config.window;

        let render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            window_config.vsync,
            &self.config.shader,
        ))?;

        let drawables = DrawableRegistry::upload(render_engine.device(), &self.catalog)?;

        let ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );

        self.context.resize(width, height);
        Ok(Gpu {
            drawables,
            ui_manager,
            render_engine,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: MuseumError) {
        log::error!("{}", error);
        self.init_error = Some(error);
        event_loop.exit();
    }

    /// One frame: input, simulation, draw submission, UI, present
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu)) = (self.window.as_ref(), self.gpu.as_mut()) else {
            return;
        };

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        let snapshot = self.input.snapshot();
        if snapshot.quit {
            event_loop.exit();
            return;
        }

        let ui_capture = gpu.ui_manager.capture();
        if let Some(captured) = self.context.camera.process_input(&snapshot, ui_capture, dt) {
            set_cursor_captured(window, captured);
            gpu.ui_manager.set_mouse_enabled(!captured);
            self.input.discard_motion();
        }

        frame::run_frame(&mut self.context, dt, gpu.render_engine.draw_queue_mut());

        let context = &self.context;
        let commands = gpu
            .ui_manager
            .update_logic(window, |ui| panel::museum_ui(ui, context));
        for command in commands {
            self.context.apply(command);
        }

        let ui_manager = &mut gpu.ui_manager;
        gpu.render_engine.render_frame(
            &gpu.drawables,
            Some(
                |device: &wgpu::Device,
                 queue: &wgpu::Queue,
                 encoder: &mut wgpu::CommandEncoder,
                 color_attachment: &wgpu::TextureView| {
                    ui_manager.render_display_only(device, queue, encoder, color_attachment);
                },
            ),
        );
    }
}

/// Grabs and hides the OS cursor for mouse look, or releases it
fn set_cursor_captured(window: &Window, captured: bool) {
    let result = if captured {
        window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };

    if let Err(error) = result {
        log::warn!("Could not change cursor grab: {}", error);
    }
    window.set_cursor_visible(!captured);
    log::debug!("Cursor captured: {}", captured);
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(error) => {
                self.fail(
                    event_loop,
                    MuseumError::init(format!("failed to create window: {}", error)),
                );
                return;
            }
        };

        match self.init_gpu(window.clone()) {
            Ok(mut gpu) => {
                let captured = self.context.camera.controller.is_captured();
                set_cursor_captured(&window, captured);
                gpu.ui_manager.set_mouse_enabled(!captured);
                self.gpu = Some(gpu);
                self.window = Some(window);
                self.last_frame = Instant::now();
                log::info!("Museum open with {} exhibits", self.context.exhibits.len());
            }
            Err(error) => self.fail(event_loop, error),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let (Some(window), Some(gpu)) = (self.window.as_ref(), self.gpu.as_mut()) else {
            return;
        };

        let ui_event: Event<()> = Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        gpu.ui_manager.handle_input(window, &ui_event);
        self.input.window_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                gpu.render_engine.resize(width, height);
                self.context.resize(width, height);
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        self.input.device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Release GPU resources while the window is still alive
        self.gpu = None;
        log::info!("Museum closed");
    }
}
