//! Interactive viewer: a winit window driving the field and the renderer.
//!
//! Left-drag orbits, the wheel zooms, Space pauses the animation and Escape
//! quits.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::ViewerError;
use crate::field::Field;
use crate::gpu::{Camera, GpuState};
use crate::random::SmallRandom;
use crate::resources::Resources;
use crate::scene::Scene;
use crate::time::{FrameClock, Time};

const STATS_INTERVAL: Duration = Duration::from_secs(2);

/// Open a window and animate a field built from `config` until it is closed.
pub fn run(config: FieldConfig) -> Result<(), ViewerError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    field: Field,
    scene: Scene,
    resources: Resources,
    rng: SmallRandom,
    time: Time,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    last_stats: Instant,
    /// First fatal error; returned from [`run`] after the loop exits.
    error: Option<ViewerError>,
}

impl App {
    fn new(config: FieldConfig) -> Self {
        let rng = SmallRandom::from_seed_option(config.seed);
        Self {
            window: None,
            gpu_state: None,
            field: Field::new(config),
            scene: Scene::new(),
            resources: Resources::with_defaults(),
            rng,
            time: Time::new(),
            mouse_pressed: false,
            last_mouse_pos: None,
            last_stats: Instant::now(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title("neurofield")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());

        self.field
            .on_ready(&self.resources, &mut self.scene, &mut self.rng)?;

        let camera = Camera::framing(self.field.config().bounds_size());
        self.gpu_state = Some(pollster::block_on(GpuState::new(window, camera))?);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: ViewerError) {
        error!("{}", e);
        if self.error.is_none() {
            self.error = Some(e);
        }
        event_loop.exit();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        self.time.tick();
        self.field
            .advance_frame(&self.time, &mut self.rng, &mut self.scene);

        if self.last_stats.elapsed() >= STATS_INTERVAL {
            self.last_stats = Instant::now();
            debug!(
                fps = self.time.fps(),
                flashing = self.field.flashing_count(),
                frame = self.time.frame(),
                "Frame stats"
            );
        }

        if let Some(gpu_state) = &mut self.gpu_state {
            match gpu_state.render(&self.scene) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => gpu_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    error!("GPU out of memory, exiting");
                    event_loop.exit();
                }
                Err(e) => warn!("Render error: {:?}", e),
            }
        }
    }

    fn key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
            PhysicalKey::Code(KeyCode::Space) => {
                self.time.toggle_pause();
                info!(paused = self.time.is_paused(), "Toggled pause");
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.key(event_loop, event),
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        if let Some(gpu_state) = &mut self.gpu_state {
                            gpu_state.camera.orbit(dx, dy);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.zoom(scroll);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
