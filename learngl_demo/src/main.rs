//! LearnGL demo
//!
//! A lit cube field and a textured crate model seen through a
//! first-person camera.
//! WASD moves, the mouse looks around, the wheel zooms, keys 1-4 pick
//! the post-processing effect and Escape quits.

mod geometry;
mod scene;

use std::f32::consts::FRAC_PI_4;
use std::process::ExitCode;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;
use learngl_engine::glam::Vec3;
use learngl_engine::learngl::{Engine, Result};
use learngl_engine::learngl::camera::Camera;
use learngl_engine::learngl::context::{scroll_lines, ControlsConfig, RenderContext};
use learngl_engine::learngl::log::LogSeverity;
use learngl_engine::learngl::render::DeviceConfig;
use learngl_engine::{engine_error, engine_info};
use learngl_engine_renderer_gl::{GlGraphicsDevice, GlWindow};
use scene::{PostEffect, Scene};

const SOURCE: &str = "learngl::demo";

/// Window-bound state, created on `resumed`
///
/// Fields drop in order: the device releases its objects while the
/// window (and its context) is still alive.
struct Gpu {
    scene: Scene,
    device: GlGraphicsDevice,
    window: GlWindow,
}

struct App {
    device_config: DeviceConfig,
    context: RenderContext,
    gpu: Option<Gpu>,
    started: Instant,
    /// Cursor grabbed: raw motion drives the camera
    cursor_grabbed: bool,
    /// Raw motion seen; absolute cursor positions are ignored from then on
    raw_motion: bool,
    failed: bool,
}

impl App {
    fn new() -> Self {
        let device_config = DeviceConfig {
            title: "LearnGL".to_string(),
            ..DeviceConfig::default()
        };
        let camera = Camera::new(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(0.0, -90f32.to_radians(), 0.0),
            FRAC_PI_4,
            device_config.aspect_ratio(),
            0.1,
            100.0,
        );

        Self {
            device_config,
            context: RenderContext::new(camera, ControlsConfig::default()),
            gpu: None,
            started: Instant::now(),
            cursor_grabbed: false,
            raw_motion: false,
            failed: false,
        }
    }

    fn create_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let (window, mut device) = learngl_engine_renderer_gl::create(event_loop, &self.device_config)?;
        let (width, height) = window.framebuffer_size();
        let scene = Scene::new(&mut device, width, height)?;

        let camera = self.context.camera_mut();
        camera.aspect = width as f32 / height as f32;
        camera.update();

        self.cursor_grabbed = window.capture_cursor().is_some();
        Ok(Gpu { scene, device, window })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop) {
        self.failed = true;
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self.context.begin_frame();
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let time = frame.now.duration_since(self.started).as_secs_f32();
        gpu.scene.draw(&mut gpu.device, self.context.camera(), time);

        if let Err(err) = gpu.window.swap_buffers() {
            engine_error!(SOURCE, "{}", err);
            self.fail(event_loop);
            return;
        }

        if self.context.should_close() {
            event_loop.exit();
        } else {
            gpu.window.request_redraw();
        }
    }

    fn select_effect(&mut self, key: KeyCode) {
        let effect = match key {
            KeyCode::Digit1 => PostEffect::None,
            KeyCode::Digit2 => PostEffect::Inversion,
            KeyCode::Digit3 => PostEffect::Grayscale,
            KeyCode::Digit4 => PostEffect::EdgeDetect,
            _ => return,
        };
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.scene.effect = effect;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.create_gpu(event_loop) {
            Ok(gpu) => {
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
                self.context.clock_mut().reset();
                self.started = Instant::now();
            }
            Err(err) => {
                engine_error!(SOURCE, "Setup failed: {}", err);
                self.fail(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    self.context.handle_key(key, pressed);
                    if pressed {
                        self.select_effect(key);
                    }
                    if self.context.should_close() {
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if !self.raw_motion {
                    self.context.handle_pointer_moved(position.x, position.y);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.context.handle_scroll(scroll_lines(delta));
            }
            WindowEvent::Focused(focused) => {
                self.context.handle_focus(focused);
                if let Some(gpu) = &self.gpu {
                    if focused {
                        self.cursor_grabbed = gpu.window.capture_cursor().is_some();
                    } else {
                        gpu.window.release_cursor();
                        self.cursor_grabbed = false;
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.cursor_grabbed {
                self.raw_motion = true;
                self.context.handle_pointer_delta(dx, dy);
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut gpu) = self.gpu.take() {
            gpu.scene.release(&mut gpu.device);
            engine_info!(SOURCE, "Released GPU resources after {} frames", self.context.clock_mut().frame_index());
        }

        #[cfg(feature = "gl-debug-output")]
        learngl_engine_renderer_gl::print_debug_stats_report();
    }
}

fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        Engine::set_min_severity(LogSeverity::Debug);
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            engine_error!(SOURCE, "Unable to create the event loop: {}", err);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    if let Err(err) = event_loop.run_app(&mut app) {
        engine_error!(SOURCE, "Event loop terminated with an error: {}", err);
        return ExitCode::FAILURE;
    }

    if app.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
