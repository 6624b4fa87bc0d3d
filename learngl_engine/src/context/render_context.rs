/// Render-loop context.
///
/// Owns the camera, the input state and the frame clock of one window.
/// Window event handlers call the `handle_*` methods; the frame loop
/// calls `begin_frame` once before drawing. Ordering is always:
/// input event, state mutation, then an explicit `Camera::update`
/// before the next draw.

use winit::keyboard::KeyCode;
use crate::camera::{Camera, FovZoom, DEFAULT_PITCH_LIMIT};
use crate::input::InputState;
use crate::time::{FrameClock, FrameTime};
use crate::engine_debug;

/// Camera control tuning. Angles in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsConfig {
    /// World units per second while a movement key is held
    pub move_speed: f32,
    /// Radians per pointer pixel at a 45 degree field of view
    pub base_sensitivity: f32,
    /// Largest pitch magnitude
    pub pitch_limit: f32,
    /// Narrowest field of view reachable by zooming
    pub min_fov: f32,
    /// Widest field of view reachable by zooming
    pub max_fov: f32,
    /// Field of view change per scroll notch
    pub zoom_step: f32,
    /// Seconds a zoom transition takes
    pub zoom_duration: f32,
    /// Key that requests the window to close
    pub close_key: Option<KeyCode>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            base_sensitivity: 0.12_f32.to_radians(),
            pitch_limit: DEFAULT_PITCH_LIMIT,
            min_fov: FovZoom::DEFAULT_MIN_FOV,
            max_fov: FovZoom::DEFAULT_MAX_FOV,
            zoom_step: FovZoom::DEFAULT_STEP,
            zoom_duration: FovZoom::DEFAULT_DURATION,
            close_key: Some(KeyCode::Escape),
        }
    }
}

pub struct RenderContext {
    camera: Camera,
    input: InputState,
    clock: FrameClock,
    controls: ControlsConfig,
    should_close: bool,
}

impl RenderContext {
    /// Take ownership of a camera and apply the control settings to it
    pub fn new(mut camera: Camera, controls: ControlsConfig) -> Self {
        camera.set_pitch_limit(controls.pitch_limit);
        camera.set_zoom(
            FovZoom::new(camera.fov)
                .with_bounds(controls.min_fov, controls.max_fov)
                .with_step(controls.zoom_step)
                .with_duration(controls.zoom_duration),
        );
        Self {
            camera,
            input: InputState::new(),
            clock: FrameClock::new(),
            controls,
            should_close: false,
        }
    }

    // ===== EVENTS =====

    /// Key pressed or released
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed && Some(key) == self.controls.close_key {
            engine_debug!("learngl::RenderContext", "{:?} pressed, closing", key);
            self.should_close = true;
        }
        self.input.key_event(key, pressed);
    }

    /// Cursor moved to (x, y) in window pixels
    ///
    /// Absolute positions stop at the window edge once the cursor is
    /// confined; prefer `handle_pointer_delta` when raw motion is available.
    pub fn handle_pointer_moved(&mut self, x: f64, y: f64) {
        let (dx, dy) = self.input.pointer_moved(x, y);
        self.look(dx, dy);
    }

    /// Raw pointer motion of (dx, dy) pixels, unbounded by the window
    pub fn handle_pointer_delta(&mut self, dx: f64, dy: f64) {
        self.look(dx as f32, dy as f32);
    }

    fn look(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let sensitivity = self.camera.look_sensitivity(self.controls.base_sensitivity);
        self.camera.apply_look(dx, dy, sensitivity);
        self.camera.update();
    }

    /// Wheel scrolled by `lines` notches (positive zooms in)
    pub fn handle_scroll(&mut self, lines: f32) {
        self.input.add_scroll(lines);
    }

    /// Window focus changed
    pub fn handle_focus(&mut self, focused: bool) {
        if !focused {
            self.input.release_all();
            self.input.reset_pointer();
        }
    }

    /// Ask the render loop to stop after this frame
    pub fn request_close(&mut self) {
        self.should_close = true;
    }

    // ===== FRAME =====

    /// Apply pending zoom, held movement and the zoom transition for a
    /// frame of `dt` seconds, then update the camera
    pub fn advance(&mut self, dt: f32) {
        let scroll = self.input.take_scroll();
        if scroll != 0.0 {
            self.camera.apply_zoom(scroll);
        }
        let movement = self.input.movement();
        if !movement.is_empty() {
            self.camera.apply_movement(movement, self.controls.move_speed * dt);
        }
        self.camera.advance_zoom(dt);
        self.camera.update();
    }

    /// Tick the frame clock and advance by the measured delta time
    pub fn begin_frame(&mut self) -> FrameTime {
        let time = self.clock.tick();
        self.advance(time.dt);
        time
    }

    // ===== GETTERS =====

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn controls(&self) -> &ControlsConfig {
        &self.controls
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }
}

#[cfg(test)]
#[path = "render_context_tests.rs"]
mod tests;
