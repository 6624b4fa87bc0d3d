/// Input state for one window.
///
/// Holds which keys are down, the last pointer position and the scroll
/// accumulated since it was last consumed. The first pointer event
/// after creation (or after `reset_pointer`) only records the position
/// and yields a zero delta, so the camera does not jump when the
/// cursor first enters the window.

use rustc_hash::FxHashSet;
use winit::event::MouseScrollDelta;
use winit::keyboard::KeyCode;
use crate::camera::Movement;

/// Pixel scroll distance treated as one wheel notch
pub const PIXELS_PER_LINE: f64 = 120.0;

#[derive(Debug, Default)]
pub struct InputState {
    keys_down: FxHashSet<KeyCode>,
    last_pointer: Option<(f64, f64)>,
    pending_scroll: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== KEYS =====

    /// Record a key transition. Returns true if the held state changed
    /// (key repeats return false).
    pub fn key_event(&mut self, key: KeyCode, pressed: bool) -> bool {
        if pressed {
            self.keys_down.insert(key)
        } else {
            self.keys_down.remove(&key)
        }
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Forget every held key (focus loss leaves no stuck keys)
    pub fn release_all(&mut self) {
        self.keys_down.clear();
    }

    /// Movement directions currently held through W/A/S/D
    pub fn movement(&self) -> Movement {
        let mut movement = Movement::empty();
        movement.set(Movement::FORWARD, self.is_down(KeyCode::KeyW));
        movement.set(Movement::BACKWARD, self.is_down(KeyCode::KeyS));
        movement.set(Movement::LEFT, self.is_down(KeyCode::KeyA));
        movement.set(Movement::RIGHT, self.is_down(KeyCode::KeyD));
        movement
    }

    // ===== POINTER =====

    /// Record a pointer position and return the delta since the
    /// previous one, in pixels (screen Y grows downward)
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> (f32, f32) {
        let delta = match self.last_pointer {
            Some((last_x, last_y)) => ((x - last_x) as f32, (y - last_y) as f32),
            None => (0.0, 0.0),
        };
        self.last_pointer = Some((x, y));
        delta
    }

    /// Treat the next pointer event as the first one again
    pub fn reset_pointer(&mut self) {
        self.last_pointer = None;
    }

    pub fn last_pointer(&self) -> Option<(f64, f64)> {
        self.last_pointer
    }

    // ===== SCROLL =====

    pub fn add_scroll(&mut self, lines: f32) {
        self.pending_scroll += lines;
    }

    /// Scroll accumulated since the last call, in wheel notches
    pub fn take_scroll(&mut self) -> f32 {
        std::mem::take(&mut self.pending_scroll)
    }
}

/// Vertical wheel notches of a winit scroll delta (positive away from the user)
pub fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_LINE) as f32,
    }
}

#[cfg(test)]
#[path = "input_state_tests.rs"]
mod tests;
