/// Field-of-view zoom transition.
///
/// Scrolling moves a *target* field of view by a fixed step per scroll
/// unit. The current field of view then eases toward the target with
/// an ease-out-quartic curve. Retriggering restarts the curve from the
/// current (possibly mid-transition) value, so consecutive scrolls
/// never make the field of view jump.

use crate::utils::ease_out_quart;

/// Zoom transition state. All angles are in radians, times in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct FovZoom {
    start: f32,
    target: f32,
    elapsed: f32,
    duration: f32,
    min_fov: f32,
    max_fov: f32,
    step: f32,
    /// Set by `retrigger`, cleared once `advance` reaches the target
    pending: bool,
}

impl FovZoom {
    /// Default lower bound (1 degree)
    pub const DEFAULT_MIN_FOV: f32 = 1.0 * std::f32::consts::PI / 180.0;
    /// Default upper bound (45 degrees)
    pub const DEFAULT_MAX_FOV: f32 = std::f32::consts::FRAC_PI_4;
    /// Default step per scroll unit (3 degrees)
    pub const DEFAULT_STEP: f32 = 3.0 * std::f32::consts::PI / 180.0;
    /// Default transition duration
    pub const DEFAULT_DURATION: f32 = 1.0;

    /// Create a settled zoom resting at `fov`
    pub fn new(fov: f32) -> Self {
        Self {
            start: fov,
            target: fov,
            elapsed: Self::DEFAULT_DURATION,
            duration: Self::DEFAULT_DURATION,
            min_fov: Self::DEFAULT_MIN_FOV,
            max_fov: Self::DEFAULT_MAX_FOV,
            step: Self::DEFAULT_STEP,
            pending: false,
        }
    }

    /// Set the field of view bounds (swapped if given in reverse order)
    pub fn with_bounds(mut self, min_fov: f32, max_fov: f32) -> Self {
        self.min_fov = min_fov.min(max_fov);
        self.max_fov = max_fov.max(min_fov);
        self
    }

    /// Set the angular step per scroll unit
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Set the transition duration
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration.max(0.0);
        self.elapsed = self.elapsed.min(self.duration);
        self
    }

    // ===== GETTERS =====

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min_fov, self.max_fov)
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Whether a transition is still running
    ///
    /// A zero-duration transition stays active until the next `advance`
    /// writes its target.
    pub fn is_active(&self) -> bool {
        self.pending
    }

    /// Current point of the transition
    pub fn value(&self) -> f32 {
        ease_out_quart(self.elapsed, self.start, self.target - self.start, self.duration)
    }

    // ===== TRANSITION =====

    /// Start a new transition from `current_fov`, moving the target by
    /// `step · scroll_delta` (positive deltas zoom in)
    pub fn retrigger(&mut self, current_fov: f32, scroll_delta: f32) {
        self.start = current_fov.clamp(self.min_fov, self.max_fov);
        self.elapsed = 0.0;
        self.pending = true;
        self.target = (self.target - self.step * scroll_delta).clamp(self.min_fov, self.max_fov);
    }

    /// Advance the transition by `dt` seconds
    ///
    /// Returns the new field of view, or None when no transition was
    /// running (so a field of view set by hand is left alone).
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if !self.is_active() {
            return None;
        }
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        if self.elapsed >= self.duration {
            self.pending = false;
        }
        Some(self.value())
    }
}

#[cfg(test)]
#[path = "zoom_tests.rs"]
mod tests;
