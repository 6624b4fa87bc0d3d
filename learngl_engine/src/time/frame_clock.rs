/// Frame clock producing per-frame delta times.
///
/// Delta time is clamped so a stall (debugger pause, window drag)
/// does not throw the camera across the scene on the next frame.

use std::time::{Duration, Instant};

/// Frame timing snapshot
#[derive(Debug, Clone, Copy)]
pub struct FrameTime {
    /// Seconds since the previous tick (clamped)
    pub dt: f32,
    /// Timestamp of this tick
    pub now: Instant,
    /// Number of ticks before this one
    pub frame_index: u64,
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Default lower clamp
    pub const DEFAULT_DT_MIN: Duration = Duration::from_micros(100);
    /// Default upper clamp
    pub const DEFAULT_DT_MAX: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_clamps(Self::DEFAULT_DT_MIN, Self::DEFAULT_DT_MAX)
    }

    /// Clock with custom delta-time clamps (swapped if given in reverse order)
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min: dt_min.min(dt_max),
            dt_max: dt_max.max(dt_min),
        }
    }

    /// Restart timing from now (after a suspend or a long setup)
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advance the clock
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advance the clock to a given instant
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let time = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        time
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "frame_clock_tests.rs"]
mod tests;
