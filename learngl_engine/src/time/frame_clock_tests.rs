use std::time::{Duration, Instant};
use super::*;

#[test]
fn test_tick_counts_frames() {
    let mut clock = FrameClock::new();
    assert_eq!(clock.tick().frame_index, 0);
    assert_eq!(clock.tick().frame_index, 1);
    assert_eq!(clock.frame_index(), 2);
}

#[test]
fn test_dt_measures_elapsed_time() {
    let mut clock = FrameClock::new();
    let start = Instant::now() + Duration::from_secs(1);
    clock.tick_at(start);

    let time = clock.tick_at(start + Duration::from_millis(16));
    assert!((time.dt - 0.016).abs() < 1e-6);
    assert_eq!(time.now, start + Duration::from_millis(16));
}

#[test]
fn test_dt_is_clamped() {
    let mut clock = FrameClock::new();
    let start = Instant::now() + Duration::from_secs(1);
    clock.tick_at(start);

    let stalled = clock.tick_at(start + Duration::from_secs(10));
    assert_eq!(stalled.dt, FrameClock::DEFAULT_DT_MAX.as_secs_f32());

    let same_instant = clock.tick_at(start + Duration::from_secs(10));
    assert_eq!(same_instant.dt, FrameClock::DEFAULT_DT_MIN.as_secs_f32());
}

#[test]
fn test_custom_clamps() {
    let mut clock = FrameClock::with_clamps(Duration::from_millis(50), Duration::from_millis(10));
    let start = Instant::now() + Duration::from_secs(1);
    clock.tick_at(start);

    let time = clock.tick_at(start + Duration::from_secs(1));
    assert!((time.dt - 0.05).abs() < 1e-6);
}
