use super::*;

#[test]
fn test_starts_at_b() {
    assert_eq!(ease_out_quart(0.0, 0.785, -0.05, 1.0), 0.785);
}

#[test]
fn test_ends_exactly_at_b_plus_c() {
    assert_eq!(ease_out_quart(1.0, 2.0, 3.0, 1.0), 5.0);
    assert_eq!(ease_out_quart(0.5, 2.0, 3.0, 0.5), 5.0);
}

#[test]
fn test_time_is_clamped_to_duration() {
    assert_eq!(ease_out_quart(7.0, 2.0, 3.0, 1.0), 5.0);
    assert_eq!(ease_out_quart(-1.0, 2.0, 3.0, 1.0), 2.0);
}

#[test]
fn test_monotonic_increasing_and_decreasing() {
    let mut up = ease_out_quart(0.0, 0.0, 1.0, 1.0);
    let mut down = ease_out_quart(0.0, 1.0, -1.0, 1.0);
    for step in 1..=100 {
        let t = step as f32 / 100.0;
        let next_up = ease_out_quart(t, 0.0, 1.0, 1.0);
        let next_down = ease_out_quart(t, 1.0, -1.0, 1.0);
        assert!(next_up >= up);
        assert!(next_down <= down);
        up = next_up;
        down = next_down;
    }
}

#[test]
fn test_decelerates() {
    // Most of the change happens in the first half.
    let half = ease_out_quart(0.5, 0.0, 1.0, 1.0);
    assert!((half - 0.9375).abs() < 1e-6);
}

#[test]
fn test_zero_duration_snaps_to_end() {
    assert_eq!(ease_out_quart(0.0, 1.0, 2.0, 0.0), 3.0);
}
