/// Ease-out-quartic interpolation.
///
/// Penner-style signature: `t` is the elapsed time, `b` the start value,
/// `c` the total change and `d` the duration. `t` is clamped to
/// `[0, d]`, so the curve starts at `b`, ends exactly at `b + c`, and
/// arrives with zero velocity.
///
/// A non-positive duration yields the end value.
///
/// # Example
///
/// ```
/// use learngl_engine::utils::ease_out_quart;
///
/// assert_eq!(ease_out_quart(0.0, 10.0, 5.0, 1.0), 10.0);
/// assert_eq!(ease_out_quart(1.0, 10.0, 5.0, 1.0), 15.0);
/// ```
#[inline]
pub fn ease_out_quart(t: f32, b: f32, c: f32, d: f32) -> f32 {
    if d <= 0.0 {
        return b + c;
    }
    let t = t.clamp(0.0, d) / d - 1.0;
    -c * (t * t * t * t - 1.0) + b
}

#[cfg(test)]
#[path = "easing_tests.rs"]
mod tests;
