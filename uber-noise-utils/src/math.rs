//! Numeric helpers used on the sampling hot path.

/// Floors `value` to an `i32` lattice coordinate.
///
/// Out-of-range inputs saturate and `NaN` maps to `0`, so a non-finite
/// coordinate still lands on a valid cell and the `NaN` travels on through
/// the fractional offsets instead.
#[inline]
#[must_use]
pub fn fast_floor(value: f64) -> i32 {
    value.floor() as i32
}

/// Linear interpolation from `a` to `b` by `t`.
///
/// Written as `(b - a) * t + a` so `t = 0` returns `a` exactly.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a) * t + a
}

/// Rounds to the nearest integer, with halves rounding towards positive infinity.
///
/// `-2.5` rounds to `-2.0` and `2.5` to `3.0`, unlike [`f64::round`] which
/// rounds halves away from zero.
#[inline]
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
