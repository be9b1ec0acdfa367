//! Position transforms and value shaping stages of the sampling pipeline.
//!
//! Values here are normalized, i.e. nominally in `[-1, 1]`.

use std::f64::consts::TAU;

use uber_noise_utils::math::lerp;

use crate::position::Position;

/// Per-axis offset between a warped position and the probe that displaces it,
/// in units of the engine's scale.
const WARP_PROBE_OFFSET: [f64; 4] = [54.47, -34.98, 21.63, -67.1];

/// Wraps X and/or Y onto a circle so the field repeats with period 1.
///
/// Tiling both axes samples the torus `(sin 2πx, cos 2πx, sin 2πy, cos 2πy)`
/// in 4D. A single axis is folded into the XY plane, which keeps the field
/// 2D but lets the other axis bleed into it.
pub(crate) fn tile(at: Position, tile_x: bool, tile_y: bool) -> Position {
    let (x, y) = (at.x, at.y);
    match (tile_x, tile_y) {
        (false, false) => at,
        (true, false) => Position {
            x: (x * TAU).sin(),
            y: (x * TAU).cos() + y,
            ..at
        },
        (false, true) => Position {
            x: (y * TAU).sin() + x,
            y: (y * TAU).cos(),
            ..at
        },
        (true, true) => Position::new((x * TAU).sin(), (x * TAU).cos())
            .with_z((y * TAU).sin())
            .with_w((y * TAU).cos()),
    }
}

/// Where a warp looks up its displacement for `at`.
pub(crate) fn warp_probe(at: Position, scale: f64) -> Position {
    let [ox, oy, oz, ow] = WARP_PROBE_OFFSET;
    Position {
        x: at.x + ox * scale,
        y: at.y + oy * scale,
        z: at.z.map(|z| z + oz * scale),
        w: at.w.map(|w| w + ow * scale),
    }
}

/// Moves every present axis by the same displacement.
pub(crate) fn displace(at: Position, offset: f64) -> Position {
    Position {
        x: at.x + offset,
        y: at.y + offset,
        z: at.z.map(|z| z + offset),
        w: at.w.map(|w| w + offset),
    }
}

/// Raises the `[0, 1]`-mapped value to `power`.
#[allow(clippy::float_cmp)]
pub(crate) fn power(value: f64, power: f64) -> f64 {
    if power == 1.0 {
        return value;
    }
    (((value + 1.0) * 0.5).powf(power) - 0.5) * 2.0
}

/// Blends towards billowed (`sharpness > 0`) or ridged (`< 0`) noise.
#[allow(clippy::float_cmp)]
pub(crate) fn sharpen(value: f64, sharpness: f64) -> f64 {
    if sharpness == 0.0 {
        return value;
    }
    let billow = (value.abs() - 0.5) * 2.0;
    let ridged = (0.5 - value.abs()) * 2.0;

    let value = lerp(value, billow, sharpness.max(0.0));
    lerp(value, ridged, (-sharpness).max(0.0))
}

/// Snaps the `[0, 1]`-mapped value down onto `steps` levels.
#[allow(clippy::float_cmp)]
pub(crate) fn quantize(value: f64, steps: f64) -> f64 {
    if steps == 0.0 {
        return value;
    }
    let unit = (value + 1.0) * 0.5;
    let snapped = (unit * steps).floor() / steps;
    snapped * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn neutral_settings_leave_value_untouched() {
        for v in [-1.0, -0.3, 0.0, 0.42, 1.0] {
            assert_eq!(power(v, 1.0), v);
            assert_eq!(sharpen(v, 0.0), v);
            assert_eq!(quantize(v, 0.0), v);
        }
    }

    #[test]
    fn full_sharpness_gives_billow_and_ridge() {
        assert!(close(sharpen(0.2, 1.0), -0.6));
        assert!(close(sharpen(-0.2, 1.0), -0.6));
        assert!(close(sharpen(0.2, -1.0), 0.6));
        assert!(close(sharpen(-0.9, -1.0), -0.8));
    }

    #[test]
    fn power_two_squares_unit_value() {
        // 0 -> 0.5 -> 0.25 -> -0.5
        assert!(close(power(0.0, 2.0), -0.5));
        assert!(close(power(1.0, 2.0), 1.0));
        assert!(close(power(-1.0, 2.0), -1.0));
    }

    #[test]
    fn quantize_yields_at_most_steps_plus_one_levels() {
        let mut levels: Vec<f64> = (0..=1000)
            .map(|i| quantize(f64::from(i) / 500.0 - 1.0, 4.0))
            .collect();
        levels.sort_by(f64::total_cmp);
        levels.dedup();
        // The top edge (exactly 1.0) forms its own level.
        assert_eq!(levels, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn tiling_both_axes_is_periodic() {
        let a = tile(Position::new(0.25, 0.75), true, true);
        let b = tile(Position::new(1.25, -0.25), true, true);
        assert!(close(a.x, b.x) && close(a.y, b.y));
        assert!(close(a.z.unwrap_or_default(), b.z.unwrap_or_default()));
        assert!(close(a.w.unwrap_or_default(), b.w.unwrap_or_default()));
    }

    #[test]
    fn probe_only_offsets_present_axes() {
        let probe = warp_probe(Position::new(0.0, 0.0).with_z(1.0), 2.0);
        assert!(close(probe.x, 108.94));
        assert!(close(probe.y, -69.96));
        assert!(close(probe.z.unwrap_or_default(), 44.26));
        assert_eq!(probe.w, None);
    }
}
