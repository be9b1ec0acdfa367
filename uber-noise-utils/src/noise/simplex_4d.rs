//! 4D simplex noise.
//!
//! The containing simplex is found with Gustavson's rank ordering: six
//! pairwise comparisons count, per axis, how many other offsets it exceeds,
//! and corner `n` steps along every axis whose rank is at least `4 - n`.

use glam::DVec4;

use super::{GRAD4, PermutationTable, gradient_cache};
use crate::math::fast_floor;
use crate::random::Random;

#[allow(clippy::unreadable_literal)]
const SQRT_5: f64 = 2.23606797749979;
/// Skewing factor for 4D simplex: `(sqrt(5) - 1) / 4`
const F4: f64 = (SQRT_5 - 1.0) / 4.0;
/// Unskewing factor for 4D simplex: `(5 - sqrt(5)) / 20`
const G4: f64 = (5.0 - SQRT_5) / 20.0;
const SCALE: f64 = 27.0;

/// A 4D noise value together with its partial derivatives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoiseSample4 {
    /// Noise value, roughly in `[-1, 1]`.
    pub value: f64,
    /// `(d/dx, d/dy, d/dz, d/dw)` of the value.
    pub gradient: DVec4,
}

struct Cell {
    offsets: [DVec4; 5],
    hashes: [usize; 5],
}

/// Seeded 4D simplex noise.
#[derive(Debug, Clone)]
pub struct SimplexNoise4d {
    perm: PermutationTable,
    grad: Box<[[f64; 4]; PermutationTable::LEN]>,
}

impl SimplexNoise4d {
    /// Builds the permutation table and gradient cache from `random`.
    pub fn new<R: Random + ?Sized>(random: &mut R) -> Self {
        let perm = PermutationTable::new(random);
        let grad = gradient_cache(&perm, &GRAD4);
        Self { perm, grad }
    }

    #[inline]
    #[allow(clippy::similar_names)]
    fn cell(&self, x: f64, y: f64, z: f64, w: f64) -> Cell {
        let s = (x + y + z + w) * F4;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let k = fast_floor(z + s);
        let l = fast_floor(w + s);
        let t = (f64::from(i) + f64::from(j) + f64::from(k) + f64::from(l)) * G4;
        let origin = DVec4::new(
            x - (f64::from(i) - t),
            y - (f64::from(j) - t),
            z - (f64::from(k) - t),
            w - (f64::from(l) - t),
        );

        let mut rank = [0u8; 4];
        for a in 0..4 {
            for b in (a + 1)..4 {
                if origin[a] > origin[b] {
                    rank[a] += 1;
                } else {
                    rank[b] += 1;
                }
            }
        }

        let step = |threshold: u8| rank.map(|r| u8::from(r >= threshold));
        let steps = [[0u8; 4], step(3), step(2), step(1), [1u8; 4]];

        let ii = (i & 0xFF) as usize;
        let jj = (j & 0xFF) as usize;
        let kk = (k & 0xFF) as usize;
        let ll = (l & 0xFF) as usize;
        let p = &self.perm;

        let mut offsets = [DVec4::ZERO; 5];
        let mut hashes = [0usize; 5];
        for (corner, s) in steps.iter().enumerate() {
            let unskew = corner as f64 * G4;
            offsets[corner] = DVec4::new(
                origin.x - f64::from(s[0]) + unskew,
                origin.y - f64::from(s[1]) + unskew,
                origin.z - f64::from(s[2]) + unskew,
                origin.w - f64::from(s[3]) + unskew,
            );
            let [si, sj, sk, sl] = s.map(usize::from);
            hashes[corner] = ii + si + p.at(jj + sj + p.at(kk + sk + p.at(ll + sl)));
        }
        // The origin corner carries no unskew term.
        offsets[0] = origin;

        Cell { offsets, hashes }
    }

    #[inline]
    fn dot(g: [f64; 4], offset: DVec4) -> f64 {
        g[0] * offset.x + g[1] * offset.y + g[2] * offset.z + g[3] * offset.w
    }

    /// Sample the noise at `(x, y, z, w)`.
    ///
    /// Returns a value roughly in `[-1, 1]`. `NaN` coordinates propagate.
    #[must_use]
    pub fn get_value(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let cell = self.cell(x, y, z, w);
        let mut n = [0.0; 5];
        for (corner, (o, &hash)) in cell.offsets.iter().zip(&cell.hashes).enumerate() {
            let mut t = 0.6 - o.x * o.x - o.y * o.y - o.z * o.z - o.w * o.w;
            n[corner] = if t < 0.0 {
                0.0
            } else {
                t *= t;
                t * t * Self::dot(self.grad[hash], *o)
            };
        }
        SCALE * (n[0] + n[1] + n[2] + n[3] + n[4])
    }

    /// Sample the noise and its analytic gradient at `(x, y, z, w)`.
    ///
    /// The falloff sums the squared distance before subtracting it, so the
    /// value can differ from [`Self::get_value`] in the last bits.
    #[must_use]
    pub fn get_value_with_derivatives(&self, x: f64, y: f64, z: f64, w: f64) -> NoiseSample4 {
        let mut out = NoiseSample4::default();
        self.get_value_with_derivatives_into(x, y, z, w, &mut out);
        out
    }

    /// Like [`Self::get_value_with_derivatives`], writing into `out`.
    pub fn get_value_with_derivatives_into(
        &self,
        x: f64,
        y: f64,
        z: f64,
        w: f64,
        out: &mut NoiseSample4,
    ) {
        let cell = self.cell(x, y, z, w);
        let mut n = [0.0; 5];
        let mut d = [DVec4::ZERO; 5];

        for (corner, (o, &hash)) in cell.offsets.iter().zip(&cell.hashes).enumerate() {
            let t = 0.6 - (o.x * o.x + o.y * o.y + o.z * o.z + o.w * o.w);
            if t <= 0.0 {
                continue;
            }
            let g = self.grad[hash];
            let dot = Self::dot(g, *o);
            let t2 = t * t;
            let t4 = t2 * t2;
            n[corner] = t4 * dot;

            let factor = -8.0 * (t2 * t);
            d[corner] = DVec4::new(
                factor * o.x * dot + t4 * g[0],
                factor * o.y * dot + t4 * g[1],
                factor * o.z * dot + t4 * g[2],
                factor * o.w * dot + t4 * g[3],
            );
        }

        let sum = |f: fn(&DVec4) -> f64| f(&d[0]) + f(&d[1]) + f(&d[2]) + f(&d[3]) + f(&d[4]);
        out.value = (n[0] + n[1] + n[2] + n[3] + n[4]) * SCALE;
        out.gradient = DVec4::new(
            sum(|v| v.x) * SCALE,
            sum(|v| v.y) * SCALE,
            sum(|v| v.z) * SCALE,
            sum(|v| v.w) * SCALE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::alea::Alea;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    fn noise() -> SimplexNoise4d {
        SimplexNoise4d::new(&mut Alea::new(12345))
    }

    #[test]
    #[allow(clippy::unreadable_literal)]
    fn reference_values() {
        let noise = noise();
        assert_close(noise.get_value(0.5, 0.5, 0.5, 0.5), 0.17136317120636763);
        assert_close(
            noise.get_value(13.7, -4.2, 7.9, -3.3),
            -0.6626330437959471,
        );
    }

    #[test]
    #[allow(clippy::unreadable_literal)]
    fn reference_derivatives() {
        let sample = noise().get_value_with_derivatives(13.7, -4.2, 7.9, -3.3);
        assert_close(sample.value, -0.6626330437959466);
        assert_close(sample.gradient.x, -2.782343140128037);
        assert_close(sample.gradient.y, -1.8366328581717946);
        assert_close(sample.gradient.z, -0.8570592857756723);
        assert_close(sample.gradient.w, -0.15554286806792972);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let noise = noise();
        let h = 1e-6;
        let points = [
            DVec4::new(0.3, 0.7, 0.1, 0.9),
            DVec4::new(13.7, -4.2, 7.9, -3.3),
            DVec4::new(-5.55, 2.1, 40.4, 8.08),
        ];
        for p in points {
            let sample = noise.get_value_with_derivatives(p.x, p.y, p.z, p.w);
            for axis in 0..4 {
                let mut delta = DVec4::ZERO;
                delta[axis] = h;
                let (a, b) = (p + delta, p - delta);
                let fd = (noise.get_value(a.x, a.y, a.z, a.w) - noise.get_value(b.x, b.y, b.z, b.w))
                    / (2.0 * h);
                assert!(
                    (sample.gradient[axis] - fd).abs() < 1e-5,
                    "axis {axis} at {p}: {} vs {fd}",
                    sample.gradient[axis]
                );
            }
        }
    }

    #[test]
    fn nan_input_propagates() {
        assert!(noise().get_value(0.0, f64::NAN, 0.0, 0.0).is_nan());
        assert!(
            noise()
                .get_value_with_derivatives(0.0, 0.0, f64::NAN, 0.0)
                .value
                .is_nan()
        );
    }
}
