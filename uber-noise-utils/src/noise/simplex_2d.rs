//! 2D simplex noise over a triangular lattice.

use glam::DVec2;

use super::{GRAD2, PermutationTable, gradient_cache};
use crate::math::fast_floor;
use crate::random::Random;

#[allow(clippy::unreadable_literal)]
const SQRT_3: f64 = 1.7320508075688772;
/// Skewing factor for 2D simplex: `0.5 * (sqrt(3) - 1)`
const F2: f64 = 0.5 * (SQRT_3 - 1.0);
/// Unskewing factor for 2D simplex: `(3 - sqrt(3)) / 6`
const G2: f64 = (3.0 - SQRT_3) / 6.0;
/// Brings the summed corner contributions into roughly `[-1, 1]`.
const SCALE: f64 = 70.0;

/// A 2D noise value together with its partial derivatives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoiseSample2 {
    /// Noise value, roughly in `[-1, 1]`.
    pub value: f64,
    /// `(d/dx, d/dy)` of the value.
    pub gradient: DVec2,
}

/// Simplex cell lookup shared by the value and derivative paths.
struct Cell {
    offsets: [DVec2; 3],
    hashes: [usize; 3],
}

/// Seeded 2D simplex noise.
#[derive(Debug, Clone)]
pub struct SimplexNoise2d {
    perm: PermutationTable,
    grad: Box<[[f64; 2]; PermutationTable::LEN]>,
}

impl SimplexNoise2d {
    /// Builds the permutation table and gradient cache from `random`.
    pub fn new<R: Random + ?Sized>(random: &mut R) -> Self {
        let perm = PermutationTable::new(random);
        let grad = gradient_cache(&perm, &GRAD2);
        Self { perm, grad }
    }

    #[inline]
    fn cell(&self, x: f64, y: f64) -> Cell {
        let s = (x + y) * F2;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let t = (f64::from(i) + f64::from(j)) * G2;
        let x0 = x - (f64::from(i) - t);
        let y0 = y - (f64::from(j) - t);

        // Lower triangle walks (0,0)->(1,0)->(1,1), upper (0,0)->(0,1)->(1,1)
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + G2;
        let y1 = y0 - f64::from(j1) + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i & 0xFF) as usize;
        let jj = (j & 0xFF) as usize;
        let p = &self.perm;

        Cell {
            offsets: [
                DVec2::new(x0, y0),
                DVec2::new(x1, y1),
                DVec2::new(x2, y2),
            ],
            hashes: [
                ii + p.at(jj),
                ii + i1 as usize + p.at(jj + j1 as usize),
                ii + 1 + p.at(jj + 1),
            ],
        }
    }

    /// Sample the noise at `(x, y)`.
    ///
    /// Returns a value roughly in `[-1, 1]`. A `NaN` coordinate yields `0.0`
    /// because no corner passes the falloff test.
    #[must_use]
    pub fn get_value(&self, x: f64, y: f64) -> f64 {
        let cell = self.cell(x, y);
        let mut n = [0.0; 3];
        for (corner, (offset, &hash)) in cell.offsets.iter().zip(&cell.hashes).enumerate() {
            let mut t = 0.5 - offset.x * offset.x - offset.y * offset.y;
            if t >= 0.0 {
                let [gx, gy] = self.grad[hash];
                t *= t;
                n[corner] = t * t * (gx * offset.x + gy * offset.y);
            }
        }
        SCALE * (n[0] + n[1] + n[2])
    }

    /// Sample the noise and its analytic gradient at `(x, y)`.
    #[must_use]
    pub fn get_value_with_derivatives(&self, x: f64, y: f64) -> NoiseSample2 {
        let mut out = NoiseSample2::default();
        self.get_value_with_derivatives_into(x, y, &mut out);
        out
    }

    /// Like [`Self::get_value_with_derivatives`], writing into `out`.
    pub fn get_value_with_derivatives_into(&self, x: f64, y: f64, out: &mut NoiseSample2) {
        let cell = self.cell(x, y);
        let mut value = 0.0;
        let mut dx = 0.0;
        let mut dy = 0.0;

        for (offset, &hash) in cell.offsets.iter().zip(&cell.hashes) {
            let t = 0.5 - offset.x * offset.x - offset.y * offset.y;
            if t > 0.0 {
                let [gx, gy] = self.grad[hash];
                let t2 = t * t;
                let t4 = t2 * t2;
                let dot = gx * offset.x + gy * offset.y;
                let t3 = t2 * t;

                value += t4 * dot;
                dx += 4.0 * t3 * (-2.0 * offset.x) * dot + t4 * gx;
                dy += 4.0 * t3 * (-2.0 * offset.y) * dot + t4 * gy;
            }
        }

        out.value = value * SCALE;
        out.gradient = DVec2::new(dx * SCALE, dy * SCALE);
    }
}
