//! 3D simplex noise over a tetrahedral lattice.

use glam::DVec3;

use super::{GRAD3, PermutationTable, gradient_cache};
use crate::math::fast_floor;
use crate::random::Random;

/// Skewing factor for 3D simplex: `1/3`
const F3: f64 = 1.0 / 3.0;
/// Unskewing factor for 3D simplex: `1/6`
const G3: f64 = 1.0 / 6.0;
const SCALE: f64 = 32.0;

/// A 3D noise value together with its partial derivatives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoiseSample3 {
    /// Noise value, roughly in `[-1, 1]`.
    pub value: f64,
    /// `(d/dx, d/dy, d/dz)` of the value.
    pub gradient: DVec3,
}

struct Cell {
    offsets: [DVec3; 4],
    hashes: [usize; 4],
}

/// Seeded 3D simplex noise.
#[derive(Debug, Clone)]
pub struct SimplexNoise3d {
    perm: PermutationTable,
    grad: Box<[[f64; 3]; PermutationTable::LEN]>,
}

impl SimplexNoise3d {
    /// Builds the permutation table and gradient cache from `random`.
    pub fn new<R: Random + ?Sized>(random: &mut R) -> Self {
        let perm = PermutationTable::new(random);
        let grad = gradient_cache(&perm, &GRAD3);
        Self { perm, grad }
    }

    #[inline]
    fn cell(&self, x: f64, y: f64, z: f64) -> Cell {
        let s = (x + y + z) * F3;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let k = fast_floor(z + s);
        let t = (f64::from(i) + f64::from(j) + f64::from(k)) * G3;
        let x0 = x - (f64::from(i) - t);
        let y0 = y - (f64::from(j) - t);
        let z0 = z - (f64::from(k) - t);

        // Determine which of the six tetrahedra we're in
        let ([i1, j1, k1], [i2, j2, k2]): ([u8; 3], [u8; 3]) = if x0 >= y0 {
            if y0 >= z0 {
                ([1, 0, 0], [1, 1, 0])
            } else if x0 >= z0 {
                ([1, 0, 0], [1, 0, 1])
            } else {
                ([0, 0, 1], [1, 0, 1])
            }
        } else if y0 < z0 {
            ([0, 0, 1], [0, 1, 1])
        } else if x0 < z0 {
            ([0, 1, 0], [0, 1, 1])
        } else {
            ([0, 1, 0], [1, 1, 0])
        };

        let offsets = [
            DVec3::new(x0, y0, z0),
            DVec3::new(
                x0 - f64::from(i1) + G3,
                y0 - f64::from(j1) + G3,
                z0 - f64::from(k1) + G3,
            ),
            DVec3::new(
                x0 - f64::from(i2) + 2.0 * G3,
                y0 - f64::from(j2) + 2.0 * G3,
                z0 - f64::from(k2) + 2.0 * G3,
            ),
            DVec3::new(
                x0 - 1.0 + 3.0 * G3,
                y0 - 1.0 + 3.0 * G3,
                z0 - 1.0 + 3.0 * G3,
            ),
        ];

        let ii = (i & 0xFF) as usize;
        let jj = (j & 0xFF) as usize;
        let kk = (k & 0xFF) as usize;
        let p = &self.perm;
        let hash = |di: u8, dj: u8, dk: u8| {
            ii + usize::from(di) + p.at(jj + usize::from(dj) + p.at(kk + usize::from(dk)))
        };

        Cell {
            offsets,
            hashes: [
                hash(0, 0, 0),
                hash(i1, j1, k1),
                hash(i2, j2, k2),
                hash(1, 1, 1),
            ],
        }
    }

    #[inline]
    fn dot(g: [f64; 3], offset: DVec3) -> f64 {
        g[0] * offset.x + g[1] * offset.y + g[2] * offset.z
    }

    /// Sample the noise at `(x, y, z)`.
    ///
    /// Returns a value roughly in `[-1, 1]`. `NaN` coordinates propagate.
    #[must_use]
    pub fn get_value(&self, x: f64, y: f64, z: f64) -> f64 {
        let cell = self.cell(x, y, z);
        let mut n = [0.0; 4];
        for (corner, (offset, &hash)) in cell.offsets.iter().zip(&cell.hashes).enumerate() {
            let mut t = 0.6 - offset.x * offset.x - offset.y * offset.y - offset.z * offset.z;
            n[corner] = if t < 0.0 {
                0.0
            } else {
                t *= t;
                t * t * Self::dot(self.grad[hash], *offset)
            };
        }
        SCALE * (n[0] + n[1] + n[2] + n[3])
    }

    /// Sample the noise and its analytic gradient at `(x, y, z)`.
    #[must_use]
    pub fn get_value_with_derivatives(&self, x: f64, y: f64, z: f64) -> NoiseSample3 {
        let mut out = NoiseSample3::default();
        self.get_value_with_derivatives_into(x, y, z, &mut out);
        out
    }

    /// Like [`Self::get_value_with_derivatives`], writing into `out`.
    pub fn get_value_with_derivatives_into(&self, x: f64, y: f64, z: f64, out: &mut NoiseSample3) {
        let cell = self.cell(x, y, z);
        let mut n = [0.0; 4];
        let mut d = [DVec3::ZERO; 4];

        for (corner, (offset, &hash)) in cell.offsets.iter().zip(&cell.hashes).enumerate() {
            let t = 0.6 - offset.x * offset.x - offset.y * offset.y - offset.z * offset.z;
            if t > 0.0 {
                let g = self.grad[hash];
                let dot = Self::dot(g, *offset);
                let t2 = t * t;
                let t4 = t2 * t2;
                n[corner] = t4 * dot;

                let coeff = -8.0 * (t2 * t);
                d[corner] = DVec3::new(
                    coeff * offset.x * dot + t4 * g[0],
                    coeff * offset.y * dot + t4 * g[1],
                    coeff * offset.z * dot + t4 * g[2],
                );
            }
        }

        let value = n[0] + n[1] + n[2] + n[3];
        out.value = SCALE * value;
        out.gradient = DVec3::new(
            SCALE * (d[0].x + d[1].x + d[2].x + d[3].x),
            SCALE * (d[0].y + d[1].y + d[2].y + d[3].y),
            SCALE * (d[0].z + d[1].z + d[2].z + d[3].z),
        );
    }
}
