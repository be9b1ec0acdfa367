//! Simplex noise primitives.
//!
//! - [`PermutationTable`] - Seeded 512-entry lattice hash
//! - [`SimplexNoise2d`] - 2D simplex noise, scaled by 70
//! - [`SimplexNoise3d`] - 3D simplex noise, scaled by 32
//! - [`SimplexNoise4d`] - 4D simplex noise, scaled by 27
//!
//! Every kernel can also return its analytic gradient alongside the value.

mod permutation;
mod simplex_2d;
mod simplex_3d;
mod simplex_4d;

pub use permutation::PermutationTable;
pub use simplex_2d::{NoiseSample2, SimplexNoise2d};
pub use simplex_3d::{NoiseSample3, SimplexNoise3d};
pub use simplex_4d::{NoiseSample4, SimplexNoise4d};

/// Gradient directions for 2D noise: the 12 edge midpoints of a cube projected onto XY.
pub(crate) const GRAD2: [[f64; 2]; 12] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// Gradient directions for 3D noise: the 12 edge midpoints of a cube.
pub(crate) const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Gradient directions for 4D noise: the 32 edge midpoints of a tesseract.
pub(crate) const GRAD4: [[f64; 4]; 32] = [
    [0.0, 1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0, -1.0],
    [0.0, 1.0, -1.0, 1.0],
    [0.0, 1.0, -1.0, -1.0],
    [0.0, -1.0, 1.0, 1.0],
    [0.0, -1.0, 1.0, -1.0],
    [0.0, -1.0, -1.0, 1.0],
    [0.0, -1.0, -1.0, -1.0],
    [1.0, 0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0, -1.0],
    [1.0, 0.0, -1.0, 1.0],
    [1.0, 0.0, -1.0, -1.0],
    [-1.0, 0.0, 1.0, 1.0],
    [-1.0, 0.0, 1.0, -1.0],
    [-1.0, 0.0, -1.0, 1.0],
    [-1.0, 0.0, -1.0, -1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0, -1.0],
    [1.0, -1.0, 0.0, 1.0],
    [1.0, -1.0, 0.0, -1.0],
    [-1.0, 1.0, 0.0, 1.0],
    [-1.0, 1.0, 0.0, -1.0],
    [-1.0, -1.0, 0.0, 1.0],
    [-1.0, -1.0, 0.0, -1.0],
    [1.0, 1.0, 1.0, 0.0],
    [1.0, 1.0, -1.0, 0.0],
    [1.0, -1.0, 1.0, 0.0],
    [1.0, -1.0, -1.0, 0.0],
    [-1.0, 1.0, 1.0, 0.0],
    [-1.0, 1.0, -1.0, 0.0],
    [-1.0, -1.0, 1.0, 0.0],
    [-1.0, -1.0, -1.0, 0.0],
];

/// Looks up, for every table slot, the gradient its permutation entry selects.
///
/// Gradients are picked by `entry % gradients.len()`, so the 12-entry tables
/// are slightly biased towards their first eight directions.
pub(crate) fn gradient_cache<const N: usize>(
    perm: &PermutationTable,
    gradients: &[[f64; N]],
) -> Box<[[f64; N]; PermutationTable::LEN]> {
    let mut cache = Box::new([[0.0; N]; PermutationTable::LEN]);
    for (slot, entry) in cache.iter_mut().zip(perm.as_slice()) {
        *slot = gradients[usize::from(*entry) % gradients.len()];
    }
    cache
}
