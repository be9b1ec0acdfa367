use uber_noise_utils::noise::{SimplexNoise2d, SimplexNoise3d, SimplexNoise4d};
use uber_noise_utils::random::Random;

use crate::position::Position;

/// The three simplex kernels of a leaf engine, all seeded from one generator.
#[derive(Debug)]
pub(crate) struct LeafKernels {
    noise_2d: SimplexNoise2d,
    noise_3d: SimplexNoise3d,
    noise_4d: SimplexNoise4d,
    with_derivatives: bool,
}

impl LeafKernels {
    /// Builds the 2D, 3D and 4D kernels in that order.
    pub(crate) fn new<R: Random + ?Sized>(random: &mut R, with_derivatives: bool) -> Self {
        let noise_2d = SimplexNoise2d::new(random);
        let noise_3d = SimplexNoise3d::new(random);
        let noise_4d = SimplexNoise4d::new(random);
        Self {
            noise_2d,
            noise_3d,
            noise_4d,
            with_derivatives,
        }
    }

    /// Samples the kernel matching the position's dimension.
    #[inline]
    pub(crate) fn sample(&self, at: Position) -> f64 {
        let Position { x, y, z, w } = at;
        let z = z.unwrap_or_default();
        let w = w.unwrap_or_default();
        match (at.dimension(), self.with_derivatives) {
            (4, true) => self.noise_4d.get_value_with_derivatives(x, y, z, w).value,
            (4, false) => self.noise_4d.get_value(x, y, z, w),
            (3, true) => self.noise_3d.get_value_with_derivatives(x, y, z).value,
            (3, false) => self.noise_3d.get_value(x, y, z),
            (_, true) => self.noise_2d.get_value_with_derivatives(x, y).value,
            (_, false) => self.noise_2d.get_value(x, y),
        }
    }

    pub(crate) const fn with_derivatives(&self) -> bool {
        self.with_derivatives
    }
}
