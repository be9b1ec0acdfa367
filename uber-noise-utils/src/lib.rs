//! Low-level building blocks for the uber-noise workspace.
//!
//! - [`random`] - Seeded, reproducible pseudo-random number generation
//! - [`noise`] - Permutation tables and simplex noise kernels (2D/3D/4D)
//! - [`math`] - Small numeric helpers shared by the kernels and the engine

pub mod math;
pub mod noise;
pub mod random;
