//! Composable procedural noise.
//!
//! [`UberNoise`] layers fractal sums, domain warping, shaping and tiling on
//! top of seeded simplex kernels. Any numeric knob can itself be driven by
//! another noise engine.
//!
//! ```no_run
//! use uber_noise_core::{NoiseOptions, UberNoise};
//!
//! let noise = UberNoise::new(NoiseOptions {
//!     seed: Some("terrain".into()),
//!     octaves: Some(5),
//!     warp: Some(0.4.into()),
//!     min: Some(0.0.into()),
//!     max: Some(255.0.into()),
//!     ..NoiseOptions::default()
//! });
//! let height = noise.evaluate((12.5, -3.0));
//! # let _ = height;
//! ```
//!
//! - [`engine`] - The noise field and its sampling pipeline
//! - [`config`] - Construction options
//! - [`parameter`] - Constant or noise-driven knob values
//! - [`position`] - 2D/3D/4D sample positions
//! - [`grid`] - Parallel grid sampling
//! - [`error`] - Boundary errors

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod parameter;
pub mod position;

pub use config::{NoiseOptions, NoiseSource, ParamSource};
pub use engine::UberNoise;
pub use error::{ConfigError, CoordinateError};
pub use grid::{GridSpec, sample_grid};
pub use parameter::{Knob, NoiseHandle, NoiseParameter};
pub use position::Position;
pub use uber_noise_utils::random::Seed;
