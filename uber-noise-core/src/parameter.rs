//! Resolved knob values.
//!
//! Options are turned into [`NoiseParameter`]s once, at construction. A
//! driven parameter evaluates its engine at whatever position the pipeline
//! passes in; nothing is cached between reads.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::engine::UberNoise;
use crate::position::Position;

/// An engine referenced by a parent: either built and owned by it, or shared.
pub enum NoiseHandle {
    /// Built from inline options and owned by the parent.
    Owned(Box<UberNoise>),
    /// Built by the caller and shared between any number of parents.
    Shared(Arc<UberNoise>),
}

impl Deref for NoiseHandle {
    type Target = UberNoise;

    fn deref(&self) -> &UberNoise {
        match self {
            Self::Owned(noise) => noise,
            Self::Shared(noise) => noise,
        }
    }
}

impl fmt::Debug for NoiseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owned(noise) => f.debug_tuple("Owned").field(noise).finish(),
            Self::Shared(noise) => f.debug_tuple("Shared").field(noise).finish(),
        }
    }
}

/// A knob's value source after construction.
#[derive(Debug)]
pub enum NoiseParameter {
    /// Same value at every position.
    Constant(f64),
    /// The driving engine's output (in its own `[min, max]`) at the read position.
    Driven(NoiseHandle),
}

impl NoiseParameter {
    /// Reads the parameter at `at`.
    #[inline]
    #[must_use]
    pub fn resolve(&self, at: &Position) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Driven(noise) => noise.evaluate(*at),
        }
    }
}

/// Names a numeric knob for [`UberNoise::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Knob {
    /// Lower output bound.
    Min,
    /// Upper output bound.
    Max,
    /// Input frequency.
    Scale,
    /// Shaping exponent.
    Power,
    /// Per-layer amplitude multiplier.
    Gain,
    /// Per-layer frequency multiplier.
    Lacunarity,
    /// Billow/ridge blend.
    Sharpness,
    /// Quantization step count (read rounded).
    Steps,
    /// First warp strength.
    Warp,
    /// Second warp strength.
    Warp2,
}
