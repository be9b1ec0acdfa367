//! Construction options for [`UberNoise`].
//!
//! [`NoiseOptions`] deserializes from the camelCase JSON shape used by
//! configuration files (`{"seed": 1, "octaves": 4, "warpNoise": {...}}`) and
//! is equally usable as a struct literal with `..Default::default()`.
//! Unknown keys are ignored.

use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use uber_noise_utils::random::Seed;

use crate::engine::UberNoise;

/// Every option accepted by [`UberNoise::new`]. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoiseOptions {
    /// Generator seed. Drawn from thread entropy when absent.
    pub seed: Option<Seed>,
    /// Lower bound of the output range. Default `-1`.
    pub min: Option<ParamSource>,
    /// Upper bound of the output range. Default `1`.
    pub max: Option<ParamSource>,
    /// Input frequency multiplier. Default `1`.
    pub scale: Option<ParamSource>,
    /// Exponent applied to the `[0, 1]`-mapped value. Default `1`.
    pub power: Option<ParamSource>,
    /// Accepted for document compatibility; the engine starts unshifted.
    /// Use [`UberNoise::shift`] to move the field.
    pub shift: Option<Vec<f64>>,
    /// Number of fractal layers. Defaults to `layers.len()`; `0` means a
    /// single leaf kernel. Negative document values count as `0`.
    #[serde(deserialize_with = "clamped_octaves")]
    pub octaves: Option<usize>,
    /// Amplitude multiplier per layer. Default `0.5`.
    pub gain: Option<ParamSource>,
    /// Frequency multiplier per layer. Default `2`.
    pub lacunarity: Option<ParamSource>,
    /// Per-layer amplitude overrides; missing entries are `1`.
    pub amps: Vec<f64>,
    /// Per-layer engines or options; missing entries use default options.
    pub layers: Vec<NoiseSource>,
    /// `1` billowed, `-1` ridged, `0` plain. Default `0`.
    pub sharpness: Option<ParamSource>,
    /// Quantization step count, rounded to an integer. `0` disables.
    pub steps: Option<ParamSource>,
    /// Strength of the first domain warp. Default `0`.
    pub warp: Option<ParamSource>,
    /// Field sampled by the first warp; the engine itself when absent.
    pub warp_noise: Option<NoiseSource>,
    /// Strength of the second domain warp. Default `0`.
    pub warp2: Option<ParamSource>,
    /// Field sampled by the second warp; the engine itself when absent.
    pub warp_noise2: Option<NoiseSource>,
    /// Wrap the field with period 1 along X.
    pub tile_x: Option<bool>,
    /// Wrap the field with period 1 along Y.
    pub tile_y: Option<bool>,
    /// Shorthand for `tile_x` and `tile_y` when those are unset.
    pub tile: Option<bool>,
    /// Use the derivative kernels for leaf sampling. Not inherited by nested engines.
    pub with_derivatives: bool,
}

impl NoiseOptions {
    /// Default options with only the seed set.
    #[must_use]
    pub fn seeded(seed: impl Into<Seed>) -> Self {
        Self {
            seed: Some(seed.into()),
            ..Self::default()
        }
    }
}

fn clamped_octaves<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
    let octaves = Option::<i64>::deserialize(deserializer)?;
    Ok(octaves.map(|n| usize::try_from(n).unwrap_or(0)))
}

/// Where a numeric knob gets its value from.
#[derive(Debug, Clone)]
pub enum ParamSource {
    /// A fixed number.
    Value(f64),
    /// An engine built elsewhere and shared by reference.
    Shared(Arc<UberNoise>),
    /// Options for an engine built and owned by the parent. Auto-seeded
    /// from the parent's generator when the seed is absent.
    Options(Box<NoiseOptions>),
}

impl From<f64> for ParamSource {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl From<Arc<UberNoise>> for ParamSource {
    fn from(noise: Arc<UberNoise>) -> Self {
        Self::Shared(noise)
    }
}

impl From<NoiseOptions> for ParamSource {
    fn from(options: NoiseOptions) -> Self {
        Self::Options(Box::new(options))
    }
}

/// Where a layer or warp source engine comes from.
#[derive(Debug, Clone)]
pub enum NoiseSource {
    /// An engine built elsewhere and shared by reference.
    Shared(Arc<UberNoise>),
    /// Options for an engine built and owned by the parent.
    Options(Box<NoiseOptions>),
}

impl From<Arc<UberNoise>> for NoiseSource {
    fn from(noise: Arc<UberNoise>) -> Self {
        Self::Shared(noise)
    }
}

impl From<NoiseOptions> for NoiseSource {
    fn from(options: NoiseOptions) -> Self {
        Self::Options(Box::new(options))
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::Options(Box::default())
    }
}

/// Document shape of a knob: shared engines only exist programmatically.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawParam {
    Value(f64),
    Options(Box<NoiseOptions>),
}

impl<'de> Deserialize<'de> for ParamSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawParam::deserialize(deserializer)? {
            RawParam::Value(value) => Self::Value(value),
            RawParam::Options(options) => Self::Options(options),
        })
    }
}

impl<'de> Deserialize<'de> for NoiseSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Box::<NoiseOptions>::deserialize(deserializer).map(Self::Options)
    }
}
