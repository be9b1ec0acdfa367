//! The composable noise field.
//!
//! An [`UberNoise`] is either a *leaf*, sampling simplex kernels directly, or
//! a *fractal* that sums child engines at increasing frequency. Every sample
//! runs the same fixed pipeline:
//!
//! 1. shift by the cumulative offset
//! 2. tile (wrap X and/or Y with period 1)
//! 3. warp, then warp2 (displace by the warp source's fractal stage)
//! 4. fractal sum (or leaf kernel)
//! 5. power, sharpness, steps
//! 6. map `[-1, 1]` into `[min, max]` (skipped by [`UberNoise::evaluate_normalized`])
//!
//! Knobs read by a stage are resolved at that stage's position, so a knob
//! driven by another engine varies across the field.

mod kernels;
mod shaping;

use std::fmt;

use glam::DVec4;
use uber_noise_utils::math::round_half_up;
use uber_noise_utils::random::Seed;
use uber_noise_utils::random::alea::Alea;

use crate::config::{NoiseOptions, NoiseSource, ParamSource};
use crate::error::{ConfigError, CoordinateError};
use crate::parameter::{Knob, NoiseHandle, NoiseParameter};
use crate::position::Position;
use kernels::LeafKernels;

/// Leaf kernels or fractal children. Never both.
enum Body {
    Leaf(Box<LeafKernels>),
    Fractal(Vec<NoiseHandle>),
}

/// A configurable, composable noise field.
///
/// Evaluation only needs `&self`, so one engine can be shared across threads
/// (directly or through an [`Arc`](std::sync::Arc)). Only [`UberNoise::shift`]
/// mutates.
pub struct UberNoise {
    seed: Seed,

    min: NoiseParameter,
    max: NoiseParameter,
    scale: NoiseParameter,
    power: NoiseParameter,

    gain: NoiseParameter,
    lacunarity: NoiseParameter,
    amps: Vec<f64>,

    sharpness: NoiseParameter,
    steps: NoiseParameter,

    warp: NoiseParameter,
    warp_noise: Option<NoiseHandle>,
    warp2: NoiseParameter,
    warp_noise2: Option<NoiseHandle>,

    tile_x: bool,
    tile_y: bool,

    shift: DVec4,
    body: Body,
}

impl UberNoise {
    /// Builds an engine and everything nested in `options`.
    ///
    /// The engine's generator is seeded first, then drawn from in a fixed
    /// order: knobs (min, max, scale, power, gain, lacunarity, sharpness,
    /// steps, warp, warp source, warp2, second warp source), then layers,
    /// then (leaf engines only) the 2D, 3D and 4D permutation tables. Nested
    /// options without a seed take the next draw as theirs.
    #[must_use]
    pub fn new(options: NoiseOptions) -> Self {
        let NoiseOptions {
            seed,
            min,
            max,
            scale,
            power,
            shift,
            octaves,
            gain,
            lacunarity,
            amps,
            layers,
            sharpness,
            steps,
            warp,
            warp_noise,
            warp2,
            warp_noise2,
            tile_x,
            tile_y,
            tile,
            with_derivatives,
        } = options;

        let seed = seed.unwrap_or_else(|| Seed::from(rand::random::<f64>()));
        let mut rng = Alea::new(&seed);

        let min = build_parameter(min, -1.0, &mut rng);
        let max = build_parameter(max, 1.0, &mut rng);
        let scale = build_parameter(scale, 1.0, &mut rng);
        let power = build_parameter(power, 1.0, &mut rng);
        let gain = build_parameter(gain, 0.5, &mut rng);
        let lacunarity = build_parameter(lacunarity, 2.0, &mut rng);
        let sharpness = build_parameter(sharpness, 0.0, &mut rng);
        let steps = build_parameter(steps, 0.0, &mut rng);
        let warp = build_parameter(warp, 0.0, &mut rng);
        let warp_noise = warp_noise.map(|source| build_handle(source, &mut rng));
        let warp2 = build_parameter(warp2, 0.0, &mut rng);
        let warp_noise2 = warp_noise2.map(|source| build_handle(source, &mut rng));

        let octaves = octaves.unwrap_or(layers.len());
        let mut layers = layers.into_iter();
        let children: Vec<NoiseHandle> = (0..octaves)
            .map(|_| build_handle(layers.next().unwrap_or_default(), &mut rng))
            .collect();

        let body = if children.is_empty() {
            Body::Leaf(Box::new(LeafKernels::new(&mut rng, with_derivatives)))
        } else {
            Body::Fractal(children)
        };

        if shift.is_some() {
            log::debug!("noise {seed}: construction-time shift ignored, use UberNoise::shift");
        }
        match &body {
            Body::Leaf(kernels) => log::debug!(
                "built leaf noise {seed} (derivatives: {})",
                kernels.with_derivatives()
            ),
            Body::Fractal(children) => {
                log::debug!("built fractal noise {seed} with {} layers", children.len());
            }
        }

        Self {
            seed,
            min,
            max,
            scale,
            power,
            gain,
            lacunarity,
            amps,
            sharpness,
            steps,
            warp,
            warp_noise,
            warp2,
            warp_noise2,
            tile_x: tile_x.or(tile).unwrap_or(false),
            tile_y: tile_y.or(tile).unwrap_or(false),
            shift: DVec4::ZERO,
            body,
        }
    }

    /// Builds an engine from a JSON option document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: NoiseOptions = serde_json::from_str(json)?;
        Ok(Self::new(options))
    }

    /// Samples the field at `at`, mapped into `[min, max]`.
    ///
    /// `min` and `max` are read at the fully transformed (shifted, tiled,
    /// warped) position.
    #[must_use]
    pub fn evaluate(&self, at: impl Into<Position>) -> f64 {
        let (value, at) = self.sample(at.into());
        self.map_to_range(value, &at)
    }

    /// Samples the field at `at` without the final `[min, max]` mapping.
    #[must_use]
    pub fn evaluate_normalized(&self, at: impl Into<Position>) -> f64 {
        self.sample(at.into()).0
    }

    /// Samples the field at a runtime-sized coordinate list.
    pub fn evaluate_slice(&self, coords: &[f64]) -> Result<f64, CoordinateError> {
        Position::try_from(coords).map(|at| self.evaluate(at))
    }

    /// Moves the field by adding to the cumulative shift.
    ///
    /// `dz` and `dw` only affect samples that have those components.
    pub fn shift(&mut self, dx: f64, dy: f64, dz: Option<f64>, dw: Option<f64>) -> &mut Self {
        self.shift += DVec4::new(dx, dy, dz.unwrap_or(0.0), dw.unwrap_or(0.0));
        self
    }

    /// The cumulative shift as `(x, y, z, w)`.
    #[must_use]
    pub const fn shift_offset(&self) -> DVec4 {
        self.shift
    }

    /// Reads a knob at `at`. Steps are rounded to the nearest integer.
    #[must_use]
    pub fn resolve(&self, knob: Knob, at: &Position) -> f64 {
        match knob {
            Knob::Min => self.min.resolve(at),
            Knob::Max => self.max.resolve(at),
            Knob::Scale => self.scale.resolve(at),
            Knob::Power => self.power.resolve(at),
            Knob::Gain => self.gain.resolve(at),
            Knob::Lacunarity => self.lacunarity.resolve(at),
            Knob::Sharpness => self.sharpness.resolve(at),
            Knob::Steps => round_half_up(self.steps.resolve(at)),
            Knob::Warp => self.warp.resolve(at),
            Knob::Warp2 => self.warp2.resolve(at),
        }
    }

    /// Maps a `[-1, 1]` value into `[min, max]` as read at `at`.
    #[must_use]
    pub fn normalized_to_range(&self, value: f64, at: &Position) -> f64 {
        self.map_to_range(value, at)
    }

    /// Maps a `[min, max]` value (as read at `at`) back into `[-1, 1]`.
    #[must_use]
    pub fn range_to_normalized(&self, value: f64, at: &Position) -> f64 {
        let min = self.min.resolve(at);
        let max = self.max.resolve(at);
        ((value - min) / (max - min)) * 2.0 - 1.0
    }

    /// The seed this engine's generator was built from.
    #[must_use]
    pub const fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Number of fractal layers; `0` for a leaf.
    #[must_use]
    pub fn octaves(&self) -> usize {
        match &self.body {
            Body::Leaf(_) => 0,
            Body::Fractal(layers) => layers.len(),
        }
    }

    /// Whether this engine samples simplex kernels directly.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.body, Body::Leaf(_))
    }

    fn map_to_range(&self, value: f64, at: &Position) -> f64 {
        let max = self.max.resolve(at);
        let min = self.min.resolve(at);
        (value + 1.0) * 0.5 * (max - min) + min
    }

    /// Runs every stage except the range mapping. Returns the normalized
    /// value and the final position the shaping knobs were read at.
    fn sample(&self, at: Position) -> (f64, Position) {
        let at = self.apply_shift(at);
        let at = shaping::tile(at, self.tile_x, self.tile_y);
        let at = self.apply_warp(at, &self.warp, self.warp_noise.as_deref());
        let at = self.apply_warp(at, &self.warp2, self.warp_noise2.as_deref());

        let value = self.fractal(&at);
        let value = shaping::power(value, self.power.resolve(&at));
        let value = shaping::sharpen(value, self.sharpness.resolve(&at));
        let value = shaping::quantize(value, round_half_up(self.steps.resolve(&at)));

        (value, at)
    }

    fn apply_shift(&self, at: Position) -> Position {
        Position {
            x: at.x + self.shift.x,
            y: at.y + self.shift.y,
            z: at.z.map(|z| z + self.shift.z),
            w: at.w.map(|w| w + self.shift.w),
        }
    }

    /// Displaces `at` by `strength` times the source's fractal stage sampled
    /// at a fixed offset from `at`.
    #[allow(clippy::float_cmp)]
    fn apply_warp(
        &self,
        at: Position,
        strength: &NoiseParameter,
        source: Option<&Self>,
    ) -> Position {
        let strength = strength.resolve(&at);
        if strength == 0.0 {
            return at;
        }
        let probe = shaping::warp_probe(at, self.scale.resolve(&at));
        let source = source.unwrap_or(self);
        shaping::displace(at, source.fractal(&probe) * strength)
    }

    /// The fractal stage: a leaf kernel at `at * scale`, or the weighted,
    /// normalized sum of the layers.
    fn fractal(&self, at: &Position) -> f64 {
        let scale = self.scale.resolve(at);

        let layers = match &self.body {
            Body::Leaf(kernels) => return kernels.sample(at.scaled(scale)),
            Body::Fractal(layers) => layers,
        };

        let lacunarity = self.lacunarity.resolve(at);
        let gain = self.gain.resolve(at);

        let mut sum = 0.0;
        let mut amp = 1.0;
        let mut max_amp = 1.0;
        let mut freq = scale;

        for (i, layer) in layers.iter().enumerate() {
            let layer_amp = self.amps.get(i).copied().unwrap_or(1.0);
            sum += layer.evaluate(at.scaled(freq)) * amp * layer_amp;

            amp *= gain;
            freq *= lacunarity;
            max_amp += amp * layer_amp;
        }

        sum / max_amp
    }
}

impl fmt::Debug for UberNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UberNoise")
            .field("seed", &self.seed)
            .field("octaves", &self.octaves())
            .field("tile", &(self.tile_x, self.tile_y))
            .field("shift", &self.shift)
            .finish_non_exhaustive()
    }
}

/// Resolves a knob option, building (and if needed seeding) nested engines.
fn build_parameter(source: Option<ParamSource>, default: f64, rng: &mut Alea) -> NoiseParameter {
    match source {
        None => NoiseParameter::Constant(default),
        Some(ParamSource::Value(value)) => NoiseParameter::Constant(value),
        Some(ParamSource::Shared(noise)) => NoiseParameter::Driven(NoiseHandle::Shared(noise)),
        Some(ParamSource::Options(options)) => {
            NoiseParameter::Driven(NoiseHandle::Owned(Box::new(build_nested(*options, rng))))
        }
    }
}

fn build_handle(source: NoiseSource, rng: &mut Alea) -> NoiseHandle {
    match source {
        NoiseSource::Shared(noise) => NoiseHandle::Shared(noise),
        NoiseSource::Options(options) => NoiseHandle::Owned(Box::new(build_nested(*options, rng))),
    }
}

fn build_nested(mut options: NoiseOptions, rng: &mut Alea) -> UberNoise {
    if options.seed.is_none() {
        let seed = Seed::from(rng.random());
        log::trace!("auto-seeding nested noise with {seed}");
        options.seed = Some(seed);
    }
    UberNoise::new(options)
}
