//! Alea: a three-term multiply-with-carry generator.
//!
//! The generator keeps three 32-bit fractional state words and an integer
//! carry. Seeding runs a stateful "mash" hash over a blank string three times
//! and then over the seed text three times, so any string (or number rendered
//! as one, see [`Seed`]) gives a well spread starting state.
//!
//! Everything is done in `f64` arithmetic, and every intermediate is exactly
//! representable, so two generators built from the same seed produce
//! bit-identical sequences on every platform.

use serde::{Deserialize, Serialize};

use super::{Random, Seed};

/// `2^32`
const TWO_POW_32: f64 = 4_294_967_296.0;
/// `2^-32`
const TWO_POW_NEG_32: f64 = 1.0 / TWO_POW_32;
/// `2^-53`, the spacing of the low bits appended by [`Alea::fract53`].
const FRACTION_FIX: f64 = f64::EPSILON / 2.0;
/// Multiplier of the multiply-with-carry step.
const MULTIPLIER: f64 = 2_091_639.0;

/// Stateful string hash used to derive the initial generator state.
///
/// Each call folds into the accumulator left by the previous one, which is
/// what makes consecutive hashes of the same text differ.
struct Mash {
    state: f64,
}

impl Mash {
    const INITIAL_STATE: f64 = 4_022_871_197.0; // 0xefc8249d
    #[allow(clippy::unreadable_literal)]
    const MAGIC: f64 = 0.02519603282416938;

    const fn new() -> Self {
        Self {
            state: Self::INITIAL_STATE,
        }
    }

    fn hash(&mut self, data: &str) -> f64 {
        for unit in data.encode_utf16() {
            self.state += f64::from(unit);
            let mut h = Self::MAGIC * self.state;
            self.state = low_u32(h);
            h -= self.state;
            h *= self.state;
            self.state = low_u32(h);
            h -= self.state;
            self.state += h * TWO_POW_32;
        }
        low_u32(self.state) * TWO_POW_NEG_32
    }
}

/// Truncates a non-negative value and keeps its low 32 bits.
#[inline]
fn low_u32(value: f64) -> f64 {
    f64::from(value as u64 as u32)
}

/// Snapshot of an [`Alea`] generator.
///
/// Restoring a snapshot with [`Alea::import_state`] resumes the sequence at
/// exactly the same point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AleaState {
    /// Oldest state word.
    pub seed0: f64,
    /// Middle state word.
    pub seed1: f64,
    /// Newest state word (also the last value returned by `random`).
    pub seed2: f64,
    /// Integer carry.
    pub constant: f64,
}

/// Seedable multiply-with-carry pseudo-random number generator.
#[derive(Debug, Clone)]
pub struct Alea {
    s0: f64,
    s1: f64,
    s2: f64,
    c: f64,
}

impl Alea {
    /// Creates a generator from anything convertible into a [`Seed`].
    #[must_use]
    pub fn new(seed: impl Into<Seed>) -> Self {
        let seed = seed.into();
        let mut mash = Mash::new();

        let mut s0 = mash.hash(" ");
        let mut s1 = mash.hash(" ");
        let mut s2 = mash.hash(" ");

        s0 -= mash.hash(seed.as_str());
        if s0 < 0.0 {
            s0 += 1.0;
        }
        s1 -= mash.hash(seed.as_str());
        if s1 < 0.0 {
            s1 += 1.0;
        }
        s2 -= mash.hash(seed.as_str());
        if s2 < 0.0 {
            s2 += 1.0;
        }

        tracing::trace!(seed = seed.as_str(), "seeded alea generator");

        Self { s0, s1, s2, c: 1.0 }
    }

    /// Returns the next value in `[0, 1)` with 32 bits of randomness.
    pub fn random(&mut self) -> f64 {
        let t = MULTIPLIER * self.s0 + self.c * TWO_POW_NEG_32;
        self.s0 = self.s1;
        self.s1 = self.s2;
        self.c = t.floor();
        self.s2 = t - self.c;
        self.s2
    }

    /// Returns the next value in `[0, 2^32)`.
    pub fn uint32(&mut self) -> u32 {
        (self.random() * TWO_POW_32) as u32
    }

    /// Returns a value in `[0, 1)` with 53 bits of randomness.
    ///
    /// Consumes two draws: the first supplies the high bits, the second
    /// the low 21 bits.
    pub fn fract53(&mut self) -> f64 {
        let high = self.random();
        let low = (self.random() * 2_097_152.0).trunc();
        high + low * FRACTION_FIX
    }

    /// Captures the current generator state.
    #[must_use]
    pub const fn export_state(&self) -> AleaState {
        AleaState {
            seed0: self.s0,
            seed1: self.s1,
            seed2: self.s2,
            constant: self.c,
        }
    }

    /// Replaces the generator state with a previously exported one.
    pub const fn import_state(&mut self, state: AleaState) {
        self.s0 = state.seed0;
        self.s1 = state.seed1;
        self.s2 = state.seed2;
        self.c = state.constant;
    }
}

impl Random for Alea {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        self.random()
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.uint32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    #[allow(clippy::unreadable_literal)]
    fn reference_sequence_for_numeric_seed() {
        let mut rng = Alea::new(12345);
        assert_eq!(
            rng.export_state(),
            AleaState {
                seed0: 0.45692888274788857,
                seed1: 0.25068293139338493,
                seed2: 0.4848942293319851,
                constant: 1.0,
            }
        );

        assert_eq!(rng.random(), 0.27138191112317145);
        assert_eq!(rng.random(), 0.19615925149992108);
        assert_eq!(rng.random(), 0.6810678059700876);
        assert_eq!(rng.uint32(), 4_249_594_838);
        assert_eq!(rng.fract53(), 0.3407802057882554);

        assert_eq!(
            rng.export_state(),
            AleaState {
                seed0: 0.9894359013997018,
                seed1: 0.34078020555898547,
                seed2: 0.984706997172907,
                constant: 1424547.0,
            }
        );
    }

    #[test]
    #[allow(clippy::float_cmp)]
    #[allow(clippy::unreadable_literal)]
    fn text_seed_reference() {
        let mut rng = Alea::new("hello");
        assert_eq!(rng.random(), 0.8750656815245748);
        assert_eq!(rng.random(), 0.33650841237977147);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn fractional_seed_hashes_like_its_text() {
        let mut from_number = Alea::new(0.5);
        let mut from_text = Alea::new("0.5");
        for _ in 0..8 {
            assert_eq!(from_number.random(), from_text.random());
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn same_seed_same_sequence() {
        let mut a = Alea::new("determinism");
        let mut b = Alea::new("determinism");
        for _ in 0..1000 {
            assert_eq!(a.random(), b.random());
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn trait_draws_follow_inherent_draws() {
        let mut inherent = Alea::new("trait");
        let mut through_trait = Alea::new("trait");
        let random: &mut dyn Random = &mut through_trait;
        for _ in 0..100 {
            assert_eq!(random.next_f64(), inherent.random());
            assert_eq!(random.next_u32(), inherent.uint32());
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn borrowed_seed_matches_owned_seed() {
        let seed = Seed::from("borrowed");
        let mut borrowed = Alea::new(&seed);
        let mut owned = Alea::new(seed.clone());
        assert_eq!(borrowed.export_state(), owned.export_state());
        assert_eq!(borrowed.random(), owned.random());
    }

    #[test]
    fn draws_stay_in_unit_interval() {
        let mut rng = Alea::new(7);
        for _ in 0..10_000 {
            let v = rng.random();
            assert!((0.0..1.0).contains(&v), "draw {v} escaped [0, 1)");
            let f = rng.fract53();
            assert!((0.0..1.0).contains(&f), "fract53 {f} escaped [0, 1)");
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn import_state_resumes_sequence() {
        let mut rng = Alea::new("checkpoint");
        rng.consume_count(17);
        let snapshot = rng.export_state();
        let expected: Vec<f64> = (0..5).map(|_| rng.random()).collect();

        let mut other = Alea::new("something else");
        other.import_state(snapshot);
        let resumed: Vec<f64> = (0..5).map(|_| other.random()).collect();
        assert_eq!(expected, resumed);
    }

    #[test]
    fn state_serializes_as_plain_record() {
        let rng = Alea::new(12345);
        let json = serde_json::to_string(&rng.export_state()).expect("serialize state");
        assert!(json.contains("\"seed0\""));
        assert!(json.contains("\"constant\":1.0"));

        let back: AleaState = serde_json::from_str(&json).expect("deserialize state");
        assert_eq!(back, rng.export_state());
    }
}
