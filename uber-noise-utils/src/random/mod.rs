//! Seeded pseudo-random number generation.
//!
//! - [`Random`] - The draw interface consumed by permutation tables and kernels
//! - [`alea::Alea`] - Three-term multiply-with-carry generator seeded from a string
//! - [`Seed`] - A generator seed, kept in its textual form

pub mod alea;
mod seed;

pub use seed::{Seed, format_seed_number};

/// A source of uniformly distributed pseudo-random values.
pub trait Random {
    /// Returns the next value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns the next value in `[0, 2^32)`.
    fn next_u32(&mut self) -> u32;

    /// Draws and discards `count` values.
    fn consume_count(&mut self, count: usize) {
        for _ in 0..count {
            self.next_f64();
        }
    }
}
