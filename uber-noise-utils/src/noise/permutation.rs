use std::ops::Index;

use crate::random::Random;

/// Shuffled lattice hash shared by the simplex kernels.
///
/// The first 256 entries are a permutation of `0..=255`; the second half
/// mirrors the first so lookups of the form `perm[a + perm[b]]` never need
/// wrapping.
#[derive(Clone)]
pub struct PermutationTable {
    p: [u8; Self::LEN],
}

impl PermutationTable {
    /// Number of entries, including the mirrored half.
    pub const LEN: usize = 512;

    /// Shuffles a fresh table with draws from `random`.
    ///
    /// Consumes exactly 255 draws: the last slot has nothing left to swap with.
    pub fn new<R: Random + ?Sized>(random: &mut R) -> Self {
        let mut p = [0u8; Self::LEN];

        for (i, val) in p.iter_mut().enumerate().take(256) {
            *val = i as u8;
        }

        for i in 0..255 {
            let r = i + (random.next_f64() * (256 - i) as f64) as usize;
            p.swap(i, r);
        }

        p.copy_within(0..256, 256);

        Self { p }
    }

    /// The full table as a slice.
    #[must_use]
    pub const fn as_slice(&self) -> &[u8] {
        &self.p
    }

    /// Table entry at `index` widened for use as an offset.
    #[inline]
    #[must_use]
    pub const fn at(&self, index: usize) -> usize {
        self.p[index] as usize
    }
}

impl Index<usize> for PermutationTable {
    type Output = u8;

    #[inline]
    fn index(&self, index: usize) -> &u8 {
        &self.p[index]
    }
}

impl std::fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermutationTable")
            .field("head", &&self.p[..8])
            .finish_non_exhaustive()
    }
}
