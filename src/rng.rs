//! Random helpers used throughout generation.
//!
//! Wraps the `rand` crate's `SmallRng` (xoshiro256++), which is fast and
//! works under WASM. Entropy is sourced from `getrandom` (browser crypto API
//! on wasm32, the OS elsewhere).

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

/// The one RNG stream a generator draws from. A fixed seed replays the same
/// board.
pub struct BoardRng {
    inner: SmallRng,
}

impl BoardRng {
    /// Seeded from system entropy.
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform index in `0..max`.
    #[inline]
    pub fn gen_range(&mut self, max: usize) -> usize {
        self.inner.random_range(0..max)
    }

    /// Generate a random integer in [min, max], both ends included.
    pub fn random_int(&mut self, min: usize, max: usize) -> usize {
        self.inner.random_range(min..=max)
    }

    /// Pick a uniformly random element, `None` if the slice is empty.
    pub fn pick<'a, T>(&mut self, values: &'a [T]) -> Option<&'a T> {
        values.choose(&mut self.inner)
    }

    /// Shuffle in place (Fisher–Yates).
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.inner);
    }

    /// Return a shuffled copy of `values`, leaving the input untouched.
    pub fn shuffled_copy<T: Clone>(&mut self, values: &[T]) -> Vec<T> {
        let mut copy = values.to_vec();
        self.shuffle(&mut copy);
        copy
    }

    /// Pick one value with probability proportional to its weight.
    ///
    /// Returns `None` when there is nothing to pick from or every weight is zero.
    pub fn weighted_choice<'a, T>(&mut self, options: &'a [(T, u32)]) -> Option<&'a T> {
        let index = WeightedIndex::new(options.iter().map(|(_, weight)| *weight)).ok()?;
        options.get(index.sample(&mut self.inner)).map(|(value, _)| value)
    }
}

impl Default for BoardRng {
    fn default() -> Self {
        Self::new()
    }
}
