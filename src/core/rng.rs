//! Deterministic random number generation.
//!
//! Every random decision the engine makes (library shuffles, "at random"
//! choices, random amounts, seeded AI agents) draws from a `GameRng` so a
//! game replays identically from its seed.
//!
//! ```
//! use ccg_choice::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut agent_rng = rng.fork();
//!
//! let mut again = GameRng::new(42);
//! let mut agent_again = again.fork();
//! assert_eq!(agent_rng.gen_range_usize(0..100), agent_again.gen_range_usize(0..100));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork an independent, deterministic stream.
    ///
    /// Each fork of the same parent gets a different seed; two parents with
    /// the same seed produce the same sequence of forks.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in `0..=max`.
    pub fn gen_inclusive(&mut self, max: usize) -> usize {
        self.inner.gen_range(0..=max)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Pick `amount` elements uniformly without replacement.
    ///
    /// Returns the whole slice (in random order) when `amount >= len`.
    pub fn sample<T: Copy>(&mut self, slice: &[T], amount: usize) -> Vec<T> {
        slice.choose_multiple(&mut self.inner, amount).copied().collect()
    }
}
