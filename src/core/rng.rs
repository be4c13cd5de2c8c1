//! Deterministic random number generation.
//!
//! Uses ChaCha8 behind a small facade so a seeded session replays
//! identically: the same seed produces the same rolls and the same
//! random target picks.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::dice::DiceExpr;

/// Seeded RNG for dice and target selection.
#[derive(Clone, Debug)]
pub struct EngineRng {
    inner: ChaCha8Rng,
}

impl EngineRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a new RNG seeded from the OS.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Roll a d20.
    pub fn d20(&mut self) -> i64 {
        self.inner.gen_range(1..=20)
    }

    /// Roll a d6.
    pub fn d6(&mut self) -> i64 {
        self.inner.gen_range(1..=6)
    }

    /// Roll a parsed dice expression.
    pub fn roll(&mut self, dice: &DiceExpr) -> i64 {
        dice.roll(&mut self.inner)
    }

    /// Shuffle a slice in place (Fisher–Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Move `amount` uniformly chosen elements to the front of `slice`
    /// and return them. `amount` larger than the slice yields the whole
    /// slice, shuffled.
    pub fn pick<'a, T>(&mut self, slice: &'a mut [T], amount: usize) -> &'a mut [T] {
        let (picked, _) = slice.partial_shuffle(&mut self.inner, amount);
        picked
    }
}

impl Default for EngineRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
