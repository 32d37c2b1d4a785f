//! Uniform random draws for procedural generation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Produces uniform scalars in `[0, 1)`.
///
/// Every [`rand::Rng`] is a `RandomSource`, so tests pass a seeded
/// [`ChaCha8Rng`] and production passes one seeded from OS entropy.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// Uniform draw in `[low, high)`.
    fn next_range(&mut self, low: f32, high: f32) -> f32 {
        low + self.next_unit() * (high - low)
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// A ChaCha8 generator: deterministic for `Some(seed)`, seeded from OS
/// entropy for `None`.
pub fn source_from_seed(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    }
}
