//! Seeded random number generation.
//!
//! Every random draw in brushwork goes through a generator handed to the
//! brush at construction, so a seeded brush reproduces a painting exactly.
//! Any `rand::RngCore` works; `Lcg` is the small default.

use rand::{RngCore, SeedableRng};

/// A fast, deterministic pseudo-random number generator.
///
/// Uses a Linear Congruential Generator (LCG) with parameters from
/// Numerical Recipes. Implements `RngCore`, so all of `rand::Rng`
/// (`random`, `random_range`, ...) is available on it.
///
/// # Example
/// ```
/// use brushwork::rng::Lcg;
/// use rand::{Rng, SeedableRng};
///
/// let mut rng = Lcg::seed_from_u64(12345);
/// let value: f64 = rng.random(); // [0, 1)
/// assert!((0.0..1.0).contains(&value));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl RngCore for Lcg {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        // High bits have the longest period
        (self.next_u64() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Lcg {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::seed_from_u64(u64::from_le_bytes(seed))
    }

    /// The same seed will always produce the same sequence of numbers.
    fn seed_from_u64(state: u64) -> Self {
        Self { state: state.wrapping_add(1) }
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::seed_from_u64(0)
    }
}
