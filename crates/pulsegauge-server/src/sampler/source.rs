use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform integer source for the sampler.
///
/// Kept behind a trait so tests can script the exact values a round draws.
pub trait RandomSource: Send + 'static {
    /// Uniform value in `[0, upper)`. `upper` is always > 0.
    fn next_below(&mut self, upper: u32) -> u32;
}

/// Entropy-seeded `StdRng`.
pub struct ThreadRandom {
    rng: StdRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn next_below(&mut self, upper: u32) -> u32 {
        self.rng.gen_range(0..upper)
    }
}
