//! Seeded random source for reproducible simulation runs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use runway_env::RandomSource;

/// Random source backed by a seeded ChaCha8 stream.
///
/// Two sources built from the same seed produce the same draws, which makes a
/// season reproducible from its seed number alone.
#[derive(Debug, Clone)]
pub struct SeededRng {
    /// Seed this stream was built from
    seed: u64,

    rng: ChaCha8Rng,
}

impl SeededRng {
    /// Creates a new stream from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}
