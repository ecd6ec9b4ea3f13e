//! Production implementation of RandomSource using OS entropy.

use crate::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Production randomness backed by an OS-seeded `StdRng`.
///
/// This is the default source when a caller does not inject one. Runs using
/// it are not reproducible; use `ReplayRng` or a seeded source for that.
pub struct PlatformRng {
    inner: StdRng,
}

impl PlatformRng {
    /// Creates a new PlatformRng seeded from the operating system.
    pub fn new() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }
}

impl Default for PlatformRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for PlatformRng {
    fn next_f64(&mut self) -> f64 {
        // Standard distribution for f64 is [0, 1)
        self.inner.gen::<f64>()
    }
}
