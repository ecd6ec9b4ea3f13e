//! The randomness contract consumed by the season pipeline.

/// A source of uniform draws in `[0, 1)`.
///
/// This is the only way the pipeline obtains entropy. Implementations are
/// called strictly sequentially; the pipeline never shares one across threads.
///
/// # Implementations
///
/// - **Production**: `PlatformRng` - OS-seeded `StdRng`
/// - **Replay**: `ReplayRng` - a fixed, pre-recorded sequence
/// - **Any closure**: `FnMut() -> f64`
pub trait RandomSource {
    /// Returns the next draw `v` with `0.0 <= v < 1.0`.
    fn next_f64(&mut self) -> f64;

    /// Returns the seed behind this source, if it has one (for logging).
    fn seed(&self) -> Option<u64> {
        None
    }
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// Draws a uniform index in `0..len`.
///
/// Computed as `floor(v * len)`, clamped to the last slot so a source that
/// returns exactly `1.0` cannot index out of bounds.
///
/// # Panics
/// Panics if `len == 0`.
pub fn draw_index<R: RandomSource + ?Sized>(rng: &mut R, len: usize) -> usize {
    assert!(len > 0, "cannot draw an index from an empty range");
    let scaled = (rng.next_f64() * len as f64).floor() as usize;
    scaled.min(len - 1)
}
