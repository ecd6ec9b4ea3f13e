//! Replayable randomness for deterministic runs.

use crate::{RandomSource, SeasonError};

/// Plays back a fixed, pre-recorded sequence of draws.
///
/// When the sequence runs out it wraps to the start, so a short pattern can
/// drive a whole season. `consumed()` reports how many draws were taken.
#[derive(Debug, Clone)]
pub struct ReplayRng {
    draws: Vec<f64>,
    cursor: usize,
    consumed: u64,
}

impl ReplayRng {
    /// Creates a replay source. Every draw must lie in `[0, 1)`.
    pub fn new(draws: Vec<f64>) -> Result<Self, SeasonError> {
        if draws.is_empty() {
            return Err(SeasonError::InvalidReplay("sequence is empty".into()));
        }
        if let Some((pos, v)) = draws
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..1.0).contains(*v))
        {
            return Err(SeasonError::InvalidReplay(format!(
                "draw #{} = {} is outside [0, 1)",
                pos, v
            )));
        }

        Ok(Self {
            draws,
            cursor: 0,
            consumed: 0,
        })
    }

    /// Total draws handed out so far (including wrapped ones).
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Length of the underlying sequence.
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// Always false; construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

impl RandomSource for ReplayRng {
    fn next_f64(&mut self) -> f64 {
        let v = self.draws[self.cursor];
        self.cursor = (self.cursor + 1) % self.draws.len();
        self.consumed += 1;
        v
    }
}

/// Wraps a source and keeps every draw it hands out.
///
/// The recorded tape feeds straight into `ReplayRng` to reproduce a run.
pub struct RecordingRng<R> {
    inner: R,
    tape: Vec<f64>,
}

impl<R: RandomSource> RecordingRng<R> {
    /// Starts recording draws from `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            tape: Vec::new(),
        }
    }

    /// Draws recorded so far, in order.
    pub fn tape(&self) -> &[f64] {
        &self.tape
    }

    /// Consumes the recorder and returns the tape.
    pub fn into_tape(self) -> Vec<f64> {
        self.tape
    }

    /// Builds a replay source from the recorded tape.
    pub fn replay(&self) -> Result<ReplayRng, SeasonError> {
        ReplayRng::new(self.tape.clone())
    }
}

impl<R: RandomSource> RandomSource for RecordingRng<R> {
    fn next_f64(&mut self) -> f64 {
        let v = self.inner.next_f64();
        self.tape.push(v);
        v
    }

    fn seed(&self) -> Option<u64> {
        self.inner.seed()
    }
}
