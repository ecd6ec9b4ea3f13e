//! Runway Environment Abstraction Layer
//!
//! This crate provides the seams through which the season pipeline touches
//! anything outside pure computation:
//! - Randomness (`RandomSource::next_f64()`)
//! - Wall-clock time (`Clock::system_time()`), used only for result metadata
//! - Entrant identities (`Competitor`, `Entrant`)
//!
//! # Core Concept: Injected Entropy
//!
//! Nothing in `runway_core` reaches for ambient randomness. Every draw flows
//! through a `RandomSource` passed down from the entry point, so a season is
//! reproducible from its draw sequence alone.
//!
//! # Example
//!
//! ```ignore
//! use runway_env::{RandomSource, ReplayRng};
//!
//! let mut rng = ReplayRng::new(vec![0.1, 0.7, 0.3])?;
//! let v = rng.next_f64();
//! assert!((0.0..1.0).contains(&v));
//! ```

mod clock;
mod error;
mod platform;
mod random;
mod replay;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::SeasonError;
pub use platform::PlatformRng;
pub use random::{draw_index, RandomSource};
pub use replay::{RecordingRng, ReplayRng};
pub use types::{Competitor, Entrant};
