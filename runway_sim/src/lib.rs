//! Runway Simulation Harness
//!
//! Drives `runway_core` seasons from seed numbers:
//! - **Seeded streams**: every season is reproducible from one 64-bit seed
//! - **Partitioned runs**: brackets in parallel, one independent stream each
//! - **Audit**: every run is checked against the pipeline invariants
//! - **Export**: finished seasons as JSON documents
//!
//! # Usage
//!
//! ```ignore
//! use runway_sim::{default_roster, SeasonRunner};
//!
//! let summary = SeasonRunner::new(42, default_roster())
//!     .with_seeds(100)
//!     .run()?;
//! assert!(summary.failures.is_empty());
//! ```

mod error;
mod exporter;
mod roster;
mod runner;
mod seeded;
mod streams;

pub use error::SimError;
pub use exporter::{run_id_from_seed, SeasonExport};
pub use roster::{default_roster, load_roster, parse_roster, DEFAULT_ROSTER};
pub use runner::{BatchSummary, Championships, FailedRun, RunOutcome, SeasonRunner};
pub use seeded::SeededRng;
pub use streams::{simulate_partitioned, StreamBank};
