//! Runway Core - Deterministic Season Pipeline
//!
//! Simulates one season of a staged elimination competition:
//! 1. **Brackets**: round-robin seeding into equal groups
//! 2. **Episodes**: challenge winners, lip sync, peer awards (three per bracket)
//! 3. **Standings**: points descending, ties by name
//! 4. **Semifinal**: two random cuts from the combined top pool
//! 5. **Finale**: shuffled single elimination with byes
//!
//! Every random decision goes through the caller's `RandomSource`, so a
//! season is a pure function of its entrants and its draw sequence.

pub mod audit;
pub mod bracket;
pub mod config;
pub mod episode;
pub mod finale;
pub mod ledger;
pub mod season;
pub mod semifinal;
pub mod stage;

// Re-export key types for convenience
pub use audit::{audit_season, AuditReport, Violation};
pub use bracket::{form_brackets, Bracket};
pub use config::SeasonConfig;
pub use episode::{simulate_episode, EpisodeDetail, EpisodeRecord, PeerAward};
pub use finale::{run_finale, FinalePairing, FinaleResult, FinaleRound};
pub use ledger::PointLedger;
pub use season::{
    conclude_season, select_top_pool, simulate_season, simulate_season_default, SeasonMetadata,
    SeasonResult,
};
pub use semifinal::{eliminate_semifinalists, SemifinalOutcome};
pub use stage::{compute_standings, run_bracket, BracketResult, Standing};
