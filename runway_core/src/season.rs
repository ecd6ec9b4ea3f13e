//! Season orchestration: brackets, top pool, semifinal, finale.

use crate::bracket::form_brackets;
use crate::config::{SeasonConfig, ADVANCERS_PER_BRACKET, SEMIFINAL_CUTS};
use crate::episode::EpisodeRecord;
use crate::finale::{run_finale, FinaleRound};
use crate::semifinal::eliminate_semifinalists;
use crate::stage::{run_bracket, BracketResult};
use runway_env::{
    Clock, Competitor, Entrant, PlatformRng, RandomSource, SeasonError, SystemClock,
};
use serde::Serialize;
use tracing::{debug, info};

/// Run metadata. Nothing downstream reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonMetadata {
    /// Generation time, milliseconds since the Unix epoch
    pub generated_at_ms: u64,

    /// Seed of the random source, when it has one
    pub seed: Option<u64>,

    pub config: SeasonConfig,

    pub competitor_count: usize,
}

impl SeasonMetadata {
    /// Stamps metadata for a run of `config` at the clock's current time.
    pub fn new<C: Clock + ?Sized>(config: &SeasonConfig, clock: &C, seed: Option<u64>) -> Self {
        Self {
            generated_at_ms: clock.unix_millis(),
            seed,
            config: *config,
            competitor_count: config.expected_competitors(),
        }
    }
}

/// Complete, immutable history of one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonResult {
    pub metadata: SeasonMetadata,

    /// Bracket results in bracket order
    pub brackets: Vec<BracketResult>,

    /// Every episode, chronologically
    pub episodes: Vec<EpisodeRecord>,

    /// Top places of each bracket, bracket order
    pub top_pool: Vec<Competitor>,

    /// Semifinal cuts, in elimination order
    pub eliminated: Vec<Competitor>,

    pub finalists: Vec<Competitor>,

    pub finale: Vec<FinaleRound>,

    pub champion: Competitor,
}

impl SeasonResult {
    /// Number of competitors entering each finale round.
    pub fn finale_round_sizes(&self) -> Vec<usize> {
        self.finale.iter().map(|r| r.entrants.len()).collect()
    }

    /// All competitors that took part, in bracket order.
    pub fn competitors(&self) -> impl Iterator<Item = &Competitor> + '_ {
        self.brackets.iter().flat_map(|b| b.competitors.iter())
    }
}

/// Simulates a full season.
///
/// The layout and entrant count are checked before the first draw. After
/// that the run cannot fail; the result depends only on the entrant order
/// and the sequence of draws `rng` produces.
pub fn simulate_season<E, R, C>(
    entrants: &[E],
    config: &SeasonConfig,
    rng: &mut R,
    clock: &C,
) -> Result<SeasonResult, SeasonError>
where
    E: Entrant,
    R: RandomSource + ?Sized,
    C: Clock + ?Sized,
{
    let brackets = form_brackets(entrants, config)?;
    let metadata = SeasonMetadata::new(config, clock, rng.seed());

    info!(
        "Simulating season: {} brackets of {} (seed={:?})",
        config.bracket_count, config.bracket_size, metadata.seed
    );

    let mut results = Vec::with_capacity(brackets.len());
    for bracket in &brackets {
        results.push(run_bracket(bracket, rng));
    }

    Ok(conclude_season(metadata, results, rng))
}

/// Simulates a season with the default layout, OS randomness and the system
/// clock.
pub fn simulate_season_default<E: Entrant>(entrants: &[E]) -> Result<SeasonResult, SeasonError> {
    simulate_season(
        entrants,
        &SeasonConfig::default(),
        &mut PlatformRng::new(),
        &SystemClock,
    )
}

/// Top places of every bracket, concatenated in bracket order.
pub fn select_top_pool(brackets: &[BracketResult]) -> Vec<Competitor> {
    brackets
        .iter()
        .flat_map(|b| b.top(ADVANCERS_PER_BRACKET))
        .collect()
}

/// Runs the post-bracket stages on finished bracket results.
///
/// Split out so bracket stages can be produced elsewhere (for example on
/// independent per-bracket streams) and then finished on one stream.
pub fn conclude_season<R: RandomSource + ?Sized>(
    metadata: SeasonMetadata,
    brackets: Vec<BracketResult>,
    rng: &mut R,
) -> SeasonResult {
    let top_pool = select_top_pool(&brackets);
    debug!("Top pool: {:?}", top_pool);

    let semifinal = eliminate_semifinalists(&top_pool, SEMIFINAL_CUTS, rng);
    debug!("Semifinal cuts: {:?}", semifinal.eliminated);

    let finale = run_finale(&semifinal.finalists, rng);
    info!(
        "Champion: {} after {} finale rounds",
        finale.champion,
        finale.rounds.len()
    );

    let episodes = brackets
        .iter()
        .flat_map(|b| b.episodes.iter().cloned())
        .collect();

    SeasonResult {
        metadata,
        brackets,
        episodes,
        top_pool,
        eliminated: semifinal.eliminated,
        finalists: semifinal.finalists,
        finale: finale.rounds,
        champion: finale.champion,
    }
}
