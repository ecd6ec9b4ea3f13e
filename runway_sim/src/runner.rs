//! Season runner - executes and audits seeded seasons.

use crate::error::SimError;
use crate::seeded::SeededRng;
use crate::streams::{simulate_partitioned, StreamBank};

use runway_core::{
    audit_season, simulate_season, AuditReport, SeasonConfig, SeasonResult, Violation,
};
use runway_env::{Clock, Competitor, FixedClock, SystemClock};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// One audited season.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Seed used
    pub seed: u64,

    /// Audit of the season
    pub audit: AuditReport,

    pub season: SeasonResult,
}

impl RunOutcome {
    /// Whether the season passed its audit.
    pub fn passed(&self) -> bool {
        self.audit.passed()
    }
}

/// A season that failed its audit.
#[derive(Debug, Clone, Serialize)]
pub struct FailedRun {
    pub seed: u64,
    pub violations: Vec<Violation>,
}

/// Championship count for one competitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Championships {
    pub competitor: Competitor,
    pub titles: usize,
}

/// Summary of a batch of seasons.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Seeds run
    pub runs: usize,

    /// Seasons that failed their audit
    pub failures: Vec<FailedRun>,

    /// Titles per competitor, most titles first, ties by name
    pub championships: Vec<Championships>,
}

impl BatchSummary {
    pub fn passed(&self) -> usize {
        self.runs - self.failures.len()
    }
}

/// Runs seasons for consecutive seeds.
pub struct SeasonRunner {
    /// Base seed
    seed: u64,

    /// Entrants, in seeding order
    roster: Vec<Competitor>,

    /// Bracket layout
    config: SeasonConfig,

    /// Number of consecutive seeds to run
    seeds: usize,

    /// Run brackets on independent parallel streams
    partitioned: bool,

    /// Fixed metadata timestamp; system clock when unset
    fixed_time_ms: Option<u64>,
}

impl SeasonRunner {
    /// Creates a runner for one seed over `roster` with the default layout.
    pub fn new(seed: u64, roster: Vec<Competitor>) -> Self {
        Self {
            seed,
            roster,
            config: SeasonConfig::default(),
            seeds: 1,
            partitioned: false,
            fixed_time_ms: None,
        }
    }

    /// Sets the bracket layout.
    pub fn with_config(mut self, config: SeasonConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets how many consecutive seeds to run.
    pub fn with_seeds(mut self, seeds: usize) -> Self {
        self.seeds = seeds;
        self
    }

    /// Runs brackets on independent parallel streams.
    pub fn partitioned(mut self, partitioned: bool) -> Self {
        self.partitioned = partitioned;
        self
    }

    /// Freezes the metadata timestamp.
    pub fn with_fixed_clock(mut self, unix_millis: u64) -> Self {
        self.fixed_time_ms = Some(unix_millis);
        self
    }

    pub fn config(&self) -> &SeasonConfig {
        &self.config
    }

    /// Simulates and audits the season for `seed`.
    pub fn run_one(&self, seed: u64) -> Result<RunOutcome, SimError> {
        let season = match self.fixed_time_ms {
            Some(ms) => self.simulate(seed, &FixedClock::from_unix_millis(ms))?,
            None => self.simulate(seed, &SystemClock)?,
        };

        let report = audit_season(&season, &self.config);
        if report.passed() {
            debug!("seed={} champion={}", seed, season.champion);
        } else {
            warn!(
                "seed={} failed audit with {} violations",
                seed,
                report.violations.len()
            );
        }

        Ok(RunOutcome {
            seed,
            audit: report,
            season,
        })
    }

    fn simulate<C: Clock>(&self, seed: u64, clock: &C) -> Result<SeasonResult, SimError> {
        let season = if self.partitioned {
            simulate_partitioned(&self.roster, &self.config, &StreamBank::new(seed), clock)?
        } else {
            simulate_season(&self.roster, &self.config, &mut SeededRng::new(seed), clock)?
        };
        Ok(season)
    }

    /// Runs every seed and summarizes.
    pub fn run(&self) -> Result<BatchSummary, SimError> {
        info!(
            "Running {} season(s) from seed {} ({} brackets of {}, partitioned={})",
            self.seeds,
            self.seed,
            self.config.bracket_count,
            self.config.bracket_size,
            self.partitioned
        );

        let mut titles: BTreeMap<Competitor, usize> = BTreeMap::new();
        let mut failures = Vec::new();

        for offset in 0..self.seeds {
            let seed = self.seed.wrapping_add(offset as u64);
            let outcome = self.run_one(seed)?;

            *titles.entry(outcome.season.champion.clone()).or_insert(0) += 1;
            if !outcome.passed() {
                failures.push(FailedRun {
                    seed,
                    violations: outcome.audit.violations,
                });
            }
        }

        let mut championships: Vec<Championships> = titles
            .into_iter()
            .map(|(competitor, titles)| Championships { competitor, titles })
            .collect();
        // BTreeMap order already sorts names; stable sort keeps it for ties
        championships.sort_by(|a, b| b.titles.cmp(&a.titles));

        Ok(BatchSummary {
            runs: self.seeds,
            failures,
            championships,
        })
    }
}
