//! Runway Season Simulator CLI
//!
//! Simulate and audit seeded seasons, optionally exporting one as JSON.

use clap::Parser;
use runway_core::{SeasonConfig, SeasonResult};
use runway_env::Competitor;
use runway_sim::{default_roster, load_roster, SeasonExport, SeasonRunner, SimError};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Runway deterministic season simulator
#[derive(Parser, Debug)]
#[command(name = "runway-sim")]
#[command(about = "Simulate deterministic competition seasons", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of consecutive seeds to run
    #[arg(long, default_value = "1")]
    seeds: usize,

    /// Number of brackets
    #[arg(short, long, default_value = "3")]
    brackets: usize,

    /// Competitors per bracket
    #[arg(long, default_value = "6")]
    size: usize,

    /// Roster file (JSON array or one name per line); built-in cast if omitted
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// Run brackets in parallel on independent streams
    #[arg(short, long)]
    partitioned: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,

    /// Export the first seed's season to a JSON file
    #[arg(long)]
    export: Option<String>,
}

fn log_season(season: &SeasonResult) {
    for bracket in &season.brackets {
        let table: Vec<String> = bracket
            .standings
            .iter()
            .map(|s| format!("{} ({})", s.competitor, s.points))
            .collect();
        info!("Bracket {}: {}", bracket.bracket, table.join(", "));
    }

    let names = |list: &[Competitor]| {
        list.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
    };
    info!("Top pool:   {}", names(&season.top_pool));
    info!("Eliminated: {}", names(&season.eliminated));
    info!("Finalists:  {}", names(&season.finalists));

    for round in &season.finale {
        let bouts: Vec<String> = round
            .pairings
            .iter()
            .map(|p| match &p.second {
                Some(second) => format!("{} vs {} -> {}", p.first, second, p.winner),
                None => format!("{} (bye)", p.first),
            })
            .collect();
        info!("Finale round {}: {}", round.round, bouts.join(" | "));
    }

    info!("👑 Champion: {}", season.champion);
}

fn export_season(
    runner: &SeasonRunner,
    seed: u64,
    partitioned: bool,
    path: &str,
) -> Result<bool, SimError> {
    let outcome = runner.run_one(seed)?;
    let passed = outcome.passed();

    SeasonExport::new(seed, partitioned, outcome.audit, outcome.season).write_to_file(path)?;
    info!("Exported season (seed={}) to {}", seed, path);
    Ok(passed)
}

fn run(args: &Args) -> Result<bool, SimError> {
    let roster = match &args.roster {
        Some(path) => load_roster(path)?,
        None => default_roster(),
    };

    let config = SeasonConfig::default()
        .with_bracket_count(args.brackets)
        .with_bracket_size(args.size);

    // Determine base seed
    let base_seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    } else {
        args.seed
    };

    let runner = SeasonRunner::new(base_seed, roster)
        .with_config(config)
        .with_seeds(args.seeds)
        .partitioned(args.partitioned);

    if let Some(path) = &args.export {
        return export_season(&runner, base_seed, args.partitioned, path);
    }

    if args.seeds == 1 && !args.json {
        let outcome = runner.run_one(base_seed)?;
        log_season(&outcome.season);
        for violation in &outcome.audit.violations {
            error!("  - {}", violation);
        }
        return Ok(outcome.passed());
    }

    let summary = runner.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        info!("");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        for entry in summary.championships.iter().take(10) {
            info!("{:>4} titles  {}", entry.titles, entry.competitor);
        }

        if summary.failures.is_empty() {
            info!("✅ All {} seasons passed audit!", summary.runs);
        } else {
            error!(
                "❌ {}/{} seasons failed audit!",
                summary.failures.len(),
                summary.runs
            );
            for failure in &summary.failures {
                error!(
                    "  - seed={}: {} violations",
                    failure.seed,
                    failure.violations.len()
                );
            }
        }
    }

    Ok(summary.failures.is_empty())
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    if !args.json {
        info!("Runway Season Simulator v0.1.0");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
