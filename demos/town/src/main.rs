//! town: headless demo of the gridnav vehicle simulator.
//!
//! Generates a 10x10 town, drives a hybrid vehicle and a path-only companion
//! to the last target, then evaluates the policy greedily over a batch of
//! fresh scenarios.  Run logs land in `output/town/`.
//!
//! ```text
//! town [CONFIG.json] [QTABLE.csv]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `town=info,av_sim=info,warn`).

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use av_behavior::{GridOracle, QTable, load_qtable_csv, load_qtable_reader};
use av_core::{RewardConfig, SimConfig};
use av_grid::{AStar, Scenario};
use av_output::{CsvWriter, SimOutputObserver};
use av_sim::{Evaluator, SimBuilder};
use av_vehicle::Mode;

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR: &str = "output/town";

// Observation code = front_left*4 + front*2 + front_right.
// Clear or side-only hazards: keep going.  Hazard dead ahead: swerve away
// from whichever diagonal is also blocked.  Boxed in: wait.
const QTABLE_CSV: &str = "\
code,wait,forward,turn_right,turn_left\n\
0,0.0,1.0,0.0,0.0\n\
1,0.0,1.0,0.0,0.2\n\
2,0.1,0.0,0.6,1.0\n\
3,0.1,0.0,0.0,1.0\n\
4,0.0,1.0,0.2,0.0\n\
5,0.3,1.0,0.0,0.0\n\
6,0.1,0.0,1.0,0.0\n\
7,1.0,0.0,0.0,0.0\n\
";

// ── Configuration file ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TownConfig {
    sim: SimConfig,
    rewards: RewardConfig,
    /// Evaluation episodes after the interactive run.
    episodes: u32,
    /// Hard stop for the interactive run.
    max_ticks: u64,
    /// Identifier written with this run's arrivals.
    run: u32,
    output_dir: PathBuf,
}

impl Default for TownConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig { seed: 42, ..SimConfig::default() },
            rewards: RewardConfig::default(),
            episodes: 200,
            max_ticks: 300,
            run: 0,
            output_dir: PathBuf::from(OUTPUT_DIR),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<TownConfig> {
    let Some(path) = path else {
        return Ok(TownConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config: TownConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    config.sim.validate()?;
    Ok(config)
}

fn load_policy(path: Option<&Path>) -> Result<QTable> {
    let table = match path {
        Some(p) => load_qtable_csv(p).with_context(|| format!("loading {}", p.display()))?,
        None => load_qtable_reader(Cursor::new(QTABLE_CSV))?,
    };
    Ok(table)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("town=info,av_sim=info,warn"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("logging disabled: {e}");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(Path::new))?;
    let policy = load_policy(args.get(1).map(Path::new))?;

    println!("=== town: gridnav vehicle simulator ===");
    println!(
        "Grid: {}x{}  |  Seed: {}  |  Wait threshold: {}",
        config.sim.rows, config.sim.cols, config.sim.seed, config.sim.wait_threshold
    );
    println!();

    // 1. Scenario.
    let scenario = Scenario::generate(&config.sim, config.sim.seed)?;
    println!(
        "Scenario: start {}  targets {:?}  buildings {}  pedestrians {}  debris {}",
        scenario.start,
        scenario.targets.iter().map(ToString::to_string).collect::<Vec<_>>(),
        scenario.buildings.len(),
        scenario.pedestrians.len(),
        scenario.debris.len(),
    );

    // 2. Interactive run: hybrid vehicle plus path-only companion.
    let mut sim = SimBuilder::new(
        config.sim.clone(),
        scenario,
        Arc::new(policy.clone()),
        GridOracle,
        AStar,
    )
    .max_ticks(config.max_ticks)
    .run(config.run)
    .build()?;

    let writer = CsvWriter::new(&config.output_dir)?;
    let mut obs = SimOutputObserver::new(writer);

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    println!();
    println!("Interactive run: {} ticks in {:.3} s", sim.clock.current_tick.0, elapsed.as_secs_f64());
    println!("{:<12} {:<10} {:<10} {:<10}", "Vehicle", "Mode", "Arrived", "Sim secs");
    println!("{}", "-".repeat(44));
    for (v, secs) in sim.vehicles.iter().zip(sim.arrival_secs()) {
        let mode = match v.mode() {
            Mode::Hybrid => "hybrid",
            Mode::PathOnly => "path-only",
        };
        let (arrived, secs) = match secs {
            Some(s) => ("yes", format!("{s:.1}")),
            None => ("no", "-".to_string()),
        };
        println!("{:<12} {:<10} {:<10} {:<10}", v.id().to_string(), mode, arrived, secs);
    }

    if let Some(primary) = sim.vehicles.first() {
        println!();
        println!("Last decisions of {}:", primary.id());
        for entry in primary.diagnostics().iter().rev().take(5) {
            println!("  {entry}");
        }
    }

    // 3. Greedy evaluation over fresh scenarios.
    let t0 = Instant::now();
    let summaries = Evaluator::new(config.sim.clone(), config.rewards.clone(), &policy, AStar)
        .episodes(config.episodes)
        .run_observed(&mut obs)?;
    obs.finish();
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    let n = summaries.len().max(1) as f64;
    let reached = summaries.iter().filter(|s| s.reached_target).count();
    let timeouts = summaries.iter().filter(|s| s.timed_out).count();
    let mean_reward = summaries.iter().map(|s| s.total_reward).sum::<f64>() / n;
    let mean_steps = summaries.iter().map(|s| s.steps as f64).sum::<f64>() / n;

    println!();
    println!("Evaluation: {} episodes in {:.3} s", summaries.len(), elapsed.as_secs_f64());
    println!("  reached target : {reached}");
    println!("  timed out      : {timeouts}");
    println!("  mean reward    : {mean_reward:.2}");
    println!("  mean steps     : {mean_steps:.1}");
    println!();
    println!("Logs written to {}", config.output_dir.display());

    Ok(())
}
