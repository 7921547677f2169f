//! Riskpool sweep runner
//!
//! Collective-risk public-goods game with fitness-proportional reproduction

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use riskpool_arena::Sweep;
use riskpool_cli::{output, RunnerConfig};
use riskpool_common::{entropy_seed, VERSION};

/// Command-line overrides. Anything left unset keeps its environment or
/// default value.
#[derive(Parser, Debug)]
#[command(
    name = "riskpool",
    version,
    about = "Sweep risk levels of a collective-risk public-goods game under evolutionary dynamics"
)]
struct Cli {
    /// Agents per generation (N)
    #[arg(long)]
    population: Option<usize>,

    /// Games per generation (G)
    #[arg(long)]
    games: Option<usize>,

    /// Players per game (M)
    #[arg(long)]
    group_size: Option<usize>,

    /// Rounds per game (R)
    #[arg(long)]
    rounds: Option<usize>,

    /// Generations per trial
    #[arg(long)]
    generations: Option<usize>,

    /// Trials per risk level
    #[arg(long)]
    trials: Option<usize>,

    /// Endowment per game (E)
    #[arg(long)]
    endowment: Option<f64>,

    /// Comma-separated risk levels, e.g. 0,0.5,1
    #[arg(long, value_delimiter = ',')]
    risks: Option<Vec<f64>>,

    /// Risk index whose per-generation payoff curve is recorded
    #[arg(long)]
    curve_risk_index: Option<usize>,

    /// Number of leading generations recorded in the curve
    #[arg(long)]
    curve_generations: Option<usize>,

    /// Round index of the mid-game fine check
    #[arg(long)]
    fine_round: Option<usize>,

    /// Selection intensity β
    #[arg(long)]
    beta: Option<f64>,

    /// Master seed. Omit for a fresh seed from OS entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Directory receiving the result files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Also write report.json
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(self, config: &mut RunnerConfig) {
        let sim = &mut config.simulation;
        override_with(&mut sim.population_size, self.population);
        override_with(&mut sim.games_per_generation, self.games);
        override_with(&mut sim.group_size, self.group_size);
        override_with(&mut sim.rounds, self.rounds);
        override_with(&mut sim.generations, self.generations);
        override_with(&mut sim.trials, self.trials);
        override_with(&mut sim.endowment, self.endowment);
        override_with(&mut sim.risks, self.risks);
        override_with(&mut sim.curve_risk_index, self.curve_risk_index);
        override_with(&mut sim.curve_generations, self.curve_generations);
        override_with(&mut sim.fine_round, self.fine_round);
        override_with(&mut sim.beta, self.beta);

        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        override_with(&mut config.output.dir, self.output_dir);
        config.output.json |= self.json;
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting riskpool v{}", VERSION);

    // Load configuration
    let mut config = RunnerConfig::load()?;
    Cli::parse().apply(&mut config);
    info!("Loaded configuration: {:?}", config);

    let seed = config.seed.unwrap_or_else(entropy_seed);
    let mut sweep = Sweep::new(config.simulation.clone(), seed)?;
    if let Some(threads) = config.threads {
        sweep = sweep.with_threads(threads);
    }

    info!(seed, "Running sweep");
    let started = Instant::now();
    let report = sweep.run()?;
    info!(
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Sweep finished"
    );

    for stats in report.iter() {
        info!("{}", stats);
    }

    let written = output::write_csv(&report, &config.output.dir)?;
    info!(files = written.len(), dir = %config.output.dir.display(), "Wrote CSV results");

    if config.output.json {
        let path = output::write_json(
            &report,
            &config.simulation,
            &config.output.dir,
            chrono::Utc::now(),
        )?;
        info!(path = %path.display(), "Wrote JSON report");
    }

    Ok(())
}
