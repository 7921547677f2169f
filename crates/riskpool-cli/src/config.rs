//! Runner configuration
//!
//! Defaults, then `.env`, then `RISKPOOL_*` environment variables. Command-line
//! flags are applied on top by the binary.

use std::path::PathBuf;
use std::str::FromStr;

use riskpool_common::{ConfigError, SimulationParams};
use serde::{Deserialize, Serialize};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "RISKPOOL_";

/// Runner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Simulation parameters
    pub simulation: SimulationParams,
    /// Output settings
    pub output: OutputSettings,
    /// Master seed; a fresh one is drawn from OS entropy when absent
    pub seed: Option<u64>,
    /// Worker threads; the global rayon pool is used when absent
    pub threads: Option<usize>,
}

/// Where and how results are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Directory receiving the CSV (and JSON) files
    pub dir: PathBuf,
    /// Also write `report.json`
    pub json: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            json: false,
        }
    }
}

impl RunnerConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        let env = Env { lookup: &lookup };
        let sim = &mut cfg.simulation;

        env.set("POPULATION", &mut sim.population_size)?;
        env.set("GAMES", &mut sim.games_per_generation)?;
        env.set("GROUP_SIZE", &mut sim.group_size)?;
        env.set("ROUNDS", &mut sim.rounds)?;
        env.set("GENERATIONS", &mut sim.generations)?;
        env.set("TRIALS", &mut sim.trials)?;
        env.set("ENDOWMENT", &mut sim.endowment)?;
        env.set("CURVE_RISK_INDEX", &mut sim.curve_risk_index)?;
        env.set("CURVE_GENERATIONS", &mut sim.curve_generations)?;
        env.set("FINE_ROUND", &mut sim.fine_round)?;
        env.set("BETA", &mut sim.beta)?;

        if let Some(raw) = env.get("RISKS") {
            sim.risks = parse_risks(&raw).map_err(|_| ConfigError::Parse {
                key: format!("{ENV_PREFIX}RISKS"),
                value: raw.clone(),
            })?;
        }

        cfg.seed = env.parse("SEED")?;
        cfg.threads = env.parse("THREADS")?;

        if let Some(dir) = env.get("OUTPUT_DIR") {
            cfg.output.dir = PathBuf::from(dir);
        }
        if let Some(json) = env.parse::<bool>("JSON")? {
            cfg.output.json = json;
        }

        Ok(cfg)
    }
}

/// Parse a comma-separated list of risk levels
pub fn parse_risks(raw: &str) -> Result<Vec<f64>, std::num::ParseFloatError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(f64::from_str)
        .collect()
}

struct Env<'a, F> {
    lookup: &'a F,
}

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(&format!("{ENV_PREFIX}{name}"))
    }

    fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, ConfigError> {
        match self.get(name) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::Parse {
                    key: format!("{ENV_PREFIX}{name}"),
                    value: raw,
                }),
        }
    }

    fn set<T: FromStr>(&self, name: &str, slot: &mut T) -> Result<(), ConfigError> {
        if let Some(value) = self.parse(name)? {
            *slot = value;
        }
        Ok(())
    }
}
