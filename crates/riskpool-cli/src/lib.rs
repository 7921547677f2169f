//! # Riskpool CLI
//!
//! Loads runner configuration, runs a collective-risk sweep and writes its
//! results.
//!
//! ## Output Files
//!
//! | File | Contents |
//! |---|---|
//! | `reproduction.csv` | average terminal-generation payoff per risk level |
//! | `generation.csv` | per-generation payoff curve for the recorded risk level |
//! | `contribution.csv` | average contribution per player per game |
//! | `fine.csv` | average fine per player per game |
//! | `target.csv` | average resulting pool per game |
//! | `report.json` | all of the above plus parameters (with `--json`) |

pub mod config;
pub mod output;

pub use config::{OutputSettings, RunnerConfig};
