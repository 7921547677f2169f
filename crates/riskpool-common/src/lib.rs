//! # Riskpool Common
//!
//! Shared parameters, errors and collaborators for the riskpool collective-risk
//! simulation.
//!
//! ## Core Types
//!
//! - [`SimulationParams`]: validated, immutable configuration of a sweep
//! - [`SweepReport`]: the five result sequences produced by a sweep
//! - [`RandomSource`]: injected uniform random source
//!
//! ## Game Constants
//!
//! ```text
//! T = E × M / 2
//! ```
//!
//! Where:
//! - T: collective target
//! - E: endowment per game
//! - M: group size

pub mod error;
pub mod random;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ConfigError, Result, RiskPoolError};
pub use random::{derive_seed, entropy_seed, RandomSource, SeededSource};
pub use types::{
    params::{default_risks, SimulationParams},
    report::{RiskStatistics, SweepReport},
};

/// Riskpool version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default population size (N)
pub const DEFAULT_POPULATION_SIZE: usize = 1000;

/// Default games per generation (G)
pub const DEFAULT_GAMES_PER_GENERATION: usize = 10_000;

/// Default group size (M)
pub const DEFAULT_GROUP_SIZE: usize = 6;

/// Default rounds per game (R)
pub const DEFAULT_ROUNDS: usize = 10;

/// Default generations per trial
pub const DEFAULT_GENERATIONS: usize = 1000;

/// Default trials per risk level
pub const DEFAULT_TRIALS: usize = 100;

/// Default endowment per game (E)
pub const DEFAULT_ENDOWMENT: f64 = 1.0;

/// Default risk index recorded for the convergence curve (risk 0.7)
pub const DEFAULT_CURVE_RISK_INDEX: usize = 7;

/// Default number of recorded curve generations
pub const DEFAULT_CURVE_GENERATIONS: usize = 201;

/// Default round index of the mid-game fine check
pub const DEFAULT_FINE_ROUND: usize = 4;

/// Default selection intensity
pub const DEFAULT_BETA: f64 = 1.0;
