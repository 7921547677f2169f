//! # Darwinian
//!
//! Agents, populations and fitness-proportional reproduction for riskpool.
//!
//! ## Fitness Formula
//!
//! ```text
//! f = exp(β × π - max(β × π))
//! ```
//!
//! Where:
//! - f: Fitness
//! - β: Selection intensity (1.0 by default)
//! - π: Average payoff per game played in the generation
//!
//! The shift by the population maximum cancels in the selection probabilities.
//!
//! ## Reproduction
//!
//! The next generation is N independent roulette-wheel draws with replacement.
//! Offspring copy the parent's round strategies and start with fresh state.

pub mod agent;
pub mod fitness;
pub mod population;
pub mod selection;

pub use agent::{Agent, RoundStrategy};
pub use fitness::FitnessCalculator;
pub use population::Population;
pub use selection::{reproduce, RouletteWheel};

/// Darwinian configuration
#[derive(Debug, Clone)]
pub struct DarwinianConfig {
    /// Selection intensity β
    pub beta: f64,
    /// Endowment given to offspring
    pub endowment: f64,
}

impl Default for DarwinianConfig {
    fn default() -> Self {
        Self {
            beta: riskpool_common::DEFAULT_BETA,
            endowment: riskpool_common::DEFAULT_ENDOWMENT,
        }
    }
}

impl From<&riskpool_common::SimulationParams> for DarwinianConfig {
    fn from(params: &riskpool_common::SimulationParams) -> Self {
        Self {
            beta: params.beta,
            endowment: params.endowment,
        }
    }
}
