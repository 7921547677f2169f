//! SimulationParams - immutable configuration of one sweep
//!
//! Every field is checked by [`SimulationParams::validate`] before any game is
//! played, so the engine can treat a violated contract as a defect rather than
//! a runtime condition.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters of a collective-risk sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Agents per generation (N)
    pub population_size: usize,
    /// Games played per generation (G)
    pub games_per_generation: usize,
    /// Players sampled into each game (M)
    pub group_size: usize,
    /// Rounds per game (R)
    pub rounds: usize,
    /// Generations per trial
    pub generations: usize,
    /// Independent trials per risk level
    pub trials: usize,
    /// Endowment handed to each player on game entry (E)
    pub endowment: f64,
    /// Swept risk levels, each in [0, 1]
    pub risks: Vec<f64>,
    /// Index into `risks` whose per-generation payoff curve is recorded
    pub curve_risk_index: usize,
    /// Number of leading generations recorded in the payoff curve
    pub curve_generations: usize,
    /// Round index at which the mid-game fine is checked.
    /// Games with `rounds <= fine_round` never reach it.
    pub fine_round: usize,
    /// Selection intensity in `exp(beta * payoff)`
    pub beta: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            population_size: crate::DEFAULT_POPULATION_SIZE,
            games_per_generation: crate::DEFAULT_GAMES_PER_GENERATION,
            group_size: crate::DEFAULT_GROUP_SIZE,
            rounds: crate::DEFAULT_ROUNDS,
            generations: crate::DEFAULT_GENERATIONS,
            trials: crate::DEFAULT_TRIALS,
            endowment: crate::DEFAULT_ENDOWMENT,
            risks: default_risks(),
            curve_risk_index: crate::DEFAULT_CURVE_RISK_INDEX,
            curve_generations: crate::DEFAULT_CURVE_GENERATIONS,
            fine_round: crate::DEFAULT_FINE_ROUND,
            beta: crate::DEFAULT_BETA,
        }
    }
}

/// Risk levels 0.0, 0.1, ..., 1.0
pub fn default_risks() -> Vec<f64> {
    (0..=10).map(|i| i as f64 / 10.0).collect()
}

impl SimulationParams {
    /// Collective target T = E * M / 2
    #[inline]
    pub fn target(&self) -> f64 {
        self.endowment * self.group_size as f64 / 2.0
    }

    /// Per-round contribution amount E / R
    #[inline]
    pub fn contribution_unit(&self) -> f64 {
        self.endowment / self.rounds as f64
    }

    /// Whether the mid-game fine can ever fire with these parameters
    pub fn fine_reachable(&self) -> bool {
        self.fine_round < self.rounds
    }

    /// Number of curve points a sweep will produce
    pub fn curve_len(&self) -> usize {
        self.curve_generations.min(self.generations)
    }

    /// Reject parameter combinations the engine cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("population_size", self.population_size),
            ("group_size", self.group_size),
            ("games_per_generation", self.games_per_generation),
            ("generations", self.generations),
            ("trials", self.trials),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroCount { field });
            }
        }

        if self.rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }

        if self.group_size >= self.population_size {
            return Err(ConfigError::GroupTooLarge {
                group: self.group_size,
                population: self.population_size,
            });
        }

        if !(self.endowment.is_finite() && self.endowment > 0.0) {
            return Err(ConfigError::InvalidEndowment(self.endowment));
        }

        if self.risks.is_empty() {
            return Err(ConfigError::EmptyRiskSweep);
        }

        if let Some((index, &value)) = self
            .risks
            .iter()
            .enumerate()
            .find(|(_, r)| !(0.0..=1.0).contains(*r))
        {
            return Err(ConfigError::RiskOutOfRange { index, value });
        }

        if self.curve_risk_index >= self.risks.len() {
            return Err(ConfigError::CurveIndexOutOfRange {
                index: self.curve_risk_index,
                len: self.risks.len(),
            });
        }

        if !(self.beta.is_finite() && (self.beta * self.endowment).is_finite()) {
            return Err(ConfigError::InvalidBeta(self.beta));
        }

        Ok(())
    }
}
