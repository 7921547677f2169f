//! Agent - one individual's strategy and running state
//!
//! An agent carries one [`RoundStrategy`] per game round. Strategies are fixed
//! at birth; only the running state (endowment, payoff, fitness, count)
//! changes during a generation.

use riskpool_common::{RandomSource, SimulationParams};
use serde::{Deserialize, Serialize};

use crate::fitness::FitnessCalculator;

/// Contribution rule for a single round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundStrategy {
    /// Pool threshold, in [0, T)
    pub tau: f64,
    /// Contribution when the pool is at or above `tau`
    pub j: f64,
    /// Contribution when the pool is below `tau`
    pub k: f64,
}

impl RoundStrategy {
    pub fn new(tau: f64, j: f64, k: f64) -> Self {
        Self { tau, j, k }
    }

    /// Draw tau uniformly in [0, target), then j and k each as `unit` or 0
    /// with probability ½.
    pub fn random(target: f64, unit: f64, rng: &mut impl RandomSource) -> Self {
        let tau = rng.next_f64() * target;
        let j = if rng.next_index(2) == 1 { unit } else { 0.0 };
        let k = if rng.next_index(2) == 1 { unit } else { 0.0 };
        Self { tau, j, k }
    }

    /// Amount this rule gives given the current pool and what the agent has left
    #[inline]
    pub fn contribution(&self, pool: f64, endowment: f64) -> f64 {
        let wanted = if pool >= self.tau { self.j } else { self.k };
        wanted.min(endowment)
    }
}

/// One member of a population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    endowment: f64,
    strategies: Vec<RoundStrategy>,
    payoff: f64,
    fitness: f64,
    count: u32,
}

impl Agent {
    /// Agent with the given strategies and fresh running state
    pub fn with_strategies(strategies: Vec<RoundStrategy>, endowment: f64) -> Self {
        Self {
            endowment: endowment.max(0.0),
            strategies,
            payoff: 0.0,
            fitness: 0.0,
            count: 0,
        }
    }

    /// Agent with one random strategy per round
    pub fn random(params: &SimulationParams, rng: &mut impl RandomSource) -> Self {
        let target = params.target();
        let unit = params.contribution_unit();
        let strategies = (0..params.rounds)
            .map(|_| RoundStrategy::random(target, unit, rng))
            .collect();
        Self::with_strategies(strategies, params.endowment)
    }

    /// Child carrying a deep copy of this agent's strategies
    pub fn offspring(&self, endowment: f64) -> Self {
        Self::with_strategies(self.strategies.clone(), endowment)
    }

    pub fn strategies(&self) -> &[RoundStrategy] {
        &self.strategies
    }

    pub fn strategy(&self, round: usize) -> &RoundStrategy {
        &self.strategies[round]
    }

    pub fn endowment(&self) -> f64 {
        self.endowment
    }

    pub fn payoff(&self) -> f64 {
        self.payoff
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Reset the endowment for a new game and record participation
    pub fn enter_game(&mut self, endowment: f64) {
        self.endowment = endowment.max(0.0);
        self.count += 1;
    }

    /// Apply this round's rule and return the amount given
    pub fn contribute(&mut self, round: usize, pool: f64) -> f64 {
        let amount = self.strategies[round].contribution(pool, self.endowment);
        self.withdraw(amount);
        amount
    }

    /// Pay `rate` of the remaining endowment, if any is left
    pub fn pay_fine(&mut self, rate: f64) -> f64 {
        if self.endowment <= 0.0 {
            return 0.0;
        }
        let fine = rate * self.endowment;
        self.withdraw(fine);
        fine
    }

    /// Catastrophic loss: lose everything left in this game
    pub fn forfeit(&mut self) {
        self.endowment = 0.0;
    }

    /// Credit the remaining endowment to the running payoff
    pub fn settle(&mut self) {
        self.payoff += self.endowment;
    }

    /// Turn the summed payoff into a per-game average.
    /// An agent that never played averages exactly 0.
    pub fn average_payoff(&mut self) {
        self.payoff = if self.count == 0 {
            0.0
        } else {
            self.payoff / self.count as f64
        };
    }

    /// Compute and store fitness from the current payoff, relative to the
    /// population's largest `β × π` (`peak`)
    pub fn assess_fitness(&mut self, beta: f64, peak: f64) -> f64 {
        self.fitness = FitnessCalculator::calculate(beta, self.payoff, peak);
        self.fitness
    }

    fn withdraw(&mut self, amount: f64) {
        self.endowment = (self.endowment - amount).max(0.0);
    }
}
