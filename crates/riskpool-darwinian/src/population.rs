//! Population - one generation of agents
//!
//! Agents live in an owned contiguous vector and are addressed by index. Game
//! groups hold distinct indices, so mutating participants one after another
//! through [`Population::agent_mut`] never aliases.

use riskpool_common::{RandomSource, SimulationParams};
use tracing::trace;

use crate::agent::Agent;
use crate::fitness::FitnessCalculator;

/// Fixed-size ordered collection of agents
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    /// Fresh population of `params.population_size` random agents
    pub fn random(params: &SimulationParams, rng: &mut impl RandomSource) -> Self {
        let agents = (0..params.population_size)
            .map(|_| Agent::random(params, rng))
            .collect();
        Self { agents }
    }

    pub fn from_agents(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, index: usize) -> &Agent {
        &self.agents[index]
    }

    pub fn agent_mut(&mut self, index: usize) -> &mut Agent {
        &mut self.agents[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Turn every agent's summed payoff into its per-game average
    pub fn average_payoffs(&mut self) {
        for agent in &mut self.agents {
            agent.average_payoff();
        }
    }

    /// Sum of current payoffs
    pub fn total_payoff(&self) -> f64 {
        self.agents.iter().map(Agent::payoff).sum()
    }

    /// Compute fitness for every agent and return the total.
    ///
    /// The fittest agent always scores 1, so a non-empty population totals at
    /// least 1.
    pub fn assess_fitness(&mut self, beta: f64) -> f64 {
        let peak = FitnessCalculator::peak(beta, self.agents.iter().map(Agent::payoff));
        let total: f64 = self
            .agents
            .iter_mut()
            .map(|agent| agent.assess_fitness(beta, peak))
            .sum();
        trace!(agents = self.agents.len(), peak, total_fitness = total, "Assessed fitness");
        total
    }

    /// Current fitness values in population order
    pub fn fitness(&self) -> Vec<f64> {
        self.agents.iter().map(Agent::fitness).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::RoundStrategy;
    use proptest::prelude::*;
    use riskpool_common::SeededSource;

    fn params(population_size: usize, rounds: usize) -> SimulationParams {
        SimulationParams {
            population_size,
            group_size: 2,
            rounds,
            ..SimulationParams::default()
        }
    }

    #[test]
    fn test_average_payoffs_handles_idle_agents() {
        let mut played = Agent::with_strategies(vec![RoundStrategy::new(0.0, 0.0, 0.0)], 1.0);
        played.enter_game(1.0);
        played.settle();
        played.enter_game(1.0);
        played.settle();
        let idle = Agent::with_strategies(vec![RoundStrategy::new(0.0, 0.0, 0.0)], 1.0);

        let mut population = Population::from_agents(vec![played, idle]);
        population.average_payoffs();

        assert!((population.agent(0).payoff() - 1.0).abs() < 1e-12);
        assert_eq!(population.agent(1).payoff(), 0.0);
        assert!((population.total_payoff() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_assess_fitness_total() {
        let mut population = Population::from_agents(vec![
            Agent::with_strategies(vec![], 1.0),
            Agent::with_strategies(vec![], 1.0),
        ]);
        let total = population.assess_fitness(1.0);
        assert!((total - 2.0).abs() < 1e-12);
        assert_eq!(population.fitness(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_fitness_is_relative_to_fittest() {
        let mut a = Agent::with_strategies(vec![], 1000.0);
        a.enter_game(1000.0);
        a.settle();
        let mut b = Agent::with_strategies(vec![], 1000.0);
        b.enter_game(998.0);
        b.settle();
        let mut population = Population::from_agents(vec![a, b]);
        population.average_payoffs();

        let total = population.assess_fitness(1.0);
        assert!(total.is_finite());
        assert_eq!(population.agent(0).fitness(), 1.0);
        assert!((population.agent(1).fitness() - (-2f64).exp()).abs() < 1e-12);

        // Strong negative selection favours the low payoff instead
        population.assess_fitness(-5.0);
        assert_eq!(population.agent(1).fitness(), 1.0);
        assert!(population.agent(0).fitness() > 0.0);
    }

    proptest! {
        #[test]
        fn random_agents_respect_strategy_shape(
            seed in any::<u64>(),
            n in 3usize..40,
            rounds in 1usize..12,
        ) {
            let params = params(n, rounds);
            let mut rng = SeededSource::new(seed);
            let population = Population::random(&params, &mut rng);
            let unit = params.contribution_unit();

            prop_assert_eq!(population.len(), n);
            for agent in population.iter() {
                prop_assert_eq!(agent.strategies().len(), rounds);
                prop_assert!(agent.endowment() >= 0.0);
                for rule in agent.strategies() {
                    prop_assert!(rule.tau >= 0.0 && rule.tau < params.target());
                    prop_assert!(rule.j == 0.0 || rule.j == unit);
                    prop_assert!(rule.k == 0.0 || rule.k == unit);
                }
            }
        }
    }
}
