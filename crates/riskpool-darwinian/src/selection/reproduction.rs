//! Reproduction: build the next generation by roulette draws with replacement

use riskpool_common::RandomSource;
use tracing::trace;

use super::roulette::RouletteWheel;
use crate::population::Population;
use crate::DarwinianConfig;

/// Assess fitness on `population` and draw the next generation.
///
/// Returns exactly `population.len()` offspring. Each one is a deep copy of
/// the selected parent's strategies with running state reset.
pub fn reproduce(
    population: &mut Population,
    config: &DarwinianConfig,
    rng: &mut impl RandomSource,
) -> Population {
    population.assess_fitness(config.beta);
    let wheel = RouletteWheel::new(&population.fitness());

    let offspring = (0..population.len())
        .map(|_| {
            let parent = wheel.spin(rng);
            population.agent(parent).offspring(config.endowment)
        })
        .collect::<Vec<_>>();

    trace!(offspring = offspring.len(), "Reproduced population");
    Population::from_agents(offspring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Agent, RoundStrategy};
    use riskpool_common::SeededSource;

    /// Replays fixed floats
    struct FixedFloats(std::vec::IntoIter<f64>);

    impl RandomSource for FixedFloats {
        fn next_f64(&mut self) -> f64 {
            self.0.next().expect("scripted floats exhausted")
        }

        fn next_index(&mut self, _n: usize) -> usize {
            unreachable!("reproduction draws floats only")
        }
    }

    fn marked(tau: f64) -> Agent {
        Agent::with_strategies(vec![RoundStrategy::new(tau, 0.0, 0.0)], 1.0)
    }

    fn with_payoff(mut agent: Agent, payoff: f64) -> Agent {
        agent.enter_game(payoff);
        agent.settle();
        agent.average_payoff();
        agent
    }

    #[test]
    fn test_selection_matches_cumulative_boundaries() {
        // Payoffs 0 and ln 3 give fitness 1 and 3: agent 0 iff u < 0.25
        let mut population = Population::from_agents(vec![
            with_payoff(marked(0.0), 0.0),
            with_payoff(marked(1.0), 3f64.ln()),
        ]);
        let mut rng = FixedFloats(vec![0.1, 0.3].into_iter());

        let next = reproduce(&mut population, &DarwinianConfig::default(), &mut rng);

        assert_eq!(next.len(), 2);
        assert_eq!(next.agent(0).strategy(0).tau, 0.0);
        assert_eq!(next.agent(1).strategy(0).tau, 1.0);
        assert!((population.agent(0).fitness() - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(population.agent(1).fitness(), 1.0);
    }

    #[test]
    fn test_size_is_preserved() {
        let agents = (0..50).map(|i| with_payoff(marked(i as f64), (i % 7) as f64 / 7.0));
        let mut population = Population::from_agents(agents.collect());
        let mut rng = SeededSource::new(11);
        let config = DarwinianConfig::default();

        for _ in 0..20 {
            population = reproduce(&mut population, &config, &mut rng);
            assert_eq!(population.len(), 50);
            assert!(population.iter().all(|a| a.count() == 0 && a.payoff() == 0.0));
        }
    }

    #[test]
    fn test_strong_selection_favours_high_payoff() {
        let mut population = Population::from_agents(vec![
            with_payoff(marked(0.0), 0.0),
            with_payoff(marked(1.0), 1.0),
        ]);
        let config = DarwinianConfig {
            beta: 50.0,
            ..DarwinianConfig::default()
        };
        let mut rng = SeededSource::new(5);

        let next = reproduce(&mut population, &config, &mut rng);
        assert!(next.iter().all(|a| a.strategy(0).tau == 1.0));
    }

    #[test]
    fn test_large_endowment_payoffs_still_select() {
        // exp(1000) overflows; selection must still be well defined
        let mut population = Population::from_agents(vec![
            with_payoff(marked(0.0), 1000.0),
            with_payoff(marked(1.0), 999.0),
            with_payoff(marked(2.0), 0.0),
        ]);
        let mut rng = SeededSource::new(9);

        let next = reproduce(&mut population, &DarwinianConfig::default(), &mut rng);

        assert_eq!(next.len(), 3);
        assert!(population.fitness().iter().all(|f| f.is_finite()));
        assert!(next.iter().all(|a| a.strategy(0).tau != 2.0));
    }

    #[test]
    fn test_negative_beta_with_positive_payoffs_still_selects() {
        let mut population = Population::from_agents(vec![
            with_payoff(marked(0.0), 500.0),
            with_payoff(marked(1.0), 1.0),
        ]);
        let config = DarwinianConfig {
            beta: -10.0,
            ..DarwinianConfig::default()
        };
        let mut rng = SeededSource::new(4);

        let next = reproduce(&mut population, &config, &mut rng);
        assert!(next.iter().all(|a| a.strategy(0).tau == 1.0));
    }
}
