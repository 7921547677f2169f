//! One trial: a fresh population evolved for `generations` generations

use riskpool_common::{ConfigError, RandomSource, SimulationParams};
use riskpool_darwinian::{reproduce, DarwinianConfig, Population};
use tracing::trace;

use super::tally::TrialTally;
use crate::game::Game;
use crate::sampler::sample_group;

/// Runs trials for one risk level
#[derive(Debug, Clone)]
pub struct TrialRunner<'a> {
    params: &'a SimulationParams,
    game: Game,
    darwinian: DarwinianConfig,
    record_curve: bool,
}

impl<'a> TrialRunner<'a> {
    /// `record_curve` marks the designated curve risk level. Rejects
    /// parameters that fail [`SimulationParams::validate`].
    pub fn new(
        params: &'a SimulationParams,
        risk: f64,
        record_curve: bool,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            game: Game::from_params(params, risk),
            darwinian: DarwinianConfig::from(params),
            record_curve,
        })
    }

    /// Run one trial from a fresh random population
    pub fn run(&self, rng: &mut impl RandomSource) -> TrialTally {
        let population = Population::random(self.params, rng);
        self.run_from(population, rng)
    }

    /// Run one trial starting from `population`
    pub fn run_from(&self, mut population: Population, rng: &mut impl RandomSource) -> TrialTally {
        let params = self.params;
        let curve_len = if self.record_curve {
            params.curve_len()
        } else {
            0
        };
        let mut tally = TrialTally::new(curve_len);
        let size = population.len();

        for generation in 0..params.generations {
            let is_terminal = generation + 1 == params.generations;

            for _ in 0..params.games_per_generation {
                let group = sample_group(population.len(), params.group_size, rng);
                let outcome = self.game.play(&mut population, &group, rng);
                if is_terminal {
                    tally.record_game(&outcome);
                }
            }

            population.average_payoffs();
            let total_payoff = population.total_payoff();
            tally.record_curve(generation, total_payoff);
            if is_terminal {
                tally.payoff += total_payoff;
            }
            trace!(
                generation,
                mean_payoff = total_payoff / population.len() as f64,
                "Generation complete"
            );

            population = reproduce(&mut population, &self.darwinian, rng);
            debug_assert_eq!(population.len(), size);
        }

        tally
    }
}
