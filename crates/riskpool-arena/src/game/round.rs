//! Game round engine
//!
//! ```text
//! enter ─▶ round 0 ─▶ … ─▶ round R-1 ─▶ shortfall check ─▶ settle
//!                  └ fine check at `fine_round`
//! ```
//!
//! Within a round every participant acts on the same pool value; the pool is
//! updated once the whole group has contributed.

use riskpool_common::{RandomSource, SimulationParams};
use riskpool_darwinian::Population;

use super::penalty::PenaltyPolicy;

/// What one game produced
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameOutcome {
    /// Raw contributions, fines excluded
    pub contributions: f64,
    /// Final pool, fines included
    pub pool: f64,
    /// Fines paid at the mid-game checkpoint
    pub fines: f64,
    /// Whether the end-game loss hit the group
    pub catastrophe: bool,
}

/// Game rules for one risk level
#[derive(Debug, Clone, Copy)]
pub struct Game {
    endowment: f64,
    rounds: usize,
    policy: PenaltyPolicy,
}

impl Game {
    pub fn new(endowment: f64, rounds: usize, policy: PenaltyPolicy) -> Self {
        Self {
            endowment,
            rounds,
            policy,
        }
    }

    pub fn from_params(params: &SimulationParams, risk: f64) -> Self {
        Self::new(
            params.endowment,
            params.rounds,
            PenaltyPolicy::from_params(params, risk),
        )
    }

    /// Play one game for `group`, which must hold distinct indices.
    ///
    /// Participants enter with a fresh endowment and leave with whatever is
    /// left credited to their payoff.
    pub fn play(
        &self,
        population: &mut Population,
        group: &[usize],
        rng: &mut impl RandomSource,
    ) -> GameOutcome {
        for &p in group {
            population.agent_mut(p).enter_game(self.endowment);
        }

        let mut outcome = GameOutcome::default();
        for round in 0..self.rounds {
            let given = self.play_round(population, group, round, outcome.pool);
            outcome.pool += given;
            outcome.contributions += given;

            if self.policy.fine_due(round, outcome.pool) {
                let fines = self.policy.levy_fines(population, group);
                outcome.pool += fines;
                outcome.fines += fines;
            }
        }

        outcome.catastrophe = self.policy.catastrophe(outcome.pool, rng);
        for &p in group {
            let agent = population.agent_mut(p);
            if outcome.catastrophe {
                agent.forfeit();
            }
            agent.settle();
        }

        outcome
    }

    /// Every participant applies its rule for `round` against `pool`.
    /// Returns the round's total contribution.
    pub fn play_round(
        &self,
        population: &mut Population,
        group: &[usize],
        round: usize,
        pool: f64,
    ) -> f64 {
        group
            .iter()
            .map(|&p| population.agent_mut(p).contribute(round, pool))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use riskpool_common::SeededSource;
    use riskpool_darwinian::{Agent, RoundStrategy};

    const E: f64 = 1.0;

    /// Population of `n` agents with the same rule in every one of `rounds`
    fn uniform(n: usize, rounds: usize, rule: RoundStrategy) -> Population {
        Population::from_agents(
            (0..n)
                .map(|_| Agent::with_strategies(vec![rule; rounds], E))
                .collect(),
        )
    }

    fn defectors(n: usize, rounds: usize) -> Population {
        uniform(n, rounds, RoundStrategy::new(0.0, 0.0, 0.0))
    }

    fn game(risk: f64, rounds: usize, group_size: usize) -> Game {
        let target = E * group_size as f64 / 2.0;
        Game::new(E, rounds, PenaltyPolicy::new(risk, target, 4))
    }

    #[test]
    fn test_full_cooperators_meet_target() {
        let mut population = uniform(6, 10, RoundStrategy::new(0.0, 0.1, 0.1));
        let mut rng = SeededSource::new(1);

        let outcome = game(1.0, 10, 4).play(&mut population, &[0, 1, 2, 3], &mut rng);

        assert!((outcome.contributions - 4.0).abs() < 1e-9);
        assert_eq!(outcome.fines, 0.0);
        assert!(!outcome.catastrophe);
        for p in 0..4 {
            assert!(population.agent(p).payoff().abs() < 1e-9);
            assert_eq!(population.agent(p).count(), 1);
        }
        assert_eq!(population.agent(4).count(), 0);
    }

    #[test]
    fn test_zero_risk_never_fines_or_loses() {
        let mut population = defectors(10, 10);
        let mut rng = SeededSource::new(2);
        let g = game(0.0, 10, 4);

        for _ in 0..200 {
            let outcome = g.play(&mut population, &[1, 3, 5, 7], &mut rng);
            assert_eq!(outcome.fines, 0.0);
            assert!(!outcome.catastrophe);
        }
        assert!((population.agent(3).payoff() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_risk_shortfall_always_loses() {
        let mut population = defectors(10, 10);
        let mut rng = SeededSource::new(3);
        let g = game(1.0, 10, 4);

        let losses = (0..1_000)
            .filter(|_| g.play(&mut population, &[0, 2, 4, 6], &mut rng).catastrophe)
            .count();

        assert_eq!(losses, 1_000);
        assert_eq!(population.agent(0).payoff(), 0.0);
    }

    #[test]
    fn test_mid_game_fine() {
        // Defectors keep the pool at 0 < T/2, so at round 4 each pays half the risk
        let mut population = defectors(5, 6);
        let mut rng = SeededSource::new(4);

        let outcome = game(0.5, 6, 2).play(&mut population, &[0, 1], &mut rng);

        assert!((outcome.fines - 0.5).abs() < 1e-12);
        assert!((outcome.pool - 0.5).abs() < 1e-12);
        assert_eq!(outcome.contributions, 0.0);
    }

    #[test]
    fn test_fine_checkpoint_unreachable_in_short_games() {
        let mut population = defectors(5, 4);
        let mut rng = SeededSource::new(5);

        let outcome = game(1.0, 4, 2).play(&mut population, &[0, 1], &mut rng);
        assert_eq!(outcome.fines, 0.0);
    }

    #[test]
    fn test_loss_only_touches_group() {
        let mut population = defectors(6, 10);
        let mut rng = SeededSource::new(6);
        for p in 0..6 {
            population.agent_mut(p).enter_game(E);
        }

        game(1.0, 10, 2).play(&mut population, &[1, 4], &mut rng);

        assert_eq!(population.agent(1).endowment(), 0.0);
        assert_eq!(population.agent(4).endowment(), 0.0);
        assert_eq!(population.agent(0).endowment(), E);
        assert_eq!(population.agent(5).endowment(), E);
    }

    #[test]
    fn test_round_sees_pool_before_own_contribution() {
        // Both agents contribute only once the pool reaches 0.1; neither does in round 0
        let mut population = uniform(3, 2, RoundStrategy::new(0.1, 0.5, 0.0));
        let g = game(0.0, 2, 2);

        let given = g.play_round(&mut population, &[0, 1], 0, 0.0);
        assert_eq!(given, 0.0);

        let given = g.play_round(&mut population, &[0, 1], 1, 0.1);
        assert!((given - 1.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn contributions_never_create_money(
            seed in any::<u64>(),
            rounds in 1usize..12,
            risk in 0.0f64..=1.0,
        ) {
            let params = SimulationParams {
                population_size: 12,
                group_size: 5,
                rounds,
                risks: vec![risk],
                curve_risk_index: 0,
                ..SimulationParams::default()
            };
            let mut rng = SeededSource::new(seed);
            let mut population = Population::random(&params, &mut rng);
            let group = crate::sampler::sample_group(12, 5, &mut rng);
            let g = Game::from_params(&params, risk);

            for &p in &group {
                population.agent_mut(p).enter_game(params.endowment);
            }
            let mut pool = 0.0;
            for round in 0..rounds {
                let before: f64 = group.iter().map(|&p| population.agent(p).endowment()).sum();
                let given = g.play_round(&mut population, &group, round, pool);
                prop_assert!(given >= 0.0);
                prop_assert!(given <= before + 1e-12);
                pool += given;
                for &p in &group {
                    prop_assert!(population.agent(p).endowment() >= 0.0);
                }
            }

            let outcome = g.play(&mut population, &group, &mut rng);
            prop_assert!(outcome.contributions <= params.endowment * 5.0 + 1e-9);
            prop_assert!(outcome.pool >= outcome.contributions);
            for agent in population.iter() {
                prop_assert!(agent.endowment() >= 0.0);
                prop_assert_eq!(agent.strategies().len(), rounds);
            }
        }
    }
}
