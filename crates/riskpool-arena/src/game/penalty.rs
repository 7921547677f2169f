//! Fine/loss policy: the two risk channels of a game
//!
//! - Mid-game fine: once, at `fine_round`, if the pool is below T/2 every
//!   participant with money left pays `(risk / 2) × endowment` into the pool.
//! - End-game loss: if the pool is below T, one draw decides whether every
//!   participant loses what is left, with probability `risk`.

use riskpool_common::{RandomSource, SimulationParams};
use riskpool_darwinian::Population;

/// Risk-scaled penalties for one risk level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyPolicy {
    risk: f64,
    target: f64,
    fine_round: usize,
}

impl PenaltyPolicy {
    pub fn new(risk: f64, target: f64, fine_round: usize) -> Self {
        Self {
            risk,
            target,
            fine_round,
        }
    }

    pub fn from_params(params: &SimulationParams, risk: f64) -> Self {
        Self::new(risk, params.target(), params.fine_round)
    }

    /// Share of the remaining endowment taken by the mid-game fine
    #[inline]
    pub fn fine_rate(&self) -> f64 {
        self.risk / 2.0
    }

    /// Whether the fine applies after `round` with the pool at `pool`
    pub fn fine_due(&self, round: usize, pool: f64) -> bool {
        round == self.fine_round && pool < self.target / 2.0 && self.fine_rate() > 0.0
    }

    /// Fine every participant with money left; returns the total collected
    pub fn levy_fines(&self, population: &mut Population, group: &[usize]) -> f64 {
        let rate = self.fine_rate();
        group
            .iter()
            .map(|&p| population.agent_mut(p).pay_fine(rate))
            .sum()
    }

    /// Decide the end-game loss. Draws only when the target was missed.
    pub fn catastrophe(&self, pool: f64, rng: &mut impl RandomSource) -> bool {
        if pool >= self.target {
            return false;
        }
        rng.chance(self.risk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskpool_common::SeededSource;
    use riskpool_darwinian::{Agent, RoundStrategy};

    fn policy(risk: f64) -> PenaltyPolicy {
        PenaltyPolicy::new(risk, 3.0, 4)
    }

    #[test]
    fn test_fine_due_only_at_checkpoint_below_half_target() {
        let p = policy(0.6);
        assert!(p.fine_due(4, 1.0));
        assert!(!p.fine_due(3, 1.0));
        assert!(!p.fine_due(5, 1.0));
        assert!(!p.fine_due(4, 1.5));
    }

    #[test]
    fn test_no_fine_without_risk() {
        assert!(!policy(0.0).fine_due(4, 0.0));
    }

    #[test]
    fn test_levy_fines() {
        let agents = (0..3)
            .map(|_| Agent::with_strategies(vec![RoundStrategy::new(0.0, 0.0, 0.0)], 1.0))
            .collect();
        let mut population = Population::from_agents(agents);
        population.agent_mut(2).forfeit();

        let collected = policy(0.5).levy_fines(&mut population, &[0, 2]);

        assert!((collected - 0.25).abs() < 1e-12);
        assert!((population.agent(0).endowment() - 0.75).abs() < 1e-12);
        assert!((population.agent(1).endowment() - 1.0).abs() < 1e-12);
        assert_eq!(population.agent(2).endowment(), 0.0);
    }

    #[test]
    fn test_target_met_never_loses() {
        let mut rng = SeededSource::new(4);
        for _ in 0..1000 {
            assert!(!policy(1.0).catastrophe(3.0, &mut rng));
        }
    }

    #[test]
    fn test_loss_rate_tracks_risk() {
        let mut rng = SeededSource::new(8);
        let certain = (0..10_000)
            .filter(|_| policy(1.0).catastrophe(0.5, &mut rng))
            .count();
        let never = (0..10_000)
            .filter(|_| policy(0.0).catastrophe(0.5, &mut rng))
            .count();
        let half = (0..10_000)
            .filter(|_| policy(0.5).catastrophe(0.5, &mut rng))
            .count();

        assert_eq!(certain, 10_000);
        assert_eq!(never, 0);
        assert!((4_700..=5_300).contains(&half));
    }
}
