//! Trial tallies and their normalization into per-risk statistics

use riskpool_common::{RiskStatistics, SimulationParams};

use crate::game::GameOutcome;

/// Sums collected by one trial (or merged over several)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialTally {
    /// Σ averaged payoff over terminal-generation agents
    pub payoff: f64,
    /// Σ raw contributions over terminal-generation games
    pub contribution: f64,
    /// Σ fines over terminal-generation games
    pub fine: f64,
    /// Σ final pool over terminal-generation games
    pub target: f64,
    /// Terminal-generation games that ended in catastrophe
    pub catastrophes: u64,
    /// Σ averaged payoff over all agents, per recorded generation
    pub curve: Vec<f64>,
}

impl TrialTally {
    /// Tally recording `curve_len` curve points (0 for unrecorded risks)
    pub fn new(curve_len: usize) -> Self {
        Self {
            curve: vec![0.0; curve_len],
            ..Self::default()
        }
    }

    /// Fold one terminal-generation game
    pub fn record_game(&mut self, outcome: &GameOutcome) {
        self.contribution += outcome.contributions;
        self.fine += outcome.fines;
        self.target += outcome.pool;
        if outcome.catastrophe {
            self.catastrophes += 1;
        }
    }

    /// Record generation `generation`'s total payoff, if it is on the curve
    pub fn record_curve(&mut self, generation: usize, total_payoff: f64) {
        if let Some(point) = self.curve.get_mut(generation) {
            *point += total_payoff;
        }
    }

    /// Add another tally into this one
    pub fn merge(&mut self, other: &TrialTally) {
        self.payoff += other.payoff;
        self.contribution += other.contribution;
        self.fine += other.fine;
        self.target += other.target;
        self.catastrophes += other.catastrophes;
        if self.curve.len() < other.curve.len() {
            self.curve.resize(other.curve.len(), 0.0);
        }
        for (acc, point) in self.curve.iter_mut().zip(&other.curve) {
            *acc += point;
        }
    }

    /// Normalize a tally merged over all trials of one risk level.
    ///
    /// Payoff is per agent, contribution and fine are per player per game,
    /// target is per game.
    pub fn statistics(&self, params: &SimulationParams, risk: f64) -> RiskStatistics {
        let trials = params.trials as f64;
        let agents = params.population_size as f64 * trials;
        let games = params.games_per_generation as f64 * trials;
        let player_games = params.group_size as f64 * games;

        RiskStatistics {
            risk,
            payoff: self.payoff / agents,
            contribution: self.contribution / player_games,
            fine: self.fine / player_games,
            target: self.target / games,
        }
    }

    /// Per-generation average payoff over all agents and trials
    pub fn payoff_curve(&self, params: &SimulationParams) -> Vec<f64> {
        let agents = params.population_size as f64 * params.trials as f64;
        self.curve.iter().map(|total| total / agents).collect()
    }
}
