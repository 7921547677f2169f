//! SweepReport - the five result sequences of a sweep

use serde::{Deserialize, Serialize};

/// Aggregate results for every swept risk level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Swept risk levels, in sweep order
    pub risks: Vec<f64>,
    /// Average terminal-generation payoff per risk level
    pub payoffs: Vec<f64>,
    /// Per-generation average payoff for `risks[curve_risk_index]`
    pub payoff_curve: Vec<f64>,
    /// Average contribution per player per game, per risk level
    pub contributions: Vec<f64>,
    /// Average fine per player per game, per risk level
    pub fines: Vec<f64>,
    /// Average resulting pool per game, per risk level
    pub targets: Vec<f64>,
    /// Risk index recorded in `payoff_curve`
    pub curve_risk_index: usize,
    /// Master seed the sweep was run with
    pub seed: u64,
}

/// The four scalar statistics of one risk level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskStatistics {
    pub risk: f64,
    pub payoff: f64,
    pub contribution: f64,
    pub fine: f64,
    pub target: f64,
}

impl SweepReport {
    pub fn with_capacity(risks: Vec<f64>, curve_risk_index: usize, seed: u64) -> Self {
        let n = risks.len();
        Self {
            risks,
            payoffs: Vec::with_capacity(n),
            payoff_curve: Vec::new(),
            contributions: Vec::with_capacity(n),
            fines: Vec::with_capacity(n),
            targets: Vec::with_capacity(n),
            curve_risk_index,
            seed,
        }
    }

    /// Append the statistics of the next risk level
    pub fn push(&mut self, stats: RiskStatistics) {
        self.payoffs.push(stats.payoff);
        self.contributions.push(stats.contribution);
        self.fines.push(stats.fine);
        self.targets.push(stats.target);
    }

    /// Statistics of the risk level at `index`
    pub fn statistics(&self, index: usize) -> Option<RiskStatistics> {
        Some(RiskStatistics {
            risk: *self.risks.get(index)?,
            payoff: *self.payoffs.get(index)?,
            contribution: *self.contributions.get(index)?,
            fine: *self.fines.get(index)?,
            target: *self.targets.get(index)?,
        })
    }

    /// Iterate statistics in sweep order
    pub fn iter(&self) -> impl Iterator<Item = RiskStatistics> + '_ {
        (0..self.payoffs.len()).filter_map(|i| self.statistics(i))
    }
}

impl std::fmt::Display for RiskStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "risk={:.2} payoff={:.4} contribution={:.4} fine={:.4} target={:.4}",
            self.risk, self.payoff, self.contribution, self.fine, self.target
        )
    }
}
