//! Roulette wheel: pick index j with probability fitness_j / Σ fitness

use riskpool_common::RandomSource;

/// Cumulative selection rates over a population, in population order
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    rates: Vec<f64>,
}

impl RouletteWheel {
    /// Build the wheel from per-agent fitness.
    ///
    /// Panics when the fitness sum is not a positive finite number. Fitness is
    /// shifted so the fittest agent scores 1, so that only happens on a defect.
    pub fn new(fitness: &[f64]) -> Self {
        let total: f64 = fitness.iter().sum();
        assert!(
            !fitness.is_empty() && total.is_finite() && total > 0.0,
            "roulette wheel needs a positive finite fitness sum, got {total} over {} agents",
            fitness.len()
        );

        let mut rate = 0.0;
        let rates = fitness
            .iter()
            .map(|f| {
                rate += f / total;
                rate
            })
            .collect();
        Self { rates }
    }

    /// First index whose cumulative rate exceeds `u`.
    ///
    /// When rounding leaves the last cumulative rate at or below `u`, the last
    /// index is selected, so every draw yields a candidate.
    pub fn select(&self, u: f64) -> usize {
        self.rates
            .partition_point(|&rate| rate <= u)
            .min(self.rates.len() - 1)
    }

    /// Draw one index
    pub fn spin(&self, rng: &mut impl RandomSource) -> usize {
        self.select(rng.next_f64())
    }
}
