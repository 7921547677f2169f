//! Fitness calculation: f = exp(β × π - peak)
//!
//! `peak` is the largest `β × π` in the population. Subtracting it leaves
//! selection probabilities unchanged, keeps every fitness in (0, 1] and gives
//! the fittest agent exactly 1, so the roulette sum is finite and at least 1
//! for any β and endowment.

pub struct FitnessCalculator;

impl FitnessCalculator {
    /// Calculate fitness: f = exp(β × π - peak)
    pub fn calculate(beta: f64, payoff: f64, peak: f64) -> f64 {
        (beta * payoff - peak).exp()
    }

    /// Largest `β × π` over `payoffs`; 0 when there are none
    pub fn peak(beta: f64, payoffs: impl IntoIterator<Item = f64>) -> f64 {
        payoffs
            .into_iter()
            .map(|payoff| beta * payoff)
            .reduce(f64::max)
            .unwrap_or(0.0)
    }
}
