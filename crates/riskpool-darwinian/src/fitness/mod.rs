//! Fitness evaluation
pub mod calculator;

pub use self::calculator::FitnessCalculator;
