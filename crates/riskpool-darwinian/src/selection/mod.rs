//! Fitness-proportional selection
pub mod reproduction;
pub mod roulette;

pub use self::reproduction::reproduce;
pub use self::roulette::RouletteWheel;
