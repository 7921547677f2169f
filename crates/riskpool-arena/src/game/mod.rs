//! One R-round threshold public-goods game
pub mod penalty;
pub mod round;

pub use self::penalty::PenaltyPolicy;
pub use self::round::{Game, GameOutcome};
