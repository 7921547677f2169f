//! Trial and sweep orchestration
pub mod sweep;
pub mod tally;
pub mod trial;

pub use self::sweep::Sweep;
pub use self::tally::TrialTally;
pub use self::trial::TrialRunner;
