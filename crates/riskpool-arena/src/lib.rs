//! # Arena
//!
//! Collective-risk game engine and sweep driver for riskpool.
//!
//! ## Game
//!
//! ```text
//! T = E × M / 2
//! fine   = (risk / 2) × endowment      at round 4, if pool < T / 2
//! loss   = all endowments, w.p. risk   at game end, if pool < T
//! ```
//!
//! ## Sweep
//!
//! Every (risk level, trial) pair is an independent job with its own seeded
//! random source. Jobs run on a rayon pool and are merged in job order, so a
//! sweep's output depends only on its master seed.

pub mod driver;
pub mod game;
pub mod sampler;

pub use driver::{Sweep, TrialRunner, TrialTally};
pub use game::{Game, GameOutcome, PenaltyPolicy};
pub use sampler::sample_group;
