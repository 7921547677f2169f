//! Injected uniform random source
//!
//! Nothing in the engine touches a global RNG. Every component that needs
//! randomness takes a `&mut impl RandomSource`, so a sweep can hand each worker
//! its own stream and tests can script exact draws.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random draws used by the simulation
pub trait RandomSource {
    /// Uniform float in [0, 1)
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in [0, n). `n` must be positive.
    fn next_index(&mut self, n: usize) -> usize;

    /// Bernoulli trial: true with probability `p`.
    /// `p <= 0` never fires and `p >= 1` always fires.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Seedable ChaCha-backed source
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    inner: ChaCha8Rng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Source for one (risk index, trial) job of a sweep
    pub fn for_job(master_seed: u64, risk_index: usize, trial: usize) -> Self {
        Self::new(derive_seed(master_seed, risk_index, trial))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn next_index(&mut self, n: usize) -> usize {
        assert!(n > 0, "next_index requires a non-empty range");
        self.inner.gen_range(0..n)
    }
}

/// Derive a per-job seed from the master seed.
///
/// Streams stay stable when the sweep grows: job (q, t) always gets the same
/// seed for a given master seed, whatever the number of risks or trials.
pub fn derive_seed(master_seed: u64, risk_index: usize, trial: usize) -> u64 {
    let job = ((risk_index as u64) << 32) ^ trial as u64;
    splitmix64(master_seed ^ job.wrapping_mul(0x9e37_79b9_7f4a_7c15))
}

/// Fresh master seed from OS entropy
pub fn entropy_seed() -> u64 {
    rand::rngs::OsRng.next_u64()
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
