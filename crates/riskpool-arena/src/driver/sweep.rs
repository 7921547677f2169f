//! Sweep driver: risk levels × trials, run in parallel and merged in order

use rayon::prelude::*;
use riskpool_common::{
    RandomSource, Result, RiskPoolError, SeededSource, SimulationParams, SweepReport,
};
use tracing::{debug, info, instrument, warn};

use super::tally::TrialTally;
use super::trial::TrialRunner;

/// A validated sweep over every configured risk level
#[derive(Debug, Clone)]
pub struct Sweep {
    params: SimulationParams,
    seed: u64,
    threads: Option<usize>,
}

impl Sweep {
    /// Validate `params` and prepare a sweep seeded with `seed`
    pub fn new(params: SimulationParams, seed: u64) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            seed,
            threads: None,
        })
    }

    /// Run on a dedicated pool of `threads` workers instead of the global pool
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads).filter(|&n| n > 0);
        self
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run the sweep with one ChaCha stream per (risk index, trial) job
    pub fn run(&self) -> Result<SweepReport> {
        let seed = self.seed;
        self.run_with(move |risk_index, trial| SeededSource::for_job(seed, risk_index, trial))
    }

    /// Run the sweep with sources built by `source(risk_index, trial)`
    #[instrument(skip(self, source), fields(risks = self.params.risks.len(), trials = self.params.trials))]
    pub fn run_with<S, F>(&self, source: F) -> Result<SweepReport>
    where
        S: RandomSource,
        F: Fn(usize, usize) -> S + Sync,
    {
        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| RiskPoolError::Internal(e.to_string()))?;
                pool.install(|| self.execute(&source))
            }
            None => self.execute(&source),
        }
    }

    fn execute<S, F>(&self, source: &F) -> Result<SweepReport>
    where
        S: RandomSource,
        F: Fn(usize, usize) -> S + Sync,
    {
        let params = &self.params;
        let trials = params.trials;
        info!(
            population = params.population_size,
            games = params.games_per_generation,
            group = params.group_size,
            rounds = params.rounds,
            generations = params.generations,
            seed = self.seed,
            "Starting sweep"
        );
        if !params.fine_reachable() {
            warn!(
                rounds = params.rounds,
                fine_round = params.fine_round,
                "Games end before the fine round; no mid-game fines will be charged"
            );
        }

        let runners = params
            .risks
            .iter()
            .enumerate()
            .map(|(q, &risk)| TrialRunner::new(params, risk, q == params.curve_risk_index))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let jobs: Vec<(usize, usize)> = (0..params.risks.len())
            .flat_map(|q| (0..trials).map(move |t| (q, t)))
            .collect();

        let tallies: Vec<TrialTally> = jobs
            .par_iter()
            .map(|&(q, t)| {
                let mut rng = source(q, t);
                let tally = runners[q].run(&mut rng);
                debug!(risk = params.risks[q], trial = t, payoff = tally.payoff, "Trial complete");
                tally
            })
            .collect();

        let mut report =
            SweepReport::with_capacity(params.risks.clone(), params.curve_risk_index, self.seed);
        for (q, chunk) in tallies.chunks(trials).enumerate() {
            let mut merged = TrialTally::default();
            for tally in chunk {
                merged.merge(tally);
            }

            let stats = merged.statistics(params, params.risks[q]);
            info!(
                risk = stats.risk,
                payoff = stats.payoff,
                contribution = stats.contribution,
                fine = stats.fine,
                target = stats.target,
                catastrophes = merged.catastrophes,
                "Risk level complete"
            );
            report.push(stats);

            if q == params.curve_risk_index {
                report.payoff_curve = merged.payoff_curve(params);
            }
        }

        Ok(report)
    }
}
