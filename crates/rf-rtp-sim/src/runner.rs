//! Parallel trial fan-out and reduction

use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use rf_slot_math::{GameTables, SlotEngine, TrialAccumulator};
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::report::SimReport;

/// One worker's share of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerResult {
    pub worker: usize,
    pub accumulator: TrialAccumulator,
    pub elapsed_ms: u64,
}

/// Random stream for `worker`: the master seed picks the key, the worker
/// index picks a ChaCha stream, so streams never overlap.
pub fn worker_rng(master_seed: u64, worker: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(master_seed);
    rng.set_stream(worker as u64);
    rng
}

/// Play `trials` on one stream, logging `progress_steps` times
pub fn run_worker(
    tables: Arc<GameTables>,
    master_seed: u64,
    worker: usize,
    trials: u64,
    progress_steps: u32,
) -> WorkerResult {
    let start = Instant::now();
    let mut accumulator = TrialAccumulator::new(tables.stake());
    let mut engine = SlotEngine::new(tables, worker_rng(master_seed, worker));

    let steps = u64::from(progress_steps.max(1)).min(trials.max(1));
    let chunk = trials / steps;
    let extra = trials % steps;
    for step in 0..steps {
        let n = chunk + u64::from(step < extra);
        engine.run(n, &mut accumulator);
        if progress_steps > 0 {
            log::info!(
                "Worker {}: {}/{} trials ({:.0}%)",
                worker,
                accumulator.trials,
                trials,
                100.0 * (step + 1) as f64 / steps as f64
            );
        }
    }

    WorkerResult {
        worker,
        accumulator,
        elapsed_ms: start.elapsed().as_millis() as u64,
    }
}

/// A configured simulation: validated run parameters plus game tables
pub struct Simulation {
    config: SimConfig,
    tables: Arc<GameTables>,
}

impl Simulation {
    /// Load the compiled-in tables for the configured mode
    pub fn new(config: SimConfig) -> SimResult<Self> {
        let tables = GameTables::for_mode(config.mode)?;
        Self::with_tables(config, tables)
    }

    /// Use caller-supplied tables
    pub fn with_tables(config: SimConfig, tables: GameTables) -> SimResult<Self> {
        config.validate()?;
        tables.validate()?;
        Ok(Self {
            config,
            tables: Arc::new(tables),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn tables(&self) -> &GameTables {
        &self.tables
    }

    /// Run every worker to completion and reduce their accumulators
    pub fn run(&self) -> SimResult<SimReport> {
        let workers = self.config.resolved_workers();
        let trials = self.config.trials_per_worker;
        let seed = self.config.seed.unwrap_or_else(rand::random);

        if workers > num_cpus::get() {
            log::warn!(
                "{} workers requested on {} logical cores",
                workers,
                num_cpus::get()
            );
        }
        log::info!(
            "Simulating {} mode: {} workers x {} trials, seed {}",
            self.config.mode,
            workers,
            trials,
            seed
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("rtp-worker-{i}"))
            .build()
            .map_err(|e| SimError::ThreadPool(e.to_string()))?;

        let start = Instant::now();
        let results: Vec<WorkerResult> = pool.install(|| {
            (0..workers)
                .into_par_iter()
                .map(|worker| {
                    let result = run_worker(
                        self.tables.clone(),
                        seed,
                        worker,
                        trials,
                        self.config.progress_steps,
                    );
                    log::info!(
                        "Worker {} finished in {} ms, rtp {:.4}",
                        worker,
                        result.elapsed_ms,
                        result.accumulator.stats().rtp
                    );
                    result
                })
                .collect()
        });
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let report = SimReport::from_workers(&self.config, seed, results, elapsed_ms);
        log::info!(
            "Finished {} trials in {} ms, rtp {:.4}",
            report.total_trials,
            elapsed_ms,
            report.stats.rtp
        );
        Ok(report)
    }
}
