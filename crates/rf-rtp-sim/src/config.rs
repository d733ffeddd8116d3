//! Simulation run configuration

use std::fs;
use std::path::Path;

use rf_slot_math::GameMode;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Configuration for a simulation run.
///
/// Game tables are compiled in; only run parameters live here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Trials played by each worker
    pub trials_per_worker: u64,

    /// Worker count (None = one per logical core)
    pub workers: Option<usize>,

    /// Master seed for reproducibility (None = OS entropy)
    pub seed: Option<u64>,

    /// Play mode
    pub mode: GameMode,

    /// Progress log lines per worker (0 = silent)
    pub progress_steps: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials_per_worker: 50_000_000,
            workers: None,
            seed: None,
            mode: GameMode::Normal,
            progress_steps: 10,
        }
    }
}

impl SimConfig {
    /// Short run for smoke checks
    pub fn quick() -> Self {
        Self {
            trials_per_worker: 100_000,
            progress_steps: 0,
            ..Default::default()
        }
    }

    /// Full-length certification run
    pub fn production() -> Self {
        Self {
            trials_per_worker: 50_000_000,
            workers: Some(6),
            ..Default::default()
        }
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: Self = match extension(path).as_str() {
            "json" => serde_json::from_str(&text)?,
            "yaml" | "yml" => serde_yml::from_str(&text)?,
            other => return Err(SimError::UnsupportedFormat(other.to_string())),
        };
        config.validate()?;
        Ok(config)
    }

    /// Write to a `.json`, `.yaml` or `.yml` file
    pub fn save(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let path = path.as_ref();
        let text = match extension(path).as_str() {
            "json" => serde_json::to_string_pretty(self)?,
            "yaml" | "yml" => serde_yml::to_string(self)?,
            other => return Err(SimError::UnsupportedFormat(other.to_string())),
        };
        fs::write(path, text)?;
        Ok(())
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.trials_per_worker == 0 {
            return Err(SimError::InvalidConfig(
                "trials_per_worker must be positive".into(),
            ));
        }
        if self.workers == Some(0) {
            return Err(SimError::InvalidConfig("workers must be positive".into()));
        }
        Ok(())
    }

    /// Worker count after applying the core-count default
    pub fn resolved_workers(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }

    pub fn total_trials(&self) -> u64 {
        self.trials_per_worker * self.resolved_workers() as u64
    }

    /// Builder: set trials per worker
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials_per_worker = trials;
        self
    }

    /// Builder: set worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Builder: set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: set play mode
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder: set progress granularity
    pub fn with_progress_steps(mut self, steps: u32) -> Self {
        self.progress_steps = steps;
        self
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}
