//! # rf-rtp-sim: Parallel RTP Simulator
//!
//! Estimates the return to player of the leveled free-games slot by
//! running independent [`SlotEngine`](rf_slot_math::SlotEngine) workers
//! on a dedicated rayon pool and reducing their accumulators.
//!
//! ## Features
//!
//! - **Independent Streams**: one master seed, one ChaCha stream per worker
//! - **Run Configuration**: JSON/YAML files, presets, builder overrides
//! - **Progress Logging**: per-worker progress through `log`
//! - **Reports**: text, JSON and markdown output with per-worker spread
//!
//! ## Architecture
//!
//! ```text
//! SimConfig ──> Simulation
//!                  │
//!                  ├── worker 0: SlotEngine(stream 0) → TrialAccumulator
//!                  ├── worker 1: SlotEngine(stream 1) → TrialAccumulator
//!                  └── ...
//!                  │
//!                  v  merge
//!              SimReport (RtpStats + per-worker summary)
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod runner;

pub use config::*;
pub use error::*;
pub use report::*;
pub use runner::*;
