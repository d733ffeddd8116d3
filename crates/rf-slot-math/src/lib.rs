//! # rf-slot-math: Slot Math Core
//!
//! Monte Carlo building blocks for a 5×3, 15-line slot with leveled free
//! games. Everything here is deterministic given a seed; parallel
//! orchestration lives in `rf-rtp-sim`.
//!
//! ## Features
//!
//! - **Weighted Sampling**: integer weight tables, zero weights never drawn
//! - **Screen Generation**: cyclic reel strips plus weighted Wild/Scatter overlays
//! - **Line Evaluation**: wild substitution with low-value wild demotion
//! - **Free Games**: four levels, retriggers, level-ups, per-trial win cap
//! - **Game Modes**: normal play and bought feature
//! - **Accumulation**: mergeable per-worker sums and derived RTP statistics
//!
//! ## Architecture
//!
//! ```text
//! SlotEngine (one per worker, owns rng + scratch buffers)
//!     │
//!     ├── GameTables (shared, validated)
//!     │     ├── ReelSet ×2 base, ×1 free
//!     │     ├── PayTable (line pays, scatter pays, paylines, demotions)
//!     │     ├── SpecialPlacement (wild/scatter count + column weights)
//!     │     └── FreeGameRules (levels, thresholds, multipliers)
//!     │
//!     ├── Screen::generate → PayTable::evaluate_into
//!     └── FreeGameRules::play_round (via FreeSpinSource)
//!           │
//!           v
//!     TrialOutcome → TrialAccumulator → RtpStats
//! ```

pub mod engine;
pub mod error;
pub mod free_games;
pub mod game;
pub mod paytable;
pub mod screen;
pub mod stats;
pub mod symbols;
pub mod tables;
pub mod weights;

pub use engine::*;
pub use error::*;
pub use free_games::*;
pub use game::*;
pub use paytable::*;
pub use screen::*;
pub use stats::*;
pub use symbols::*;
pub use weights::*;
