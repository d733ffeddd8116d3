//! Error types for game table construction

use thiserror::Error;

/// Configuration faults detected while building or validating game tables.
///
/// Everything downstream of a validated [`GameTables`](crate::GameTables)
/// is total: spinning, evaluating and accumulating never fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotMathError {
    #[error("Unknown symbol id: {0}")]
    UnknownSymbol(u8),

    #[error("Reel set '{name}' has {actual} strips, expected {expected}")]
    ReelCount {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Reel strip {reel} is empty")]
    EmptyStrip { reel: usize },

    #[error("Reel strip {reel} holds non-paying symbol {symbol} at position {position}")]
    SpecialOnStrip {
        reel: usize,
        position: usize,
        symbol: u8,
    },

    #[error("Payline {index} uses row {row}, window has {rows} rows")]
    PaylineRow { index: usize, row: u8, rows: usize },

    #[error("Too many paylines: {actual} (max {max})")]
    TooManyPaylines { actual: usize, max: usize },

    #[error("Weight table '{name}' has {actual} entries, expected {expected}")]
    WeightLength {
        name: String,
        expected: String,
        actual: usize,
    },

    #[error("Free-game level {level} has a zero multiplier")]
    ZeroMultiplier { level: usize },

    #[error("Level thresholds must start at 0 and strictly ascend, got {0:?}")]
    Thresholds(Vec<u32>),

    #[error("Game needs at least one base reel set")]
    NoBaseReels,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for slot math operations
pub type SlotMathResult<T> = Result<T, SlotMathError>;
