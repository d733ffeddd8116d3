//! Simulator error types

use rf_slot_math::SlotMathError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Game tables rejected: {0}")]
    Tables(#[from] SlotMathError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

/// Result type for simulator operations
pub type SimResult<T> = Result<T, SimError>;
