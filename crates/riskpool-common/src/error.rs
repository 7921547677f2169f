//! Error types for riskpool
//!
//! Provides a unified error type and the configuration error variants that are
//! rejected before a sweep starts

use thiserror::Error;

/// Result type alias using RiskPoolError
pub type Result<T> = std::result::Result<T, RiskPoolError>;

/// Unified error type for riskpool operations
#[derive(Debug, Error)]
pub enum RiskPoolError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Output errors
    #[error("I/O error: {0}")]
    Io(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Simulation parameter errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Group size {group} must be smaller than population size {population}")]
    GroupTooLarge { group: usize, population: usize },

    #[error("Rounds per game must be at least 1")]
    ZeroRounds,

    #[error("Risk sweep is empty")]
    EmptyRiskSweep,

    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },

    #[error("Endowment must be positive and finite, got {0}")]
    InvalidEndowment(f64),

    #[error("Risk at index {index} is {value}, expected a value in [0, 1]")]
    RiskOutOfRange { index: usize, value: f64 },

    #[error("Curve risk index {index} is out of range for {len} risk levels")]
    CurveIndexOutOfRange { index: usize, len: usize },

    #[error("Selection intensity must be finite and keep beta * endowment finite, got {0}")]
    InvalidBeta(f64),

    #[error("Cannot parse {key}={value}")]
    Parse { key: String, value: String },
}

impl From<serde_json::Error> for RiskPoolError {
    fn from(err: serde_json::Error) -> Self {
        RiskPoolError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for RiskPoolError {
    fn from(err: std::io::Error) -> Self {
        RiskPoolError::Io(err.to_string())
    }
}

impl From<anyhow::Error> for RiskPoolError {
    fn from(err: anyhow::Error) -> Self {
        RiskPoolError::Internal(err.to_string())
    }
}
