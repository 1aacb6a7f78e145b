//! Error types for Replicator
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

/// Result type alias using ReplicatorError
pub type Result<T> = std::result::Result<T, ReplicatorError>;

/// Unified error type for Replicator operations
#[derive(Debug, Error)]
pub enum ReplicatorError {
    // Strategy set errors
    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    // Payoff matrix errors
    #[error("Payoff error: {0}")]
    Payoff(#[from] PayoffError),

    // Simulation errors
    #[error("Dynamics error: {0}")]
    Dynamics(#[from] DynamicsError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // File I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Strategy set construction errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    #[error("Strategy set is empty")]
    Empty,

    #[error("Duplicate strategy: {name}")]
    Duplicate { name: String },

    #[error("Strategy name at index {index} is blank")]
    BlankName { index: usize },

    #[error("Unknown automaton: {name}")]
    Unknown { name: String },
}

/// Payoff matrix validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayoffError {
    #[error("Missing payoff entry for {strategy} against {opponent}")]
    MissingEntry { strategy: String, opponent: String },

    #[error("Payoff for {strategy} against {opponent} is not finite: {value}")]
    NonFinite {
        strategy: String,
        opponent: String,
        value: f64,
    },

    #[error("Payoff table names a strategy outside the set: {name}")]
    UnknownStrategy { name: String },

    #[error("Matrix dimension mismatch: expected {expected} entries, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Simulation run errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DynamicsError {
    #[error("Invalid period count: {periods} (must be at least 1)")]
    InvalidPeriodCount { periods: usize },

    #[error("Numeric divergence at period {period}: reweighted total is {total}")]
    NumericDivergence { period: usize, total: f64 },

    #[error("Period {period} out of range (run has {num_periods} periods)")]
    PeriodOutOfRange { period: usize, num_periods: usize },

    #[error("Invalid dynamics configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed simulation record: {0}")]
    InvalidSimulation(String),
}

// Implement From for common external error types
impl From<serde_json::Error> for ReplicatorError {
    fn from(err: serde_json::Error) -> Self {
        ReplicatorError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ReplicatorError {
    fn from(err: std::io::Error) -> Self {
        ReplicatorError::Io(err.to_string())
    }
}
