//! # Replicator Common
//!
//! Shared types and errors for the Replicator dynamics engine.
//!
//! ## Core Types
//!
//! - [`Automaton`]: the eight default behavioral strategies
//! - [`StrategySet`]: ordered, distinct strategy identifiers
//! - [`PayoffMatrix`]: validated K×K per-encounter payoffs (row = actor)
//! - [`PopulationShares`]: share vector summing to 1

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{DynamicsError, PayoffError, ReplicatorError, Result, StrategyError};
pub use types::{
    automaton::Automaton,
    payoff_matrix::{MatrixDocument, PayoffMatrix, PayoffTable},
    shares::PopulationShares,
    strategy_set::StrategySet,
};

/// Replicator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of simulated periods
pub const DEFAULT_PERIODS: usize = 100;

/// Tolerance for share vectors summing to 1
pub const SHARE_TOLERANCE: f64 = 1e-9;

/// Floor added to every shifted payoff before reweighting
pub const REWEIGHT_FLOOR: f64 = 1.0;
