//! # Dynamics
//!
//! Discrete-time replication dynamics over a fixed strategy set.
//!
//! ## Update Rule
//!
//! ```text
//! π_i   = Σ_j M[i][j] × p_j
//! adj_i = π_i - min(π) + 1   if min(π) < 0
//!       = π_i + 1            otherwise
//! p_i   ← p_i × adj_i / Σ_k p_k × adj_k
//! ```
//!
//! Where:
//! - M: payoff matrix, row = actor, column = opponent
//! - p: population shares, uniform at period 0
//! - π: expected payoff under full mixing
//!
//! ## Diagnostics
//!
//! Runs can optionally record the pairwise contributions `M[i][j] × p_j` of
//! every period and each strategy's best-response opponent. The latter is a
//! property of the matrix alone and is identical in every period.

pub mod analysis;
pub mod engine;
pub mod fitness;
pub mod reweighting;
pub mod simulation;

pub use analysis::{FinalReport, PayoffTimeline, PeriodBreakdown, RankedShare};
pub use engine::ReplicatorEngine;
pub use fitness::{BestResponse, BestResponses, FitnessCalculator, PairwiseTable};
pub use reweighting::FloorShift;
pub use simulation::{PayoffSeries, Simulation};

use replicator_common::{
    DynamicsError, PayoffMatrix, PayoffTable, Result, StrategySet, DEFAULT_PERIODS,
    SHARE_TOLERANCE,
};
use serde::{Deserialize, Serialize};

/// Dynamics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    /// Number of periods to simulate
    pub num_periods: usize,
    /// Record `M[i][j] × p_j` tables per period
    pub record_pairwise: bool,
    /// Record each strategy's best-response opponent per period
    pub record_best_responses: bool,
    /// Allowed deviation of each share vector's sum from 1
    pub tolerance: f64,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            num_periods: DEFAULT_PERIODS,
            record_pairwise: false,
            record_best_responses: false,
            tolerance: SHARE_TOLERANCE,
        }
    }
}

impl DynamicsConfig {
    /// Configuration that records every diagnostic
    pub fn with_diagnostics(num_periods: usize) -> Self {
        Self {
            num_periods,
            record_pairwise: true,
            record_best_responses: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> std::result::Result<(), DynamicsError> {
        if self.num_periods == 0 {
            return Err(DynamicsError::InvalidPeriodCount {
                periods: self.num_periods,
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(DynamicsError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Run the dynamics over `strategies` using a nested payoff table
///
/// Validates the period count and the table's completeness before any
/// computation; records all diagnostics.
pub fn run(
    strategies: &StrategySet,
    payoffs: &PayoffTable,
    num_periods: usize,
) -> Result<Simulation> {
    let config = DynamicsConfig::with_diagnostics(num_periods);
    config.validate()?;
    let matrix = PayoffMatrix::from_table(strategies, payoffs)?;
    ReplicatorEngine::new(config).run(&matrix)
}
