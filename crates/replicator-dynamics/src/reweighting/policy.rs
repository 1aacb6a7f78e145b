//! Reweighting policy: shift payoffs to >= floor, multiply, renormalize
//!
//! ```text
//! m = min_i π_i
//! adj_i = π_i - m + floor   if m < 0
//! adj_i = π_i + floor       otherwise
//! p_i <- p_i × adj_i / Σ_k p_k × adj_k
//! ```

use replicator_common::{DynamicsError, PopulationShares, REWEIGHT_FLOOR};

/// Positivity shift applied to a period's expected payoffs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorShift {
    floor: f64,
}

impl Default for FloorShift {
    fn default() -> Self {
        Self::new(REWEIGHT_FLOOR)
    }
}

impl FloorShift {
    pub fn new(floor: f64) -> Self {
        Self { floor }
    }

    /// Multipliers `adj_i`; every entry is at least `floor`
    ///
    /// The floor is added even when all payoffs are already non-negative.
    pub fn multipliers(&self, payoffs: &[f64]) -> Vec<f64> {
        let min = payoffs.iter().copied().fold(f64::INFINITY, f64::min);
        if min < 0.0 {
            payoffs.iter().map(|&pi| pi - min + self.floor).collect()
        } else {
            payoffs.iter().map(|&pi| pi + self.floor).collect()
        }
    }
}

/// Multiply shares by `multipliers` and renormalize to sum 1
///
/// Fails when the reweighted total is zero, negative or non-finite.
pub fn reweight(
    shares: &PopulationShares,
    multipliers: &[f64],
    period: usize,
) -> Result<PopulationShares, DynamicsError> {
    let weighted: Vec<f64> = shares
        .iter()
        .zip(multipliers)
        .map(|(p, adj)| p * adj)
        .collect();
    let total = weighted.iter().fold(0.0, |acc, w| acc + w);

    if !total.is_finite() || total <= 0.0 {
        return Err(DynamicsError::NumericDivergence { period, total });
    }

    Ok(PopulationShares::from_vec(
        weighted.into_iter().map(|w| w / total).collect(),
    ))
}
