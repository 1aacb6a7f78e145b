//! Per-period view of a run: payoffs earned, best responses, pairwise table

use replicator_common::DynamicsError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::fitness::{BestResponses, PairwiseTable};
use crate::simulation::Simulation;

/// Expected payoff earned by one strategy in one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPayoff {
    pub strategy: String,
    pub payoff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBreakdown {
    pub period: usize,
    /// Column label, `t=<period>`
    pub label: String,
    /// Highest payoff first; ties keep strategy order
    pub payoffs: Vec<PeriodPayoff>,
    pub best_responses: Option<BestResponses>,
    pub pairwise: Option<PairwiseTable>,
}

impl PeriodBreakdown {
    pub fn at(simulation: &Simulation, period: usize) -> Result<Self, DynamicsError> {
        let expected = simulation
            .expected_payoffs_at(period)
            .ok_or(DynamicsError::PeriodOutOfRange {
                period,
                num_periods: simulation.num_periods(),
            })?;

        let mut payoffs: Vec<PeriodPayoff> = simulation
            .strategies()
            .iter()
            .zip(expected)
            .map(|(strategy, payoff)| PeriodPayoff {
                strategy: strategy.to_string(),
                payoff,
            })
            .collect();
        payoffs.sort_by(|a, b| b.payoff.total_cmp(&a.payoff));

        Ok(Self {
            period,
            label: period_label(period),
            payoffs,
            best_responses: simulation
                .best_response_history()
                .and_then(|h| h.get(period))
                .cloned(),
            pairwise: simulation
                .pairwise_history()
                .and_then(|h| h.get(period))
                .cloned(),
        })
    }

    /// Breakdowns for an inclusive period range
    pub fn range(
        simulation: &Simulation,
        periods: RangeInclusive<usize>,
    ) -> Result<Vec<Self>, DynamicsError> {
        periods.map(|period| Self::at(simulation, period)).collect()
    }
}

/// `t=<period>`, periods counted from 0
pub fn period_label(period: usize) -> String {
    format!("t={period}")
}
