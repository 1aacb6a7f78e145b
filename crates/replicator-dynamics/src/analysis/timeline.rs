//! Payoff timeline: one labeled column per period, one row per strategy

use serde::{Deserialize, Serialize};

use super::breakdown::period_label;
use crate::simulation::Simulation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub strategy: String,
    pub payoffs: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffTimeline {
    /// `t=0` .. `t=<num_periods - 1>`
    pub columns: Vec<String>,
    pub rows: Vec<TimelineRow>,
}

impl PayoffTimeline {
    pub fn from_simulation(simulation: &Simulation) -> Self {
        Self {
            columns: (0..simulation.num_periods()).map(period_label).collect(),
            rows: simulation
                .payoff_history()
                .iter()
                .map(|series| TimelineRow {
                    strategy: series.strategy.clone(),
                    payoffs: series.payoffs.clone(),
                })
                .collect(),
        }
    }

    /// Payoff of `strategy` under column `label`
    pub fn cell(&self, strategy: &str, label: &str) -> Option<f64> {
        let column = self.columns.iter().position(|c| c == label)?;
        self.rows
            .iter()
            .find(|r| r.strategy == strategy)
            .and_then(|r| r.payoffs.get(column).copied())
    }
}
