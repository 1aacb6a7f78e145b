//! Simulation - immutable result of one run
//!
//! Held by the caller for as long as it needs the series; a new run produces a
//! new value rather than updating this one.

use replicator_common::{DynamicsError, PopulationShares, StrategySet};
use serde::{Deserialize, Serialize};

use crate::fitness::{BestResponses, PairwiseTable};

/// Expected payoff of one strategy, one entry per period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffSeries {
    pub strategy: String,
    pub payoffs: Vec<f64>,
}

/// Full output of a run
///
/// Deserialization checks every series against the strategy count and the
/// period count, so the accessors can index freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SimulationDocument")]
pub struct Simulation {
    strategies: StrategySet,
    /// `num_periods + 1` share vectors, starting with the uniform vector
    history: Vec<PopulationShares>,
    /// One series per strategy, in strategy order
    payoff_history: Vec<PayoffSeries>,
    /// `adj` vector applied in each period
    multipliers: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pairwise_history: Option<Vec<PairwiseTable>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    best_response_history: Option<Vec<BestResponses>>,
}

impl Simulation {
    pub fn strategies(&self) -> &StrategySet {
        &self.strategies
    }

    pub fn history(&self) -> &[PopulationShares] {
        &self.history
    }

    pub fn payoff_history(&self) -> &[PayoffSeries] {
        &self.payoff_history
    }

    pub fn multipliers(&self) -> &[Vec<f64>] {
        &self.multipliers
    }

    pub fn pairwise_history(&self) -> Option<&[PairwiseTable]> {
        self.pairwise_history.as_deref()
    }

    pub fn best_response_history(&self) -> Option<&[BestResponses]> {
        self.best_response_history.as_deref()
    }

    /// Number of simulated periods
    pub fn num_periods(&self) -> usize {
        self.multipliers.len()
    }

    /// Shares before the first period
    pub fn initial(&self) -> &PopulationShares {
        &self.history[0]
    }

    /// Shares after the last period
    pub fn final_shares(&self) -> &PopulationShares {
        &self.history[self.history.len() - 1]
    }

    /// Payoff series of a strategy by name
    pub fn payoffs_of(&self, strategy: &str) -> Option<&[f64]> {
        self.payoff_history
            .iter()
            .find(|s| s.strategy == strategy)
            .map(|s| s.payoffs.as_slice())
    }

    /// Share series of a strategy by name, `num_periods + 1` entries
    pub fn shares_of(&self, strategy: &str) -> Option<Vec<f64>> {
        let i = self.strategies.position(strategy)?;
        Some(self.history.iter().map(|p| p[i]).collect())
    }

    /// Expected payoffs of every strategy in `period`, strategy order
    pub fn expected_payoffs_at(&self, period: usize) -> Option<Vec<f64>> {
        if period >= self.num_periods() {
            return None;
        }
        Some(self.payoff_history.iter().map(|s| s.payoffs[period]).collect())
    }

    /// History as a `(num_periods + 1) x k` array
    pub fn history_matrix(&self) -> Vec<Vec<f64>> {
        self.history.iter().map(|p| p.as_slice().to_vec()).collect()
    }
}

/// Unchecked serialized shape of [`Simulation`]
#[derive(Deserialize)]
struct SimulationDocument {
    strategies: StrategySet,
    history: Vec<PopulationShares>,
    payoff_history: Vec<PayoffSeries>,
    multipliers: Vec<Vec<f64>>,
    #[serde(default)]
    pairwise_history: Option<Vec<PairwiseTable>>,
    #[serde(default)]
    best_response_history: Option<Vec<BestResponses>>,
}

fn malformed(reason: String) -> DynamicsError {
    DynamicsError::InvalidSimulation(reason)
}

impl TryFrom<SimulationDocument> for Simulation {
    type Error = DynamicsError;

    fn try_from(doc: SimulationDocument) -> Result<Self, Self::Error> {
        let k = doc.strategies.len();
        let n = doc.multipliers.len();

        if n == 0 {
            return Err(malformed("no periods recorded".to_string()));
        }
        if doc.history.len() != n + 1 {
            return Err(malformed(format!(
                "{} share vectors for {n} periods",
                doc.history.len()
            )));
        }
        if let Some(t) = doc.history.iter().position(|p| p.len() != k) {
            return Err(malformed(format!("share vector {t} does not have {k} entries")));
        }
        if let Some(t) = doc.multipliers.iter().position(|adj| adj.len() != k) {
            return Err(malformed(format!("multipliers of period {t} do not have {k} entries")));
        }

        if doc.payoff_history.len() != k {
            return Err(malformed(format!(
                "{} payoff series for {k} strategies",
                doc.payoff_history.len()
            )));
        }
        for (series, name) in doc.payoff_history.iter().zip(doc.strategies.iter()) {
            if series.strategy != name {
                return Err(malformed(format!(
                    "payoff series {} out of strategy order, expected {name}",
                    series.strategy
                )));
            }
            if series.payoffs.len() != n {
                return Err(malformed(format!(
                    "payoff series {name} has {} entries for {n} periods",
                    series.payoffs.len()
                )));
            }
        }

        if let Some(tables) = &doc.pairwise_history {
            let square =
                |t: &PairwiseTable| t.rows.len() == k && t.rows.iter().all(|r| r.len() == k);
            if tables.len() != n || !tables.iter().all(square) {
                return Err(malformed(format!("pairwise history is not {n} tables of {k}x{k}")));
            }
        }
        if let Some(history) = &doc.best_response_history {
            if history.len() != n || history.iter().any(|r| r.len() != k) {
                return Err(malformed(format!(
                    "best-response history is not {n} records of {k} strategies"
                )));
            }
        }

        Ok(Self {
            strategies: doc.strategies,
            history: doc.history,
            payoff_history: doc.payoff_history,
            multipliers: doc.multipliers,
            pairwise_history: doc.pairwise_history,
            best_response_history: doc.best_response_history,
        })
    }
}

/// Accumulates per-period records during a run
pub(crate) struct SimulationBuilder {
    strategies: StrategySet,
    history: Vec<PopulationShares>,
    payoff_history: Vec<PayoffSeries>,
    multipliers: Vec<Vec<f64>>,
    pairwise_history: Option<Vec<PairwiseTable>>,
    best_response_history: Option<Vec<BestResponses>>,
}

impl SimulationBuilder {
    pub(crate) fn new(
        strategies: StrategySet,
        initial: PopulationShares,
        num_periods: usize,
        record_pairwise: bool,
        record_best_responses: bool,
    ) -> Self {
        let mut history = Vec::with_capacity(num_periods + 1);
        history.push(initial);
        let payoff_history = strategies
            .iter()
            .map(|s| PayoffSeries {
                strategy: s.to_string(),
                payoffs: Vec::with_capacity(num_periods),
            })
            .collect();

        Self {
            strategies,
            history,
            payoff_history,
            multipliers: Vec::with_capacity(num_periods),
            pairwise_history: record_pairwise.then(|| Vec::with_capacity(num_periods)),
            best_response_history: record_best_responses.then(|| Vec::with_capacity(num_periods)),
        }
    }

    pub(crate) fn record_payoffs(&mut self, payoffs: &[f64]) {
        for (series, &pi) in self.payoff_history.iter_mut().zip(payoffs) {
            series.payoffs.push(pi);
        }
    }

    pub(crate) fn record_pairwise(&mut self, table: PairwiseTable) {
        if let Some(tables) = self.pairwise_history.as_mut() {
            tables.push(table);
        }
    }

    pub(crate) fn record_best_responses(&mut self, responses: BestResponses) {
        if let Some(history) = self.best_response_history.as_mut() {
            history.push(responses);
        }
    }

    pub(crate) fn record_step(&mut self, multipliers: Vec<f64>, shares: PopulationShares) {
        self.multipliers.push(multipliers);
        self.history.push(shares);
    }

    pub(crate) fn finish(self) -> Simulation {
        Simulation {
            strategies: self.strategies,
            history: self.history,
            payoff_history: self.payoff_history,
            multipliers: self.multipliers,
            pairwise_history: self.pairwise_history,
            best_response_history: self.best_response_history,
        }
    }
}
