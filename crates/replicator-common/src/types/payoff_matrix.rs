//! PayoffMatrix - dense per-encounter payoffs over a strategy set
//!
//! Row = actor, column = opponent. Matrices are built from a nested
//! name -> name -> value table and checked for completeness at that boundary,
//! so every matrix that exists is fully populated with finite values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::automaton::Automaton;
use super::strategy_set::StrategySet;
use crate::error::PayoffError;

/// Nested payoff table as edited or stored externally: strategy -> opponent -> payoff
pub type PayoffTable = BTreeMap<String, BTreeMap<String, f64>>;

/// Reference payoffs for the default automatons, canonical order
const DEFAULT_PAYOFFS: [[f64; Automaton::COUNT]; Automaton::COUNT] = [
    // DOVE
    [1.0, -0.5, 1.0, 1.0, 1.0, 1.0, 1.0, -0.5],
    // HAWK
    [3.0, 0.0, 0.0, 0.0, 1.5, 1.5, 1.5, 3.0],
    // GRIM
    [2.0, 0.0, 2.0, 2.0, 0.0, 2.0, 2.0, -1.0],
    // TIT-FOR-TAT
    [2.0, 0.0, 2.0, 2.0, 2.0 / 3.0, 2.0, 2.0, 2.0],
    // TAT-FOR-TIT
    [-0.5, 0.75, 0.0, 2.0 / 3.0, 2.0, 2.0, 2.0, 2.0],
    // TWEEDLEDUM
    [2.0, 0.75, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0],
    // TWEEDLEDEE
    [2.0, 0.75, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0],
    // TWEETYPIE
    [-0.5, 3.0, -1.0, 2.0, 2.0, 2.0, 2.0, 2.0],
];

/// Validated K x K payoff matrix bound to its strategy set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixDocument", into = "MatrixDocument")]
pub struct PayoffMatrix {
    strategies: StrategySet,
    /// Row-major, `k * k` entries
    values: Vec<f64>,
}

/// Serialized shape: explicit strategy order plus the nested table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixDocument {
    pub strategies: StrategySet,
    pub payoffs: PayoffTable,
}

impl PayoffMatrix {
    /// Build a matrix from a nested table, requiring every ordered pair of `strategies`
    ///
    /// Rows or columns for names outside `strategies` are ignored.
    pub fn from_table(strategies: &StrategySet, table: &PayoffTable) -> Result<Self, PayoffError> {
        let k = strategies.len();
        let mut values = Vec::with_capacity(k * k);

        for strategy in strategies.iter() {
            let row = table.get(strategy);
            for opponent in strategies.iter() {
                let value = row.and_then(|r| r.get(opponent)).copied().ok_or_else(|| {
                    PayoffError::MissingEntry {
                        strategy: strategy.to_string(),
                        opponent: opponent.to_string(),
                    }
                })?;
                if !value.is_finite() {
                    return Err(PayoffError::NonFinite {
                        strategy: strategy.to_string(),
                        opponent: opponent.to_string(),
                        value,
                    });
                }
                values.push(value);
            }
        }

        Ok(Self {
            strategies: strategies.clone(),
            values,
        })
    }

    /// Build a matrix from dense rows in strategy order
    pub fn from_rows(strategies: &StrategySet, rows: &[Vec<f64>]) -> Result<Self, PayoffError> {
        let k = strategies.len();
        let actual: usize = rows.iter().map(Vec::len).sum();
        if rows.len() != k || rows.iter().any(|r| r.len() != k) {
            return Err(PayoffError::DimensionMismatch {
                expected: k * k,
                actual,
            });
        }

        let mut values = Vec::with_capacity(k * k);
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(PayoffError::NonFinite {
                        strategy: strategies.names()[i].clone(),
                        opponent: strategies.names()[j].clone(),
                        value,
                    });
                }
                values.push(value);
            }
        }

        Ok(Self {
            strategies: strategies.clone(),
            values,
        })
    }

    /// The reference matrix over the eight default automatons
    pub fn default_automatons() -> Self {
        Self {
            strategies: StrategySet::automatons(),
            values: DEFAULT_PAYOFFS.iter().flatten().copied().collect(),
        }
    }

    pub fn strategies(&self) -> &StrategySet {
        &self.strategies
    }

    /// Number of strategies (K)
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Payoff row of strategy `i` against every opponent
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let k = self.len();
        &self.values[i * k..(i + 1) * k]
    }

    /// Payoff of strategy `i` against opponent `j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.len() + j]
    }

    /// Payoff by strategy names
    pub fn payoff(&self, strategy: &str, opponent: &str) -> Result<f64, PayoffError> {
        let i = self.index_of(strategy)?;
        let j = self.index_of(opponent)?;
        Ok(self.get(i, j))
    }

    /// Copy of this matrix with one entry replaced
    ///
    /// The receiver is left untouched, so a run holding it is unaffected by edits.
    pub fn with_entry(
        &self,
        strategy: &str,
        opponent: &str,
        value: f64,
    ) -> Result<Self, PayoffError> {
        if !value.is_finite() {
            return Err(PayoffError::NonFinite {
                strategy: strategy.to_string(),
                opponent: opponent.to_string(),
                value,
            });
        }
        let i = self.index_of(strategy)?;
        let j = self.index_of(opponent)?;
        let mut edited = self.clone();
        let k = edited.len();
        edited.values[i * k + j] = value;
        Ok(edited)
    }

    /// Nested table view, the inverse of [`PayoffMatrix::from_table`]
    pub fn to_table(&self) -> PayoffTable {
        self.strategies
            .iter()
            .enumerate()
            .map(|(i, strategy)| {
                let row = self
                    .strategies
                    .iter()
                    .zip(self.row(i))
                    .map(|(opponent, &v)| (opponent.to_string(), v))
                    .collect();
                (strategy.to_string(), row)
            })
            .collect()
    }

    fn index_of(&self, name: &str) -> Result<usize, PayoffError> {
        self.strategies
            .position(name)
            .ok_or_else(|| PayoffError::UnknownStrategy {
                name: name.to_string(),
            })
    }
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self::default_automatons()
    }
}

impl TryFrom<MatrixDocument> for PayoffMatrix {
    type Error = PayoffError;

    fn try_from(doc: MatrixDocument) -> Result<Self, Self::Error> {
        Self::from_table(&doc.strategies, &doc.payoffs)
    }
}

impl From<PayoffMatrix> for MatrixDocument {
    fn from(matrix: PayoffMatrix) -> Self {
        let payoffs = matrix.to_table();
        Self {
            strategies: matrix.strategies,
            payoffs,
        }
    }
}
