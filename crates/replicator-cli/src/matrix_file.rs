//! Payoff matrix files
//!
//! Two JSON shapes are accepted:
//!
//! ```text
//! { "strategies": ["A", "B"], "payoffs": { "A": { "A": 1.0, "B": 0.0 }, ... } }
//! { "A": { "A": 1.0, "B": 0.0 }, "B": { ... } }
//! ```
//!
//! The bare table carries no order of its own: automaton names keep their
//! canonical order, anything else is sorted by name.

use std::path::Path;

use replicator_common::{
    Automaton, MatrixDocument, PayoffMatrix, PayoffTable, Result, StrategySet,
};
use tracing::debug;

/// Read and validate a matrix file
pub fn load_matrix(path: &Path) -> Result<PayoffMatrix> {
    let raw = std::fs::read_to_string(path)?;
    let matrix = parse_matrix(&raw)?;
    debug!(path = %path.display(), strategies = %matrix.strategies(), "Loaded payoff matrix");
    Ok(matrix)
}

/// Parse either matrix shape from JSON text
pub fn parse_matrix(raw: &str) -> Result<PayoffMatrix> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    if value.get("strategies").is_some() {
        let doc: MatrixDocument = serde_json::from_value(value)?;
        return Ok(PayoffMatrix::try_from(doc)?);
    }

    let table: PayoffTable = serde_json::from_value(value)?;
    let strategies = table_order(&table)?;
    Ok(PayoffMatrix::from_table(&strategies, &table)?)
}

/// Strategy order implied by a bare table's row keys
fn table_order(table: &PayoffTable) -> Result<StrategySet> {
    let automatons: Option<Vec<Automaton>> =
        table.keys().map(|name| name.parse().ok()).collect();

    let set = match automatons {
        Some(mut automatons) if !automatons.is_empty() => {
            automatons.sort_by_key(|a| a.index());
            StrategySet::new(automatons.iter().map(Automaton::name))?
        }
        _ => StrategySet::new(table.keys().cloned())?,
    };
    Ok(set)
}
