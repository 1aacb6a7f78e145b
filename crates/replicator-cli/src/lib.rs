//! # Replicator CLI
//!
//! Loads configuration and an optional payoff matrix file, runs the
//! dynamics and writes a [`RunReport`](output::RunReport) as JSON.

pub mod config;
pub mod matrix_file;
pub mod output;

pub use config::ReplicatorConfig;
pub use matrix_file::{load_matrix, parse_matrix};
pub use output::RunReport;

use replicator_common::{PayoffMatrix, Result};
use replicator_dynamics::ReplicatorEngine;

/// Run one simulation as described by `config`
pub fn execute(config: &ReplicatorConfig) -> Result<RunReport> {
    let matrix = match &config.matrix_path {
        Some(path) => load_matrix(path)?,
        None => PayoffMatrix::default_automatons(),
    };

    let simulation = ReplicatorEngine::new(config.dynamics.clone()).run(&matrix)?;
    Ok(RunReport::new(
        config.dynamics.clone(),
        simulation,
        config.summary_only,
    ))
}
