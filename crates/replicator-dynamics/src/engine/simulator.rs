//! Discrete-time replication loop

use replicator_common::{DynamicsError, PayoffMatrix, PopulationShares, Result};
use tracing::{debug, info, instrument, warn};

use crate::fitness::FitnessCalculator;
use crate::reweighting::{reweight, FloorShift};
use crate::simulation::{Simulation, SimulationBuilder};
use crate::DynamicsConfig;

/// Runs the payoff reweighting dynamics for a fixed number of periods
///
/// Each call is independent: the engine holds only its configuration and
/// never mutates the matrix it is given.
#[derive(Debug, Clone, Default)]
pub struct ReplicatorEngine {
    config: DynamicsConfig,
    shift: FloorShift,
}

impl ReplicatorEngine {
    pub fn new(config: DynamicsConfig) -> Self {
        Self {
            config,
            shift: FloorShift::default(),
        }
    }

    pub fn config(&self) -> &DynamicsConfig {
        &self.config
    }

    /// Simulate `num_periods` periods from the uniform start
    #[instrument(
        skip(self, matrix),
        fields(strategies = matrix.len(), periods = self.config.num_periods)
    )]
    pub fn run(&self, matrix: &PayoffMatrix) -> Result<Simulation> {
        self.config.validate()?;

        let num_periods = self.config.num_periods;
        let mut shares = PopulationShares::uniform(matrix.len());
        let mut builder = SimulationBuilder::new(
            matrix.strategies().clone(),
            shares.clone(),
            num_periods,
            self.config.record_pairwise,
            self.config.record_best_responses,
        );

        // static in the matrix, recorded every period
        let best_responses = self
            .config
            .record_best_responses
            .then(|| FitnessCalculator::best_responses(matrix));

        for period in 0..num_periods {
            let payoffs = FitnessCalculator::expected_payoffs(matrix, &shares);
            builder.record_payoffs(&payoffs);

            if self.config.record_pairwise {
                builder.record_pairwise(FitnessCalculator::pairwise_contributions(matrix, &shares));
            }
            if let Some(responses) = &best_responses {
                builder.record_best_responses(responses.clone());
            }

            let multipliers = self.shift.multipliers(&payoffs);
            let next = reweight(&shares, &multipliers, period).map_err(|e| {
                warn!(period, error = %e, "Reweighting diverged");
                e
            })?;

            if !next.is_distribution(self.config.tolerance) {
                let total = next.sum();
                warn!(period, total, "Shares left the simplex");
                return Err(DynamicsError::NumericDivergence { period, total }.into());
            }

            debug!(period, payoffs = ?payoffs, shares = ?next.as_slice(), "Period complete");
            builder.record_step(multipliers, next.clone());
            shares = next;
        }

        let simulation = builder.finish();
        info!(
            periods = simulation.num_periods(),
            concentration = simulation.final_shares().concentration(),
            "Simulation finished"
        );
        Ok(simulation)
    }
}
