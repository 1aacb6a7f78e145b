//! Run report assembly and JSON output

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use replicator_common::Result;
use replicator_dynamics::{DynamicsConfig, FinalReport, PayoffTimeline, Simulation};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Everything written for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub config: DynamicsConfig,
    /// Omitted in summary-only mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<Simulation>,
    pub report: FinalReport,
    pub payoff_timeline: PayoffTimeline,
}

impl RunReport {
    pub fn new(config: DynamicsConfig, simulation: Simulation, summary_only: bool) -> Self {
        let report = FinalReport::from_simulation(&simulation);
        let payoff_timeline = PayoffTimeline::from_simulation(&simulation);
        Self {
            run_id: Uuid::now_v7(),
            generated_at: Utc::now(),
            config,
            simulation: (!summary_only).then_some(simulation),
            report,
            payoff_timeline,
        }
    }

    /// Log the final distribution
    pub fn log_summary(&self) {
        if let Some(top) = self.report.most_dominant() {
            info!(
                strategy = %top.strategy,
                percentage = top.percentage,
                "Most dominant strategy"
            );
        }
        if let Some(bottom) = self.report.least_common() {
            info!(
                strategy = %bottom.strategy,
                percentage = bottom.percentage,
                "Least common strategy"
            );
        }
        info!(
            run_id = %self.run_id,
            concentration = self.report.concentration,
            "Final distribution\n{}",
            self.report
        );
    }

    /// Write pretty JSON to `path`, or stdout when `None`
    pub fn write(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                let file = std::fs::File::create(path)?;
                let mut writer = std::io::BufWriter::new(file);
                serde_json::to_writer_pretty(&mut writer, self)?;
                writer.write_all(b"\n")?;
                writer.flush()?;
                info!(path = %path.display(), "Report written");
            }
            None => {
                let stdout = std::io::stdout();
                let mut lock = stdout.lock();
                serde_json::to_writer_pretty(&mut lock, self)?;
                lock.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}
