//! Replicator binary
//!
//! Runs replicator dynamics over a payoff matrix and writes the report as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use replicator_cli::{execute, ReplicatorConfig};
use replicator_common::VERSION;

#[derive(Parser, Debug)]
#[command(name = "replicator", version, about = "Replicator dynamics among competing strategies")]
struct Args {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of periods to simulate
    #[arg(short, long)]
    periods: Option<usize>,

    /// Payoff matrix JSON file; the default automatons when omitted
    #[arg(short, long)]
    matrix: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Record pairwise tables and best responses
    #[arg(long)]
    diagnostics: bool,

    /// Leave the full history out of the report
    #[arg(long)]
    summary_only: bool,
}

impl Args {
    fn apply(self, config: &mut ReplicatorConfig) {
        if let Some(periods) = self.periods {
            config.dynamics.num_periods = periods;
        }
        if let Some(matrix) = self.matrix {
            config.matrix_path = Some(matrix);
        }
        if let Some(output) = self.output {
            config.output_path = Some(output);
        }
        if self.diagnostics {
            config.dynamics.record_pairwise = true;
            config.dynamics.record_best_responses = true;
        }
        if self.summary_only {
            config.summary_only = true;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config =
        ReplicatorConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    // Initialize tracing; logs go to stderr so stdout stays valid JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!("Starting Replicator v{}", VERSION);
    info!(
        "Dynamics config: periods={}, pairwise={}, best_responses={}",
        config.dynamics.num_periods,
        config.dynamics.record_pairwise,
        config.dynamics.record_best_responses
    );

    let report = execute(&config).context("Simulation failed")?;
    report.log_summary();

    report
        .write(config.output_path.as_deref())
        .context("Failed to write report")?;

    Ok(())
}
