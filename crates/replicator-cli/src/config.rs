//! Replicator runner configuration

use replicator_common::{ReplicatorError, Result};
use replicator_dynamics::DynamicsConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `REPLICATOR_DYNAMICS__NUM_PERIODS=50`
pub const ENV_PREFIX: &str = "REPLICATOR";

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplicatorConfig {
    /// Engine settings
    pub dynamics: DynamicsConfig,
    /// JSON payoff matrix; the default automatons when unset
    pub matrix_path: Option<PathBuf>,
    /// Report destination; stdout when unset
    pub output_path: Option<PathBuf>,
    /// Leave the full series out of the report
    pub summary_only: bool,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ReplicatorConfig {
    fn default() -> Self {
        Self {
            dynamics: DynamicsConfig::default(),
            matrix_path: None,
            output_path: None,
            summary_only: false,
            log_level: "info".to_string(),
        }
    }
}

impl ReplicatorConfig {
    /// Load configuration from `.env`, an optional file, then the environment
    ///
    /// Later sources override earlier ones; anything unset keeps its default.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.to_path_buf()).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let cfg: Self = builder
            .build()
            .map_err(|e| ReplicatorError::Config(format!("Failed to assemble sources: {e}")))?
            .try_deserialize()
            .map_err(|e| ReplicatorError::Config(format!("Failed to parse: {e}")))?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.dynamics.validate()?;
        Ok(())
    }
}
