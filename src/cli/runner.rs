//! Pipeline runner

use super::commands::Cli;
use crate::config::EtlConfig;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::transform::{process_catalog, process_events};
use std::path::Path;
use tracing::info;

/// Default config file consulted when `--config` is absent
const DEFAULT_CONFIG_FILE: &str = "etl.yaml";

/// Runs both transformer stages against one execution context
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Resolve configuration from the config file and CLI overrides
    fn resolve_config(&self) -> Result<EtlConfig> {
        let mut config = match &self.cli.config {
            // Explicit flag: the file must exist
            Some(path) => EtlConfig::from_file(path)?,
            None => {
                if Path::new(DEFAULT_CONFIG_FILE).exists() {
                    EtlConfig::from_file(DEFAULT_CONFIG_FILE)?
                } else {
                    EtlConfig::from_str("{}")?
                }
            }
        };

        if let Some(input) = &self.cli.input {
            config.input_root = input.clone();
        }
        if let Some(output) = &self.cli.output {
            config.output_root = output.clone();
        }
        Ok(config)
    }

    /// Run the full pipeline: catalog stage, then event stage
    ///
    /// Any failure propagates unhandled; there is no retry or partial
    /// success. The process exits non-zero unless both stages complete.
    pub async fn run(&self) -> Result<()> {
        let config = self.resolve_config()?;
        config.install_credentials();

        info!(
            input = %config.input_root,
            output = %config.output_root,
            "starting pipeline"
        );

        let ctx = ExecutionContext::new(&config)?;

        let catalog_stats = process_catalog(&ctx).await?;
        let event_stats = process_events(&ctx).await?;

        info!(
            songs = catalog_stats.songs_written,
            artists = catalog_stats.artists_written,
            users = event_stats.users_written,
            times = event_stats.times_written,
            songplays = event_stats.songplays_written,
            "pipeline complete"
        );
        Ok(())
    }
}
