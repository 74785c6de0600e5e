//! CLI configuration.

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Log filter when neither `--log-level` nor `RUST_LOG` is set
const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings shared by all subcommands
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Explicit log filter directive (`--log-level` / `FAIR_DICE_LOG`)
    pub log_filter: Option<String>,
    /// Where to append the draw transcript (`--transcript` / `FAIR_DICE_TRANSCRIPT`)
    pub transcript: Option<PathBuf>,
}

impl CliConfig {
    pub fn new(log_filter: Option<String>, transcript: Option<PathBuf>) -> Self {
        Self {
            log_filter,
            transcript,
        }
    }

    /// Build the tracing filter: explicit directive, then `RUST_LOG`, then
    /// the default.
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_filter {
            Some(directive) => EnvFilter::new(directive),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        }
    }
}
