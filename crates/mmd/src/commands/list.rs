//! `mmd list` command implementation.

use std::path::PathBuf;

use clap::Args;
use mmd_config::{CliSettings, Config};

use super::load_registry;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Directory with extra *.mmd diagram sources (overrides config).
    #[arg(long)]
    diagrams_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mmd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ListArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            diagrams_dir: self.diagrams_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let registry = load_registry(&config)?;

        for key in registry.keys() {
            output.result_line(key);
        }
        Ok(())
    }
}
