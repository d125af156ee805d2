//! `mmd show` command implementation.

use std::path::PathBuf;

use clap::Args;
use mmd_config::{CliSettings, Config};

use super::load_registry;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Diagram key.
    key: String,

    /// Directory with extra *.mmd diagram sources (overrides config).
    #[arg(long)]
    diagrams_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mmd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ShowArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            diagrams_dir: self.diagrams_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let registry = load_registry(&config)?;

        let Some(source) = registry.lookup(&self.key) else {
            return Err(CliError::UnknownKey {
                key: self.key,
                known: registry.keys().join(", "),
            });
        };
        output.result_raw(source);
        Ok(())
    }
}
