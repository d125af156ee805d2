//! CLI command implementations.

pub(crate) mod inject;
pub(crate) mod list;
pub(crate) mod show;

pub(crate) use inject::InjectArgs;
pub(crate) use list::ListArgs;
pub(crate) use show::ShowArgs;

use mmd_config::Config;
use mmd_registry::{DiagramRegistry, load_dir};

use crate::error::CliError;

/// Built-in diagrams with the configured directory layered on top.
pub(crate) fn load_registry(config: &Config) -> Result<DiagramRegistry, CliError> {
    let builtin = DiagramRegistry::builtin();
    match &config.diagrams_resolved.dir {
        Some(dir) => {
            let extra = load_dir(dir)?;
            tracing::info!(dir = %dir.display(), count = extra.len(), "Loaded extra diagrams");
            Ok(builtin.merged(&extra))
        }
        None => Ok(builtin.clone()),
    }
}
