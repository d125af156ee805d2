//! CLI error types.

use mmd_config::ConfigError;
use mmd_registry::LoadError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown diagram '{key}' (known: {known})")]
    UnknownKey { key: String, known: String },

    #[error("{count} placeholder(s) could not be resolved")]
    Unresolved { count: usize },
}
