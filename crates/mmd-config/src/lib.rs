//! Configuration management for mmd.
//!
//! Parses `mmd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `engine.module_url` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::path::{Path, PathBuf};

use mmd_resolver::{DEFAULT_MODULE_URL, DEFAULT_PLACEHOLDER_CLASS, EngineConfig, is_valid_class};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override placeholder class.
    pub placeholder_class: Option<String>,
    /// Override the engine's start-on-load switch.
    pub start_on_load: Option<bool>,
    /// Override the extra diagrams directory.
    pub diagrams_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mmd.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Placeholder discovery configuration.
    pub placeholders: PlaceholdersConfig,
    /// Rendering engine activation configuration.
    pub engine: EngineSettings,
    /// Extra diagrams configuration (paths are relative strings from TOML).
    diagrams: DiagramsConfigRaw,

    /// Resolved diagrams configuration (set after loading).
    #[serde(skip)]
    pub diagrams_resolved: DiagramsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Placeholder discovery configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlaceholdersConfig {
    /// Class marking placeholder elements.
    pub class: String,
}

impl Default for PlaceholdersConfig {
    fn default() -> Self {
        Self {
            class: DEFAULT_PLACEHOLDER_CLASS.to_owned(),
        }
    }
}

/// Rendering engine activation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Whether rendering begins automatically once the page is ready.
    pub start_on_load: bool,
    /// URL of the Mermaid ES module.
    pub module_url: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            start_on_load: true,
            module_url: DEFAULT_MODULE_URL.to_owned(),
        }
    }
}

/// Raw diagrams configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DiagramsConfigRaw {
    dir: Option<String>,
}

/// Resolved diagrams configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DiagramsConfig {
    /// Directory with extra `*.mmd` sources layered over the built-ins.
    pub dir: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`engine.module_url`").
        field: String,
        /// Error message (e.g., "${`MERMAID_CDN`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mmd.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Engine configuration for [`MermaidEngine`](mmd_resolver::MermaidEngine).
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            start_on_load: self.engine.start_on_load,
            module_url: self.engine.module_url.clone(),
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(class) = &settings.placeholder_class {
            self.placeholders.class.clone_from(class);
        }
        if let Some(start_on_load) = settings.start_on_load {
            self.engine.start_on_load = start_on_load;
        }
        if let Some(dir) = &settings.diagrams_dir {
            self.diagrams_resolved.dir = Some(dir.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_class(&self.placeholders.class) {
            return Err(ConfigError::Validation(format!(
                "placeholders.class '{}' is not a valid class name",
                self.placeholders.class
            )));
        }
        if self.engine.module_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "engine.module_url cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.engine.module_url = expand::expand_env(&self.engine.module_url, "engine.module_url")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.diagrams_resolved = DiagramsConfig {
            dir: self.diagrams.dir.as_deref().map(|d| config_dir.join(d)),
        };
    }
}
