//! `mmd inject` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mmd_config::{CliSettings, Config};
use mmd_resolver::{MermaidEngine, PlaceholderResolver, Resolution};

use super::load_registry;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the inject command.
#[derive(Args)]
pub(crate) struct InjectArgs {
    /// HTML page to process.
    input: PathBuf,

    /// Output file (default: overwrite the input).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Class marking placeholder elements (overrides config).
    #[arg(long)]
    class: Option<String>,

    /// Do not start rendering automatically when the page loads.
    #[arg(long)]
    no_start_on_load: bool,

    /// Directory with extra *.mmd diagram sources (overrides config).
    #[arg(long)]
    diagrams_dir: Option<PathBuf>,

    /// Fail when any placeholder cannot be resolved.
    #[arg(long)]
    strict: bool,

    /// Path to configuration file (default: auto-discover mmd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (show resolution details).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl InjectArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            placeholder_class: self.class.clone(),
            start_on_load: self.no_start_on_load.then_some(false),
            diagrams_dir: self.diagrams_dir.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let target = self.output.clone().unwrap_or_else(|| self.input.clone());

        let resolution = inject_file(&config, &self.input, &target)?;

        for unresolved in &resolution.unresolved {
            output.warning(&format!("Warning: {unresolved}"));
        }
        output.info(&format!(
            "Resolved {} of {} placeholder(s)",
            resolution.resolved.len(),
            resolution.placeholder_count()
        ));

        if self.strict && !resolution.is_complete() {
            return Err(CliError::Unresolved {
                count: resolution.unresolved.len(),
            });
        }

        output.success(&format!("Wrote {}", target.display()));
        Ok(())
    }
}

/// Resolve placeholders of `input` and write the page to `target`.
///
/// The page is written even when some placeholders stay unresolved.
fn inject_file(config: &Config, input: &Path, target: &Path) -> Result<Resolution, CliError> {
    let registry = load_registry(config)?;
    let html = std::fs::read_to_string(input)?;

    let engine = MermaidEngine::new(config.engine_config());
    let resolution = PlaceholderResolver::new(&registry)
        .placeholder_class(config.placeholders.class.as_str())
        .resolve_all(&html, &engine);

    std::fs::write(target, &resolution.html)?;
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmd_registry::DiagramRegistry;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_inject_file_writes_target() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("index.html");
        let target = dir.path().join("out.html");
        std::fs::write(
            &input,
            r#"<body><div class="mermaid" id="message"></div><div class="mermaid" id="nope"></div></body>"#,
        )
        .unwrap();

        let resolution = inject_file(&Config::default(), &input, &target).unwrap();

        assert_eq!(resolution.resolved, vec!["message"]);
        assert_eq!(resolution.unresolved.len(), 1);
        let written = std::fs::read_to_string(&target).unwrap();
        assert_eq!(written, resolution.html);
        let message = DiagramRegistry::builtin().lookup("message").unwrap();
        assert!(written.contains(message));
        assert!(written.contains("mermaid.initialize({ startOnLoad: true });"));
        // Input untouched when a separate target is given
        assert!(!std::fs::read_to_string(&input).unwrap().contains("initialize"));
    }

    #[test]
    fn test_inject_file_in_place() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("index.html");
        std::fs::write(&input, r#"<body><div class="mermaid" id="startup"></div></body>"#)
            .unwrap();

        let resolution = inject_file(&Config::default(), &input, &input).unwrap();

        assert!(resolution.is_complete());
        assert_eq!(std::fs::read_to_string(&input).unwrap(), resolution.html);
    }

    #[test]
    fn test_inject_file_missing_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("missing.html");

        let err = inject_file(&Config::default(), &input, &input).unwrap_err();

        assert!(matches!(err, CliError::Io(_)));
    }
}
