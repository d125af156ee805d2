//! mmd CLI - architecture diagram injection.
//!
//! Provides commands for:
//! - `inject`: Populate diagram placeholders of an HTML page and activate Mermaid
//! - `list`: List known diagram keys
//! - `show`: Print a diagram source

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{InjectArgs, ListArgs, ShowArgs};
use output::Output;

/// mmd - Architecture diagram injection for HTML pages.
#[derive(Parser)]
#[command(name = "mmd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Populate diagram placeholders in an HTML page.
    Inject(InjectArgs),
    /// List known diagram keys.
    List(ListArgs),
    /// Print the source of a diagram.
    Show(ShowArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for inject command
    let verbose = matches!(&cli.command, Commands::Inject(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Inject(args) => args.execute(),
        Commands::List(args) => args.execute(),
        Commands::Show(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
