//! # FsdGen Main Entry Point
//!
//! File: cli/src/main.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! This is the main entry point for the fsdgen command-line application, a
//! scaffolding tool for the Feature-Sliced Design convention. It parses the
//! command line, initializes logging, and routes to the command handlers.
//!
//! ## Architecture
//!
//! - `Cli` is the clap root: global flags plus the `Commands` subcommand
//!   tree (`generate`, `preset`, `list`).
//! - Logging goes to stderr through `tracing_subscriber`; `-v`/`-vv`/`-vvv`
//!   raise the default level to info/debug/trace, and `RUST_LOG` wins when
//!   set. Generated-file reports go to stdout.
//! - Handlers are async and run on the tokio runtime; a returned error is
//!   printed with its context chain and exits non-zero.
//!
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod common;
mod core;

use crate::core::error::Result;

/// FSD code scaffolding: generate slices, run presets, reverse-engineer
/// templates from existing code.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a single component, hook, styles, or file
    #[command(subcommand)]
    Generate(commands::generate::GenerateCommands),
    /// Run, analyze, or build presets
    #[command(subcommand)]
    Preset(commands::preset::PresetCommands),
    /// List available presets and template overrides
    List(commands::list::ListArgs),
}

/// Maps the `-v` count to a default log filter; `RUST_LOG` overrides.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run_command(cli.command).await {
        // The full context chain, one cause per line.
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

async fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Generate(cmd) => commands::generate::handle_generate(cmd).await,
        Commands::Preset(cmd) => commands::preset::handle_preset(cmd).await,
        Commands::List(args) => commands::list::handle_list(args).await,
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate_component() {
        let cli = Cli::try_parse_from([
            "fsdgen", "generate", "component", "UserCard", "-l", "entity", "-s", "User",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Generate(_)));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_parses_preset_run_with_verbosity() {
        let cli = Cli::try_parse_from(["fsdgen", "-vv", "preset", "run", "crud", "User"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Preset(_)));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["fsdgen"]).is_err());
    }
}
