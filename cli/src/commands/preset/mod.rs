//! # FsdGen Preset Command Group
//!
//! File: cli/src/commands/preset/mod.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Preset lifecycle commands. A preset is a directory of parameterized
//! templates plus a `preset.toml` definition; `run` instantiates it for an
//! entity (the forward pipeline), while `analyze` and `build` derive a new
//! preset from existing source code (the reverse pipeline).
//!
//! ## Usage
//!
//! ```bash
//! fsdgen preset run crud User          # scaffold a full vertical slice
//! fsdgen preset analyze ./my-sources   # scan sources, record token maps
//! fsdgen preset build ./my-sources --mode short
//! ```
//!
use crate::core::error::Result;
use clap::Subcommand;

/// Reverse pipeline, first half: token identification.
pub mod analyze;
/// Reverse pipeline, second half: token substitution and preset emission.
pub mod build;
/// Preset orchestration over the forward pipeline.
pub mod run;
/// Source configuration normalization shared by analyze and build.
pub mod sources;

/// Subcommands under `fsdgen preset`.
#[derive(Subcommand, Debug)]
pub enum PresetCommands {
    /// Run a preset for an entity, generating its files
    Run(run::RunArgs),
    /// Analyze source directories and record a token map artifact
    Analyze(analyze::AnalyzeArgs),
    /// Build a runnable preset from an analysis artifact
    Build(build::BuildArgs),
}

/// Dispatches a `preset` subcommand to its handler.
pub async fn handle_preset(cmd: PresetCommands) -> Result<()> {
    match cmd {
        PresetCommands::Run(args) => run::handle_run(args).await,
        PresetCommands::Analyze(args) => analyze::handle_analyze(args).await,
        PresetCommands::Build(args) => build::handle_build(args).await,
    }
}
