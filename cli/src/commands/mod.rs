//! # FsdGen Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Declares the command groups of the CLI. Each group owns its argument
//! structs and handlers; `main.rs` routes parsed arguments here.
//!

/// Forward pipeline: one-shot generation commands.
pub mod generate;

/// Informational listing of presets and template overrides.
pub mod list;

/// Preset lifecycle: run, analyze, build.
pub mod preset;
