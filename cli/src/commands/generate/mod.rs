//! # FsdGen Generate Command Group
//!
//! File: cli/src/commands/generate/mod.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! One-shot generation commands: `fsdgen generate component|hook|styles|file`.
//! Each subcommand builds a single action, cascades its variables, and hands
//! it to the dispatcher in `action.rs`. Presets drive the same dispatcher
//! with many actions; this group is the single-action surface.
//!
//! ## Usage
//!
//! ```bash
//! fsdgen generate component UserCard --layer entity --slice User
//! fsdgen generate hook useGetUser --layer entity --slice User
//! fsdgen generate styles UserCard --layer entity --slice User
//! fsdgen generate file --path src/shared/config/env.ts --template ./env.tpl
//! fsdgen generate component Card -l entity -s User --var role=admin
//! ```
//!
use crate::core::error::Result;
use clap::Subcommand;

/// The generation dispatcher shared with the preset orchestrator.
pub mod action;

/// `generate component`.
pub mod component;
/// `generate file`.
pub mod file;
/// `generate hook`.
pub mod hook;
/// `generate styles`.
pub mod styles;

/// Subcommands under `fsdgen generate`.
#[derive(Subcommand, Debug)]
pub enum GenerateCommands {
    /// Generate a UI component (primary file, optional styles, barrels)
    Component(component::ComponentArgs),
    /// Generate a hook file and update barrels
    Hook(hook::HookArgs),
    /// Generate a standalone styles file and update barrels
    Styles(styles::StylesArgs),
    /// Generate one file at an explicit path from an explicit template
    File(file::FileArgs),
}

/// Dispatches a `generate` subcommand to its handler.
pub async fn handle_generate(cmd: GenerateCommands) -> Result<()> {
    match cmd {
        GenerateCommands::Component(args) => component::handle_component(args).await,
        GenerateCommands::Hook(args) => hook::handle_hook(args).await,
        GenerateCommands::Styles(args) => styles::handle_styles(args).await,
        GenerateCommands::File(args) => file::handle_file(args).await,
    }
}

/// Parses one `KEY=VALUE` pair for repeatable `--var` flags.
pub(crate) fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in '{s}'"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
