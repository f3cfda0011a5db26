//! # FsdGen Generate File Command
//!
//! File: cli/src/commands/generate/file.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! Handles `fsdgen generate file`: exactly one file written at an explicit
//! path from an explicit template, with variable substitution applied to
//! both the template content and the destination path. No barrels.
//!
use super::action::{self, ActionKind, GenAction};
use super::parse_key_val;
use crate::core::config;
use crate::core::error::Result;
use crate::core::template::{TemplateLoader, VarMap};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `fsdgen generate file`.
#[derive(Parser, Debug)]
pub struct FileArgs {
    /// Destination path; may contain {{placeholders}}
    #[arg(long)]
    pub path: String,

    /// Template file to render
    #[arg(long)]
    pub template: PathBuf,

    /// Extra template variables (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,
}

/// Handles the `generate file` command.
pub async fn handle_file(args: FileArgs) -> Result<()> {
    info!("Generating file at '{}'...", args.path);
    let cfg = config::load_config()?;
    let loader = TemplateLoader::new(cfg.templates_path());

    let action = GenAction {
        kind: ActionKind::File,
        layer: String::new(),
        slice: String::new(),
        name: args.path.clone(),
        path: Some(args.path),
        template_file: Some(args.template),
        template_kind: None,
    };
    let vars: VarMap = args.vars.into_iter().collect();

    let outcome = action::execute_action(&cfg, &loader, &action, &vars).await?;
    action::print_completion_message(&outcome);
    Ok(())
}
