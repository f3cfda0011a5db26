//! # FsdGen Generate Component Command
//!
//! File: cli/src/commands/generate/component.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Handles `fsdgen generate component`: one UI component under the FSD
//! layout (primary `.tsx`, optional `.styles.ts`, two-tier barrels), or at
//! an explicit `--path` that bypasses the layout.
//!
use super::action::{self, ActionKind, GenAction};
use super::parse_key_val;
use crate::core::config;
use crate::core::error::Result;
use crate::core::template::{TemplateLoader, VarMap};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `fsdgen generate component`.
#[derive(Parser, Debug)]
pub struct ComponentArgs {
    /// Component name (PascalCase by convention)
    pub name: String,

    /// Target FSD layer (entity, feature, widget, page, shared, or ad hoc)
    #[arg(short, long)]
    pub layer: String,

    /// Slice name; may be nested (e.g. auth/login)
    #[arg(short, long)]
    pub slice: String,

    /// Extra template variables (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// Explicit destination path, bypassing the layer layout
    #[arg(long)]
    pub path: Option<String>,

    /// Explicit template file instead of the (layer, kind) lookup
    #[arg(long)]
    pub template: Option<PathBuf>,
}

/// Handles the `generate component` command.
pub async fn handle_component(args: ComponentArgs) -> Result<()> {
    info!("Generating component '{}'...", args.name);
    let cfg = config::load_config()?;
    let loader = TemplateLoader::new(cfg.templates_path());

    let action = GenAction {
        kind: ActionKind::Component,
        layer: args.layer,
        slice: args.slice.clone(),
        name: args.name.clone(),
        path: args.path,
        template_file: args.template,
        template_kind: None,
    };
    // For one-shot generation the slice is the entity.
    let naming_tier = action::naming_vars(&args.name, &args.slice);
    let action_vars: VarMap = args.vars.into_iter().collect();
    let vars = action::cascade_vars(naming_tier, &VarMap::new(), &action_vars);

    let outcome = action::execute_action(&cfg, &loader, &action, &vars).await?;
    action::print_completion_message(&outcome);
    Ok(())
}
