//! # FsdGen Generate Hook Command
//!
//! File: cli/src/commands/generate/hook.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! Handles `fsdgen generate hook`: one hook file (`.ts`) under the FSD
//! layout plus the two-tier barrels. Hook names are camelCase by convention
//! and are exempt from the PascalCase naming policy.
//!
use super::action::{self, ActionKind, GenAction};
use super::parse_key_val;
use crate::core::config;
use crate::core::error::Result;
use crate::core::template::{TemplateLoader, VarMap};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `fsdgen generate hook`.
#[derive(Parser, Debug)]
pub struct HookArgs {
    /// Hook name (e.g. useGetUser)
    pub name: String,

    /// Target FSD layer
    #[arg(short, long)]
    pub layer: String,

    /// Slice name
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

/// Handles the `generate hook` command.
pub async fn handle_hook(args: HookArgs) -> Result<()> {
    info!("Generating hook '{}'...", args.name);
    let cfg = config::load_config()?;
    let loader = TemplateLoader::new(cfg.templates_path());

    let action = GenAction {
        kind: ActionKind::Hook,
        layer: args.layer,
        slice: args.slice.clone(),
        name: args.name.clone(),
        path: args.path,
        template_file: args.template,
        template_kind: None,
    };
    let naming_tier = action::naming_vars(&args.name, &args.slice);
    let action_vars: VarMap = args.vars.into_iter().collect();
    let vars = action::cascade_vars(naming_tier, &VarMap::new(), &action_vars);

    let outcome = action::execute_action(&cfg, &loader, &action, &vars).await?;
    action::print_completion_message(&outcome);
    Ok(())
}
