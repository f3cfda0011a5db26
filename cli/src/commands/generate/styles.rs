//! # FsdGen Generate Styles Command
//!
//! File: cli/src/commands/generate/styles.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! Handles `fsdgen generate styles`: one standalone styles file (`.ts`)
//! under the FSD layout plus the two-tier barrels.
//!
use super::action::{self, ActionKind, GenAction};
use super::parse_key_val;
use crate::core::config;
use crate::core::error::Result;
use crate::core::template::{TemplateLoader, VarMap};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `fsdgen generate styles`.
#[derive(Parser, Debug)]
pub struct StylesArgs {
    /// Base name for the styles file
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

/// Handles the `generate styles` command.
pub async fn handle_styles(args: StylesArgs) -> Result<()> {
    info!("Generating styles '{}'...", args.name);
    let cfg = config::load_config()?;
    let loader = TemplateLoader::new(cfg.templates_path());

    let action = GenAction {
        kind: ActionKind::Styles,
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

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_styles_args() {
        let args =
            StylesArgs::try_parse_from(["styles", "UserCard", "-l", "entity", "-s", "User"])
                .unwrap();
        assert_eq!(args.name, "UserCard");
        assert_eq!(args.slice, "User");
    }
}
