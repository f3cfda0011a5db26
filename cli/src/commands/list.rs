//! # FsdGen List Command
//!
//! File: cli/src/commands/list.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Handles `fsdgen list`: enumerates the presets available under the
//! configured templates directory and the template override trees that
//! shadow the built-in templates. Purely informational; nothing is written.
//!
use crate::commands::preset::run::{self, PresetDefinition};
use crate::common::fs::io;
use crate::core::config;
use crate::core::error::Result;
use clap::Parser;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Arguments for `fsdgen list`.
#[derive(Parser, Debug)]
pub struct ListArgs {}

/// Handles the `list` command.
pub async fn handle_list(_args: ListArgs) -> Result<()> {
    info!("Listing presets and template overrides...");
    let cfg = config::load_config()?;

    let Some(templates_dir) = cfg.templates_path() else {
        println!("No templates_dir configured; only built-in templates are available.");
        return Ok(());
    };
    if !templates_dir.is_dir() {
        println!(
            "Configured templates directory {} does not exist; only built-in templates are available.",
            templates_dir.display()
        );
        return Ok(());
    }

    print_presets(&templates_dir)?;
    print_overrides(&templates_dir)?;
    Ok(())
}

/// Lists `<templates_dir>/preset/<name>` directories with a definition
/// summary per preset.
fn print_presets(templates_dir: &Path) -> Result<()> {
    let preset_root = templates_dir.join("preset");
    let names = sorted_subdirs(&preset_root);

    println!("Presets ({}):", preset_root.display());
    if names.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for name in names {
        let definition_path = preset_root.join(&name).join(run::PRESET_CONFIG_FILENAME);
        match load_definition(&definition_path) {
            Some(def) => println!("  {name}  [{}]", summarize(&def)),
            None => println!("  {name}  [no preset.toml]"),
        }
    }
    Ok(())
}

/// Lists top-level override directories (everything except `preset`).
fn print_overrides(templates_dir: &Path) -> Result<()> {
    let mut overrides = sorted_subdirs(templates_dir);
    overrides.retain(|n| n != "preset");

    println!("Template overrides ({}):", templates_dir.display());
    if overrides.is_empty() {
        println!("  (none; built-in templates apply)");
    }
    for name in overrides {
        println!("  {name}/");
    }
    Ok(())
}

fn sorted_subdirs(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Best-effort definition load for display; parse failures are shown as
/// missing rather than aborting the listing.
fn load_definition(path: &Path) -> Option<PresetDefinition> {
    let content = io::read_file_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(def) => Some(def),
        Err(e) => {
            debug!("Failed to parse {}: {e}", path.display());
            None
        }
    }
}

fn summarize(def: &PresetDefinition) -> String {
    match def.discovery {
        run::Discovery::Auto => "auto discovery".to_string(),
        run::Discovery::Manual => format!("{} action(s)", def.actions.len()),
    }
}
