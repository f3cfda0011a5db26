//! # FsdGen Preset Build Command
//!
//! File: cli/src/commands/preset/build.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Second half of the reverse pipeline: `fsdgen preset build <dir>` replays
//! the token maps recorded by analyze over the original source files,
//! substituting every literal occurrence with its placeholder
//! (longest-match-first) in both content and relative path, and emits a
//! runnable preset directory.
//!
//! ## Output modes
//!
//! - **ejected**: every discovered file becomes one explicit `file` action
//!   in the generated `preset.toml`, with a tokenized destination path
//!   under the conventional layer directory and its template stored under
//!   `files/` in the output tree.
//! - **short**: the layer roots' basenames are compared against the subject
//!   token to infer per-layer slice prefixes/suffixes (a feature root of
//!   `ManageUser` with subject `User` yields `feature_prefix = "Manage"`),
//!   template files are laid out in the auto-discovery convention, and the
//!   emitted `preset.toml` delegates to discovery instead of enumerating
//!   files. Directories holding a single code file have it renamed to
//!   `Component.<ext>` so the template loader finds it.
//!
//! Mode priority: `--mode` flag, then the source config's `mode`, then
//! `ejected`.
//!
//! A missing source root or file is a warning and a skip, never an abort; a
//! single stale entry must not sink the rest of the build.
//!
use super::analyze::{self, GeneratedPreset, PresetConfigFile};
use super::run::{Discovery, NamingConventions, PresetActionDef, PresetDefinition};
use super::sources::{self, BuildMode, PresetSourceItem, SourceConfig};
use crate::commands::generate::action::ActionKind;
use crate::common::fs::io;
use crate::core::error::Result;
use crate::core::paths::FsdLayer;
use crate::core::template::VarMap;
use crate::core::tokens;
use anyhow::Context;
use clap::Parser;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Arguments for `fsdgen preset build`.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Preset source directory containing source.toml and
    /// preset.generated.toml
    pub dir: PathBuf,

    /// Output mode override
    #[arg(long, value_enum)]
    pub mode: Option<BuildMode>,

    /// Output directory (defaults to <dir>/preset)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Handles the `preset build` command.
pub async fn handle_build(args: BuildArgs) -> Result<()> {
    info!("Building preset from {:?}...", args.dir);
    let config = analyze::load_source_config(&args.dir)?;
    let generated = load_generated_preset(&args.dir)?;

    let mode = args.mode.or(config.mode).unwrap_or(BuildMode::Ejected);
    let output = args
        .output
        .unwrap_or_else(|| args.dir.join("preset"));

    let written = build_preset(&args.dir, &output, &config, &generated, mode)?;
    println!(
        "Built {:?} preset with {} template file(s) at {}",
        mode,
        written,
        output.display()
    );
    Ok(())
}

/// Loads `<dir>/preset.generated.toml`. A missing artifact is fatal: build
/// without analyze has nothing to work from.
fn load_generated_preset(dir: &Path) -> Result<GeneratedPreset> {
    let path = dir.join(analyze::GENERATED_PRESET_FILENAME);
    let content = io::read_file_to_string(&path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse generated preset {}", path.display()))
}

/// One buildable entry after source matching: the entry plus its tokenized
/// content and destination path.
struct BuiltFile<'a> {
    entry: &'a PresetConfigFile,
    item: &'a PresetSourceItem,
    tokenized_path: String,
    tokenized_content: String,
}

/// Matches each generated entry to its source item and tokenizes it.
/// Missing roots and missing files are skipped with a warning.
fn collect_built_files<'a>(
    preset_dir: &Path,
    config: &SourceConfig,
    items: &'a [PresetSourceItem],
    generated: &'a GeneratedPreset,
) -> Result<Vec<BuiltFile<'a>>> {
    let mut built = Vec::new();
    for entry in &generated.files {
        // Layer first; when several roots share the layer, the recorded
        // source_root picks the right one.
        let item = items.iter().find(|i| {
            i.target_layer == entry.target_layer
                && entry
                    .source_root
                    .as_ref()
                    .map_or(true, |sr| *sr == i.root)
        });
        let Some(item) = item else {
            warn!(
                "No source root matches entry '{}' (layer {}); skipping.",
                entry.path, entry.target_layer
            );
            continue;
        };

        let src = sources::resolve_source_root(preset_dir, config.global_root.as_ref(), &item.root)
            .join(&entry.path);
        if !src.is_file() {
            warn!("Source file {:?} is missing; skipping.", src);
            continue;
        }
        let bytes =
            fs::read(&src).with_context(|| format!("Failed to read source file {:?}", src))?;
        let content = String::from_utf8_lossy(&bytes);

        built.push(BuiltFile {
            entry,
            item,
            tokenized_path: tokens::apply_tokens(&entry.path, &entry.tokens),
            tokenized_content: tokens::apply_tokens(&content, &entry.tokens),
        });
    }
    Ok(built)
}

/// Builds the preset directory. Returns the number of template files written.
pub fn build_preset(
    preset_dir: &Path,
    output: &Path,
    config: &SourceConfig,
    generated: &GeneratedPreset,
    mode: BuildMode,
) -> Result<usize> {
    let items = sources::normalize_layers(config)?;
    let built = collect_built_files(preset_dir, config, &items, generated)?;

    let (definition, count) = match mode {
        BuildMode::Ejected => build_ejected(output, &built)?,
        BuildMode::Short => build_short(output, &generated.subject, &items, &built)?,
    };

    let serialized = toml::to_string_pretty(&definition)
        .context("Failed to serialize built preset definition")?;
    io::write_string_to_file(&output.join(super::run::PRESET_CONFIG_FILENAME), &serialized)?;
    Ok(count)
}

/// The tokenized slice segment for an item: its resolved basename with the
/// subject occurrences replaced by placeholders (e.g. `Manage{{entityName}}`).
fn tokenized_slice(item: &PresetSourceItem, entry: &PresetConfigFile) -> String {
    tokens::apply_tokens(&item.resolved_name, &entry.tokens)
}

/// Ejected mode: one explicit `file` action per built file.
fn build_ejected(output: &Path, built: &[BuiltFile<'_>]) -> Result<(PresetDefinition, usize)> {
    let mut actions = Vec::new();
    for file in built {
        let layer = file.entry.target_layer;
        let template_rel = format!(
            "files/{}/{}/{}",
            layer.as_str(),
            file.item.resolved_name,
            file.tokenized_path
        );
        io::write_string_to_file(&output.join(&template_rel), &file.tokenized_content)?;

        let dest = format!(
            "{}/{}/{}",
            layer.plural_dir(),
            tokenized_slice(file.item, file.entry),
            file.tokenized_path
        );
        actions.push(PresetActionDef {
            kind: ActionKind::File,
            layer: Some(layer.as_str().to_string()),
            slice: None,
            name: file.tokenized_path.clone(),
            path: Some(dest),
            template: Some(template_rel),
            variables: VarMap::new(),
        });
    }

    let count = actions.len();
    let definition = PresetDefinition {
        discovery: Discovery::Manual,
        actions,
        ..Default::default()
    };
    Ok((definition, count))
}

/// Infers per-layer slice conventions by comparing each root basename with
/// the subject: `ManageUser` vs `User` yields a `Manage` prefix,
/// `UserTable` a `Table` suffix. Basenames not containing the subject leave
/// the convention unset (with a warning).
fn infer_conventions(subject: &str, items: &[PresetSourceItem]) -> NamingConventions {
    let mut conv = NamingConventions::default();
    for item in items {
        let basename = Path::new(&item.root)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| item.root.clone());
        let (prefix, suffix) = if basename == subject {
            (None, None)
        } else if let Some(p) = basename.strip_suffix(subject) {
            (Some(p.to_string()), None)
        } else if let Some(s) = basename.strip_prefix(subject) {
            (None, Some(s.to_string()))
        } else {
            warn!(
                "Root basename '{basename}' does not contain subject '{subject}'; \
                 no naming convention inferred for layer {}.",
                item.target_layer
            );
            continue;
        };

        let slot = match item.target_layer {
            FsdLayer::Entity => (&mut conv.entity_prefix, &mut conv.entity_suffix),
            FsdLayer::Feature => (&mut conv.feature_prefix, &mut conv.feature_suffix),
            FsdLayer::Widget => (&mut conv.widget_prefix, &mut conv.widget_suffix),
            FsdLayer::Page => (&mut conv.page_prefix, &mut conv.page_suffix),
            FsdLayer::Shared => continue,
        };
        // First declaration per layer wins.
        if slot.0.is_none() && slot.1.is_none() {
            *slot.0 = prefix.filter(|p| !p.is_empty());
            *slot.1 = suffix.filter(|s| !s.is_empty());
        }
    }
    conv
}

/// True for extensions the template loader treats as code templates.
fn is_code_extension(ext: &str) -> bool {
    matches!(ext, "ts" | "tsx" | "js")
}

/// Short mode: template files in the auto-discovery layout plus an
/// auto-discovery preset definition with inferred naming conventions.
fn build_short(
    output: &Path,
    subject: &str,
    items: &[PresetSourceItem],
    built: &[BuiltFile<'_>],
) -> Result<(PresetDefinition, usize)> {
    // Group by destination directory so single-code-file directories can be
    // renamed to the Component.* names the loader expects.
    let mut by_dir: BTreeMap<PathBuf, Vec<&BuiltFile<'_>>> = BTreeMap::new();
    for file in built {
        let rel = Path::new(&file.tokenized_path);
        let dir = output
            .join(file.entry.target_layer.as_str())
            .join(rel.parent().unwrap_or_else(|| Path::new("")));
        by_dir.entry(dir).or_default().push(file);
    }

    let mut count = 0;
    for (dir, files) in &by_dir {
        let code_files: Vec<&&BuiltFile<'_>> = files
            .iter()
            .filter(|f| {
                let p = Path::new(&f.tokenized_path);
                !is_styles_file(p)
                    && p.extension()
                        .map_or(false, |e| is_code_extension(&e.to_string_lossy()))
            })
            .collect();

        for file in files {
            let rel = Path::new(&file.tokenized_path);
            let file_name = rel
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file.tokenized_path.clone());
            let ext = rel
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_default();

            let dest_name = if is_styles_file(rel) {
                format!("Component.styles.{ext}")
            } else if code_files.len() == 1 && is_code_extension(&ext) {
                format!("Component.{ext}")
            } else {
                if is_code_extension(&ext) {
                    debug!(
                        "Directory {:?} holds multiple code files; keeping '{}' as-is.",
                        dir, file_name
                    );
                }
                file_name
            };
            io::write_string_to_file(&dir.join(dest_name), &file.tokenized_content)?;
            count += 1;
        }
    }

    let definition = PresetDefinition {
        discovery: Discovery::Auto,
        naming: infer_conventions(subject, items),
        ..Default::default()
    };
    Ok((definition, count))
}

/// True when the filename carries a `.styles.` infix.
fn is_styles_file(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().contains(".styles."))
        .unwrap_or(false)
}
