//! # FsdGen Preset Source Configuration
//!
//! File: cli/src/commands/preset/sources.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! The layer normalizer of the reverse pipeline. A `source.toml` describes
//! where the code to be reverse-engineered lives (a single root, a layers
//! array, roots that are themselves arbitrarily nested arrays), and this
//! module flattens all of it into a plain list of `(root, target_layer,
//! resolved_name)` items the analyze and build steps iterate over.
//!
//! ## Architecture
//!
//! - `RootSpec` is an untagged recursive TOML value: a scalar or an array of
//!   `RootSpec`. Flattening coerces non-string scalars through their display
//!   form and drops empties.
//! - Basename collisions among flattened roots resolve deterministically in
//!   encounter order: the first occurrence keeps the bare basename, later
//!   duplicates get numeric suffixes starting at 1.
//! - `resolve_source_root` turns a layer root into a concrete path under the
//!   preset directory, honoring an optional `global_root` prefix (when the
//!   global root is itself an array, its first element is used).
//!
use crate::core::error::{FsdgenError, Result};
use crate::core::paths::FsdLayer;
use clap::ValueEnum;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Build output mode, selectable from the CLI or `source.toml`.
#[derive(Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// One explicit file action per discovered file.
    Ejected,
    /// Convention-inferring preset definition with auto-discovery.
    Short,
}

/// A root declaration: a scalar or an arbitrarily nested array of them.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RootSpec {
    // Array variant first: untagged deserialization tries in order.
    Many(Vec<RootSpec>),
    One(toml::Value),
}

impl RootSpec {
    /// Flattens to a list of non-empty strings. Non-string scalars are
    /// coerced through their display form; empty strings are dropped.
    pub fn flatten(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<String>) {
        match self {
            RootSpec::Many(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
            RootSpec::One(value) => {
                let s = match value {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                if !s.is_empty() {
                    out.push(s);
                }
            }
        }
    }
}

/// One `[[layers]]` entry.
#[derive(Deserialize, Debug, Clone)]
pub struct LayerSource {
    pub root: RootSpec,
    pub target_layer: FsdLayer,
}

/// Analysis options.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SourceOptions {
    /// Source language tag, informational only.
    pub language: Option<String>,
    /// Path fragments to skip while scanning (e.g. `node_modules`).
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// The `source.toml` schema.
#[derive(Deserialize, Debug, Clone)]
pub struct SourceConfig {
    /// Single-root form; requires `target_layer`.
    pub root: Option<RootSpec>,
    pub target_layer: Option<FsdLayer>,
    /// Multi-root form.
    pub layers: Option<Vec<LayerSource>>,
    /// Prefix prepended to every layer root when resolving.
    pub global_root: Option<RootSpec>,
    pub mode: Option<BuildMode>,
    #[serde(default)]
    pub options: SourceOptions,
}

/// One normalized source item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSourceItem {
    /// Root path as declared (relative to the preset dir / global root).
    pub root: String,
    pub target_layer: FsdLayer,
    /// Collision-resolved basename, used as the subject's resolved name.
    pub resolved_name: String,
}

/// Flattens a source config into the list of items analysis iterates over.
///
/// Fails when neither `root` nor `layers` is declared, or when the
/// single-root form omits `target_layer`.
pub fn normalize_layers(config: &SourceConfig) -> Result<Vec<PresetSourceItem>> {
    let mut pairs: Vec<(String, FsdLayer)> = Vec::new();

    if let Some(layers) = &config.layers {
        for layer in layers {
            for root in layer.root.flatten() {
                pairs.push((root, layer.target_layer));
            }
        }
    } else if let Some(root) = &config.root {
        let target_layer = config.target_layer.ok_or_else(|| {
            FsdgenError::Preset(
                "Source config with a top-level 'root' must also declare 'target_layer'"
                    .to_string(),
            )
        })?;
        for r in root.flatten() {
            pairs.push((r, target_layer));
        }
    } else {
        return Err(FsdgenError::Preset(
            "Source config must declare either 'root' or 'layers'".to_string(),
        ))?;
    }

    // Collision resolution is scoped by basename, not full path, and counts
    // in encounter order: User, User1, User2...
    let mut seen: HashMap<String, usize> = HashMap::new();
    let items = pairs
        .into_iter()
        .map(|(root, target_layer)| {
            let basename = Path::new(&root)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| root.clone());
            let count = seen.entry(basename.clone()).or_insert(0);
            let resolved_name = if *count == 0 {
                basename.clone()
            } else {
                format!("{basename}{count}")
            };
            *count += 1;
            PresetSourceItem {
                root,
                target_layer,
                resolved_name,
            }
        })
        .collect();
    Ok(items)
}

/// Resolves a layer root to a concrete path under the preset directory.
///
/// An array-valued `global_root` contributes its first element; join order
/// is `preset_dir/global_root/layer_root`.
pub fn resolve_source_root(
    preset_dir: &Path,
    global_root: Option<&RootSpec>,
    layer_root: &str,
) -> PathBuf {
    let global = global_root
        .map(|g| g.flatten())
        .and_then(|roots| roots.into_iter().next());
    match global {
        Some(g) => preset_dir.join(g).join(layer_root),
        None => preset_dir.join(layer_root),
    }
}
