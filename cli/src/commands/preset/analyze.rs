//! # FsdGen Preset Analyze Command
//!
//! File: cli/src/commands/preset/analyze.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! First half of the reverse pipeline: `fsdgen preset analyze <dir>` reads
//! the directory's `source.toml`, walks every configured source root, and
//! records for each discovered file which naming variants of the subject
//! occur in it. The result is written as `preset.generated.toml`, the
//! durable interchange artifact the build step consumes.
//!
//! ## Architecture
//!
//! - The subject is derived from the entity-layer root's basename
//!   (singularized), falling back to the first normalized item. Individual
//!   roots contribute their collision-resolved basename as the per-item
//!   resolved name.
//! - Every file under a root is scanned, stylesheets and other non-code
//!   assets included; file bytes are decoded lossily so the scan never
//!   chokes on stray non-UTF-8 content.
//! - Tokens are identified in the file content and in its relative path, so
//!   a file whose only subject occurrence is its own name still gets a
//!   parameterized destination at build time.
//! - Entries rediscovered at the same `(source_root, path)` merge their
//!   token maps; two entries disagreeing about the token for one identical
//!   source substring are a hard validation error, never silent
//!   last-write-wins.
//!
use super::sources::{self, SourceConfig};
use crate::common::fs::io;
use crate::core::error::{FsdgenError, Result};
use crate::core::naming;
use crate::core::paths::FsdLayer;
use crate::core::tokens::{self, NameVariations, TokenMap};
use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Filename of the source configuration inside a preset source directory.
pub const SOURCE_CONFIG_FILENAME: &str = "source.toml";

/// Filename of the generated analysis artifact.
pub const GENERATED_PRESET_FILENAME: &str = "preset.generated.toml";

/// One analyzed file: relative path, destination layer, token map, and the
/// root it came from (disambiguates multiple roots sharing a layer).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PresetConfigFile {
    pub path: String,
    pub target_layer: FsdLayer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    #[serde(default)]
    pub tokens: TokenMap,
}

/// The `preset.generated.toml` artifact.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GeneratedPreset {
    /// The PascalCase subject the token maps were derived against.
    pub subject: String,
    #[serde(default)]
    pub files: Vec<PresetConfigFile>,
}

/// Arguments for `fsdgen preset analyze`.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Preset source directory containing source.toml
    pub dir: PathBuf,
}

/// Handles the `preset analyze` command.
pub async fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    info!("Analyzing preset sources in {:?}...", args.dir);
    let config = load_source_config(&args.dir)?;
    let generated = analyze_sources(&args.dir, &config)?;

    let artifact_path = args.dir.join(GENERATED_PRESET_FILENAME);
    let serialized = toml::to_string_pretty(&generated)
        .context("Failed to serialize generated preset definition")?;
    io::write_string_to_file(&artifact_path, &serialized)?;

    println!(
        "Analyzed {} file(s) for subject '{}'.",
        generated.files.len(),
        generated.subject
    );
    println!("Wrote {}", artifact_path.display());
    Ok(())
}

/// Loads and parses `<dir>/source.toml`. Missing config is fatal.
pub fn load_source_config(dir: &Path) -> Result<SourceConfig> {
    let path = dir.join(SOURCE_CONFIG_FILENAME);
    let content = io::read_file_to_string(&path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse source config {}", path.display()))
}

/// Derives the analysis subject: the entity-layer root's singularized
/// basename, or the first item when no entity root is declared.
fn derive_subject(items: &[sources::PresetSourceItem]) -> Result<String> {
    let item = items
        .iter()
        .find(|i| i.target_layer == FsdLayer::Entity)
        .or_else(|| items.first())
        .ok_or_else(|| {
            FsdgenError::Preset("Source config produced no source items".to_string())
        })?;
    let basename = Path::new(&item.root)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| item.root.clone());
    Ok(naming::to_pascal_case(&naming::singularize(&basename)))
}

/// Walks every normalized source root and produces the generated preset.
pub fn analyze_sources(preset_dir: &Path, config: &SourceConfig) -> Result<GeneratedPreset> {
    let items = sources::normalize_layers(config)?;
    let subject = derive_subject(&items)?;
    let variations = NameVariations::new(&subject);
    debug!("Analysis subject: {subject}");

    // Keyed by (source_root, path); rediscovered entries merge token maps.
    let mut entries: BTreeMap<(String, String), PresetConfigFile> = BTreeMap::new();

    for item in &items {
        let root_path =
            sources::resolve_source_root(preset_dir, config.global_root.as_ref(), &item.root);
        if !root_path.is_dir() {
            return Err(FsdgenError::Preset(format!(
                "Source root '{}' does not exist (resolved from '{}')",
                root_path.display(),
                item.root
            )))?;
        }

        for entry in WalkDir::new(&root_path) {
            let entry = entry.with_context(|| {
                format!("Failed to walk source root {}", root_path.display())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel_path = entry
                .path()
                .strip_prefix(&root_path)
                .context("Walked entry is outside its root")?
                .to_string_lossy()
                .replace('\\', "/");
            if is_ignored(&rel_path, &config.options.ignore) {
                debug!("Ignoring {rel_path}");
                continue;
            }

            // Lossy decode: stylesheets, SVGs and the odd latin-1 straggler
            // all get scanned for literal occurrences.
            let bytes = fs::read(entry.path())
                .with_context(|| format!("Failed to read source file {:?}", entry.path()))?;
            let content = String::from_utf8_lossy(&bytes);

            let mut file_tokens =
                tokens::identify_tokens(&content, &item.resolved_name, &variations);
            let path_tokens = tokens::identify_tokens(&rel_path, &item.resolved_name, &variations);
            merge_token_maps(&mut file_tokens, path_tokens, &rel_path)?;

            let key = (item.root.clone(), rel_path.clone());
            match entries.get_mut(&key) {
                Some(existing) => {
                    let (_, path) = &key;
                    merge_token_maps(&mut existing.tokens, file_tokens, path)?;
                }
                None => {
                    entries.insert(
                        key,
                        PresetConfigFile {
                            path: rel_path,
                            target_layer: item.target_layer,
                            source_root: Some(item.root.clone()),
                            tokens: file_tokens,
                        },
                    );
                }
            }
        }
    }

    Ok(GeneratedPreset {
        subject,
        files: entries.into_values().collect(),
    })
}

/// True when any configured ignore fragment occurs in the relative path.
fn is_ignored(rel_path: &str, ignore: &[String]) -> bool {
    ignore.iter().any(|frag| !frag.is_empty() && rel_path.contains(frag))
}

/// Unions `incoming` into `target`. Conflicting tokens for the identical
/// source substring fail validation.
fn merge_token_maps(target: &mut TokenMap, incoming: TokenMap, path: &str) -> Result<()> {
    for (literal, token) in incoming {
        match target.get(&literal) {
            Some(existing) if *existing != token => {
                return Err(FsdgenError::TokenConflict {
                    substring: literal,
                    path: path.to_string(),
                })?;
            }
            _ => {
                target.insert(literal, token);
            }
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokens::EntityToken;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn entity_config(root: &str) -> SourceConfig {
        toml::from_str(&format!(
            "root = \"{root}\"\ntarget_layer = \"entity\"\n"
        ))
        .unwrap()
    }

    #[test]
    fn test_analyze_records_tokens_per_file() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("User");
        write(&root.join("ui/User.tsx"), "export const User = () => user;");
        write(&root.join("model/types.ts"), "export interface User {}");

        let generated = analyze_sources(dir.path(), &entity_config("User"))?;
        assert_eq!(generated.subject, "User");
        assert_eq!(generated.files.len(), 2);

        let ui = generated
            .files
            .iter()
            .find(|f| f.path == "ui/User.tsx")
            .unwrap();
        assert_eq!(ui.target_layer, FsdLayer::Entity);
        assert_eq!(ui.tokens.get("User"), Some(&EntityToken::EntityName));
        assert_eq!(ui.tokens.get("user"), Some(&EntityToken::EntityNameCamel));
        Ok(())
    }

    #[test]
    fn test_filename_only_occurrence_is_tokenized() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("User");
        // No occurrence in content; the path still carries the subject.
        write(&root.join("ui/User.styles.css"), ".card { color: red; }");

        let generated = analyze_sources(dir.path(), &entity_config("User"))?;
        let entry = &generated.files[0];
        assert_eq!(entry.tokens.get("User"), Some(&EntityToken::EntityName));
        Ok(())
    }

    #[test]
    fn test_longer_occurrence_not_dropped() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("User");
        write(&root.join("ui/UserProfile.tsx"), "export const UserProfile = 1;");

        let generated = analyze_sources(dir.path(), &entity_config("User"))?;
        let entry = &generated.files[0];
        // "User" occurs (as a prefix of UserProfile) and must be recorded;
        // build-time longest-match ordering keeps the suffix intact.
        assert_eq!(entry.tokens.get("User"), Some(&EntityToken::EntityName));
        Ok(())
    }

    #[test]
    fn test_subject_prefers_entity_layer_and_singularizes() -> Result<()> {
        let dir = tempdir()?;
        write(&dir.path().join("src/ManageUsers/a.ts"), "x");
        write(&dir.path().join("src/Users/b.ts"), "x");

        let config: SourceConfig = toml::from_str(
            r#"
            [[layers]]
            root = "src/ManageUsers"
            target_layer = "feature"

            [[layers]]
            root = "src/Users"
            target_layer = "entity"
        "#,
        )
        .unwrap();
        let generated = analyze_sources(dir.path(), &config)?;
        assert_eq!(generated.subject, "User");
        Ok(())
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = tempdir().unwrap();
        let result = analyze_sources(dir.path(), &entity_config("nope"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_ignore_fragments() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("User");
        write(&root.join("ui/User.tsx"), "User");
        write(&root.join("node_modules/dep/index.js"), "User");

        let mut config = entity_config("User");
        config.options.ignore = vec!["node_modules".to_string()];
        let generated = analyze_sources(dir.path(), &config)?;
        assert_eq!(generated.files.len(), 1);
        assert_eq!(generated.files[0].path, "ui/User.tsx");
        Ok(())
    }

    #[test]
    fn test_merge_conflict_is_hard_error() {
        let mut target = TokenMap::from([("User".to_string(), EntityToken::EntityName)]);
        let incoming = TokenMap::from([("User".to_string(), EntityToken::Name)]);
        let result = merge_token_maps(&mut target, incoming, "ui/User.tsx");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Conflicting token replacements"));
    }

    #[test]
    fn test_artifact_round_trip() -> Result<()> {
        let generated = GeneratedPreset {
            subject: "User".to_string(),
            files: vec![PresetConfigFile {
                path: "ui/User.tsx".to_string(),
                target_layer: FsdLayer::Entity,
                source_root: Some("User".to_string()),
                tokens: TokenMap::from([("User".to_string(), EntityToken::EntityName)]),
            }],
        };
        let serialized = toml::to_string_pretty(&generated).unwrap();
        // The artifact speaks in enum names, not raw placeholder strings.
        assert!(serialized.contains("ENTITY_NAME"));
        assert!(serialized.contains("entity"));
        let back: GeneratedPreset = toml::from_str(&serialized).unwrap();
        assert_eq!(back.files, generated.files);
        Ok(())
    }
}
