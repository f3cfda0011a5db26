//! # FsdGen Configuration System
//!
//! File: cli/src/core/config.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! This module implements the configuration system for fsdgen, handling
//! loading, merging, validation, and access to configuration data. The
//! generation pipelines consume a validated `Config` value; they never read
//! configuration files themselves.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.fsdgen.toml` in the current directory or ancestors
//!    (the search stops at the repository boundary, i.e. a `.git` directory)
//! 2. User-specific `~/.config/fsdgen/config.toml`
//! 3. Default values defined in the code
//!
//! Paths are expanded (`~` to the home directory) and the result is
//! validated before use.
//!
//! ## Schema
//!
//! ```toml
//! root_dir = "src"              # where generated slices land
//! templates_dir = "~/fsd/tpl"   # custom template/preset tree (optional)
//! naming = "warn"               # "error" | "warn" | "autoFix"
//!
//! [aliases]
//! "@" = "src"                   # import aliases for route injection
//! ```
//!
use crate::core::error::{FsdgenError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// How component/slice names that violate the PascalCase convention are
/// treated by the generation dispatcher.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NamingPolicy {
    /// Reject the request with a fatal error.
    #[serde(rename = "error")]
    Error,
    /// Warn and continue with the name as given.
    #[default]
    #[serde(rename = "warn")]
    Warn,
    /// Silently convert the name to PascalCase.
    #[serde(rename = "autoFix")]
    AutoFix,
}

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct Config {
    /// Source root that generated slices are written under.
    #[serde(default = "default_root_dir")]
    pub root_dir: String,
    /// Import aliases (alias -> directory), used to shorten import paths in
    /// route injection. E.g. `"@" = "src"` turns `src/pages/Home` into
    /// `@/pages/Home`.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    /// Custom template/preset tree (can use ~). Expanded during load.
    /// Custom templates always win over the built-in fallback set.
    #[serde(default)]
    pub templates_dir: Option<String>,
    /// Naming-convention enforcement policy.
    #[serde(default)]
    pub naming: NamingPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            aliases: HashMap::new(),
            templates_dir: None,
            naming: NamingPolicy::default(),
        }
    }
}

impl Config {
    /// The templates directory as a path, when configured.
    pub fn templates_path(&self) -> Option<PathBuf> {
        self.templates_dir.as_ref().map(PathBuf::from)
    }

    /// Rewrites `path` to its aliased import form when a configured alias
    /// directory is a prefix of it (longest alias directory wins).
    /// Returns the path unchanged when no alias applies.
    pub fn apply_alias(&self, path: &str) -> String {
        let mut best: Option<(&str, &str)> = None;
        for (alias, dir) in &self.aliases {
            let matches = path == dir || path.starts_with(&format!("{dir}/"));
            if matches && best.map_or(true, |(_, d)| dir.len() > d.len()) {
                best = Some((alias, dir));
            }
        }
        match best {
            Some((alias, dir)) => format!("{alias}{}", &path[dir.len()..]),
            None => path.to_string(),
        }
    }
}

fn default_root_dir() -> String {
    "src".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".fsdgen.toml";

/// Loads, merges, expands, and validates the configuration.
pub fn load_config() -> Result<Config> {
    let user = load_user_config()?;
    let project = load_project_config()?;
    let mut merged = merge_configs(user.unwrap_or_default(), project);
    expand_config_paths(&mut merged);
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Effective configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "FsdGen", "fsdgen") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user config: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!("No user config at {}", config_path.display());
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    if let Some(path) = find_project_config_path()? {
        info!("Loading project config: {}", path.display());
        load_config_from_path(&path).map(Some)
    } else {
        debug!("No .fsdgen.toml found in the current directory or its ancestors.");
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let start = std::env::current_dir().context("Could not determine the current directory")?;
    let mut path: &Path = &start;
    loop {
        let candidate = path.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
        // A .git directory marks the repository boundary; a project above it
        // is someone else's project.
        let git_dir = path.join(".git");
        if git_dir.is_dir() {
            debug!(
                "Repository boundary at {}; stopping the config search.",
                path.display()
            );
            return Ok(None);
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => break,
        }
    }
    Ok(None)
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Invalid TOML in config file {}", path.display()))
}

/// Field-wise merge: a project value wins whenever it differs from the
/// built-in default (the project file stated it explicitly or restated the
/// default, which is equivalent).
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.root_dir = if project_cfg.root_dir != default_root_dir() {
        project_cfg.root_dir
    } else {
        user.root_dir
    };
    merged.aliases = if !project_cfg.aliases.is_empty() {
        project_cfg.aliases
    } else {
        user.aliases
    };
    merged.templates_dir = project_cfg.templates_dir.or(user.templates_dir);
    merged.naming = if project_cfg.naming != NamingPolicy::default() {
        project_cfg.naming
    } else {
        user.naming
    };
    merged
}

fn expand_config_paths(config: &mut Config) {
    if let Some(dir) = &config.templates_dir {
        let expanded = shellexpand::tilde(dir).into_owned();
        debug!("Expanded templates directory: {expanded}");
        config.templates_dir = Some(expanded);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating merged configuration...");
    if config.root_dir.is_empty() {
        return Err(anyhow!(FsdgenError::Config(
            "root_dir cannot be empty".to_string()
        )));
    }
    if let Some(dir) = &config.templates_dir {
        let tpl_dir = PathBuf::from(dir);
        if !tpl_dir.exists() {
            warn!(
                "Configured templates directory '{}' does not exist.",
                tpl_dir.display()
            );
        } else if !tpl_dir.is_dir() {
            return Err(anyhow!(FsdgenError::Config(format!(
                "Configured templates path '{}' exists but is not a directory.",
                tpl_dir.display()
            ))));
        }
    }
    for (alias, dir) in &config.aliases {
        if alias.is_empty() || dir.is_empty() {
            return Err(anyhow!(FsdgenError::Config(format!(
                "Alias entries cannot be empty (alias: '{alias}', dir: '{dir}')."
            ))));
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_full_schema() {
        let source = r#"
            root_dir = "app/src"
            naming = "autoFix"

            [aliases]
            "@" = "app/src"
        "#;

        let config: Config = toml::from_str(source).expect("valid schema");

        assert_eq!(config.root_dir, "app/src");
        assert_eq!(config.naming, NamingPolicy::AutoFix);
        assert_eq!(config.aliases.get("@").unwrap(), "app/src");
        assert!(config.templates_dir.is_none());
    }

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.root_dir, "src");
        assert_eq!(config.naming, NamingPolicy::Warn);
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("no_such_key = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_tilde_expansion() {
        let mut config = Config {
            templates_dir: Some("~/fsd_templates".to_string()),
            ..Default::default()
        };
        expand_config_paths(&mut config);
        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.templates_dir.unwrap(),
            home_dir.join("fsd_templates").to_string_lossy()
        );
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user = Config {
            root_dir: "user/src".into(),
            naming: NamingPolicy::Error,
            ..Default::default()
        };
        let project = Config {
            root_dir: "proj/src".into(),
            ..Default::default()
        };
        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.root_dir, "proj/src");
        // Project left naming at default, so the user setting survives.
        assert_eq!(merged.naming, NamingPolicy::Error);
    }

    #[test]
    fn test_validate_config_templates_path_is_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("not_a_dir");
        fs::write(&file_path, "").unwrap();

        let config = Config {
            templates_dir: Some(file_path.to_string_lossy().to_string()),
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("is not a directory"));
    }

    #[test]
    fn test_validate_config_empty_root() {
        let config = Config {
            root_dir: String::new(),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_apply_alias() {
        let mut aliases = HashMap::new();
        aliases.insert("@".to_string(), "src".to_string());
        aliases.insert("@pages".to_string(), "src/pages".to_string());
        let config = Config {
            aliases,
            ..Default::default()
        };
        // Longest alias directory wins.
        assert_eq!(config.apply_alias("src/pages/Home"), "@pages/Home");
        assert_eq!(config.apply_alias("src/entities/User"), "@/entities/User");
        assert_eq!(config.apply_alias("lib/other"), "lib/other");
    }
}
