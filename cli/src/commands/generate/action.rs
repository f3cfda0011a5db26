//! # FsdGen Generation Dispatcher
//!
//! File: cli/src/commands/generate/action.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! The single choke point every generated file goes through. An action
//! (component, hook, styles, or file) plus its cascaded variable bag comes
//! in; path resolution, template rendering, idempotent writes, and barrel
//! maintenance happen here. Both the one-shot `generate` subcommands and
//! the preset orchestrator dispatch through `execute_action`.
//!
//! ## Architecture
//!
//! - Component names pass the configured naming policy first (`error` bails,
//!   `warn` continues as-is, `autoFix` converts to PascalCase). The policy
//!   applies to `component` actions only; hooks are camelCase by convention.
//! - An explicit `path` on the action bypasses layer-convention resolution
//!   entirely. The path string is still variable-substituted, and for
//!   component-like kinds only the containing directory's barrel is
//!   maintained (there is no slice root to key the second barrel off).
//! - Writes are skip-if-present; a rerun never clobbers edited files.
//! - `component` writes a primary `.tsx` plus a `.styles.ts` sibling when
//!   the rendered styles are non-empty after trimming; `hook` and `styles`
//!   write a single `.ts`; `file` writes exactly one file, no barrels.
//!
use crate::common::fs::io;
use crate::common::mutate::barrel;
use crate::core::config::{Config, NamingPolicy};
use crate::core::error::{FsdgenError, Result};
use crate::core::naming;
use crate::core::paths::resolve_fsd_paths;
use crate::core::template::{process_template, Template, TemplateLoader, VarMap};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The four generation action kinds. Serialized with the lowercase names
/// preset definitions use in their `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Component,
    Hook,
    Styles,
    File,
}

impl ActionKind {
    /// Template kind string used for loader lookup.
    pub fn template_kind(&self) -> &'static str {
        match self {
            ActionKind::Component => "component",
            ActionKind::Hook => "hook",
            ActionKind::Styles => "styles",
            ActionKind::File => "file",
        }
    }

    /// Extension of the primary generated file.
    fn primary_extension(&self) -> &'static str {
        match self {
            ActionKind::Component => "tsx",
            _ => "ts",
        }
    }
}

/// One fully resolved generation action. The `name` is concrete (placeholder
/// rendering of action names happens in the orchestrator); `slice` and
/// `path` may still contain placeholders and are rendered here.
#[derive(Debug, Clone)]
pub struct GenAction {
    pub kind: ActionKind,
    pub layer: String,
    pub slice: String,
    pub name: String,
    /// Explicit destination path; bypasses layer resolution when set.
    pub path: Option<String>,
    /// Explicit template file, required for `file` actions.
    pub template_file: Option<PathBuf>,
    /// Loader kind override (e.g. `api/create` for a preset's nested
    /// template directory); `None` uses the action kind's default.
    pub template_kind: Option<String>,
}

/// What one dispatch did, for reporting.
#[derive(Debug, Default)]
pub struct ActionOutcome {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl ActionOutcome {
    fn record(&mut self, path: PathBuf, written: bool) {
        if written {
            self.written.push(path);
        } else {
            self.skipped.push(path);
        }
    }
}

/// Builds the naming-derived tier of the variable cascade.
///
/// These keys are the documented vocabulary templates rely on; global and
/// per-action variables are layered on top by the caller (right wins).
pub fn naming_vars(component_name: &str, entity_name: &str) -> VarMap {
    let entity_pascal = naming::to_pascal_case(entity_name);
    let mut vars = VarMap::new();
    vars.insert("name".into(), component_name.to_string());
    vars.insert("componentName".into(), component_name.to_string());
    vars.insert("nameLower".into(), component_name.to_lowercase());
    vars.insert("nameUpper".into(), component_name.to_uppercase());
    vars.insert("nameKebab".into(), naming::to_kebab_case(component_name));
    vars.insert("entityName".into(), entity_pascal.clone());
    vars.insert(
        "entityNameCamel".into(),
        naming::to_camel_case(&entity_pascal),
    );
    vars.insert("entityNameLower".into(), entity_pascal.to_lowercase());
    vars.insert("entityNameUpper".into(), entity_pascal.to_uppercase());
    vars.insert(
        "entityNameKebab".into(),
        naming::to_kebab_case(&entity_pascal),
    );
    vars
}

/// Cascades the three variable tiers: naming-derived, then global preset
/// variables, then per-action variables. Later tiers win on key collision.
pub fn cascade_vars(naming_tier: VarMap, global: &VarMap, action: &VarMap) -> VarMap {
    let mut vars = naming_tier;
    vars.extend(global.iter().map(|(k, v)| (k.clone(), v.clone())));
    vars.extend(action.iter().map(|(k, v)| (k.clone(), v.clone())));
    vars
}

/// Applies the configured naming policy to a component name.
pub fn enforce_naming(policy: NamingPolicy, name: &str) -> Result<String> {
    let pascal = naming::to_pascal_case(name);
    if name == pascal {
        return Ok(name.to_string());
    }
    match policy {
        NamingPolicy::Error => Err(FsdgenError::Naming(format!(
            "Component name '{name}' is not PascalCase (expected '{pascal}')"
        )))?,
        NamingPolicy::Warn => {
            warn!("Component name '{name}' is not PascalCase (expected '{pascal}'); continuing.");
            Ok(name.to_string())
        }
        NamingPolicy::AutoFix => {
            info!("Auto-fixing component name '{name}' to '{pascal}'.");
            Ok(pascal)
        }
    }
}

/// Renders a string that may contain placeholders against the variable bag.
fn render_str(s: &str, vars: &VarMap) -> String {
    process_template(&Template::Text(s.to_string()), vars)
}

/// Executes one action against the filesystem.
pub async fn execute_action(
    config: &Config,
    loader: &TemplateLoader,
    action: &GenAction,
    vars: &VarMap,
) -> Result<ActionOutcome> {
    let mut outcome = ActionOutcome::default();

    if action.kind == ActionKind::File {
        execute_file_action(loader, action, vars, &mut outcome)?;
        return Ok(outcome);
    }

    let name = if action.kind == ActionKind::Component {
        enforce_naming(config.naming, &action.name)?
    } else {
        action.name.clone()
    };

    let set = if let Some(tpl) = &action.template_file {
        crate::core::template::TemplateSet {
            component: loader.load_file(tpl)?,
            styles: Template::Text(String::new()),
        }
    } else {
        let kind = action
            .template_kind
            .as_deref()
            .unwrap_or_else(|| action.kind.template_kind());
        loader.load(&action.layer, kind)?
    };

    let rendered = process_template(&set.component, vars);

    if let Some(path_tpl) = &action.path {
        // Explicit destination: no layer resolution, one barrel at most.
        let dest = PathBuf::from(render_str(path_tpl, vars));
        let written = io::write_new_file(&dest, &rendered)?;
        outcome.record(dest.clone(), written);
        if let (Some(parent), Some(stem)) = (dest.parent(), dest.file_stem()) {
            barrel::update_barrel(parent, &stem.to_string_lossy())?;
        }
        return Ok(outcome);
    }

    let slice = render_str(&action.slice, vars);
    let paths = resolve_fsd_paths(Path::new(&config.root_dir), &action.layer, &slice, &name)?;
    io::ensure_dir_exists(&paths.ui_path)?;

    let primary = paths
        .ui_path
        .join(format!("{name}.{}", action.kind.primary_extension()));
    let written = io::write_new_file(&primary, &rendered)?;
    outcome.record(primary, written);

    if action.kind == ActionKind::Component {
        let styles_rendered = process_template(&set.styles, vars);
        // An empty styles render means the template opted out; write nothing.
        if !styles_rendered.trim().is_empty() {
            let styles_path = paths.ui_path.join(format!("{name}.styles.ts"));
            let written = io::write_new_file(&styles_path, &styles_rendered)?;
            outcome.record(styles_path, written);
        }
    }

    // Two-tier barrels: the containing directory exports the new module,
    // the slice root re-exports the ui segment. The shared layer folds the
    // two directories together, so only one barrel applies there.
    barrel::update_barrel(&paths.ui_path, &name)?;
    if paths.ui_path != paths.slice_path {
        barrel::update_barrel(&paths.slice_path, "ui")?;
    }

    Ok(outcome)
}

/// `file` actions: exactly one write at the literal (substituted) path, from
/// an explicit template, with no barrel maintenance.
fn execute_file_action(
    loader: &TemplateLoader,
    action: &GenAction,
    vars: &VarMap,
    outcome: &mut ActionOutcome,
) -> Result<()> {
    let path_tpl = action.path.as_ref().ok_or_else(|| {
        FsdgenError::Preset(format!(
            "File action '{}' requires an explicit path",
            action.name
        ))
    })?;
    let template_file = action.template_file.as_ref().ok_or_else(|| {
        FsdgenError::Preset(format!(
            "File action '{}' requires a template file",
            action.name
        ))
    })?;

    let dest = PathBuf::from(render_str(path_tpl, vars));
    let template = loader.load_file(template_file)?;
    let rendered = process_template(&template, vars);
    let written = io::write_new_file(&dest, &rendered)?;
    outcome.record(dest, written);
    Ok(())
}

/// Prints the per-file summary and a relative-path completion hint.
pub fn print_completion_message(outcome: &ActionOutcome) {
    let cwd = std::env::current_dir().unwrap_or_default();
    for path in &outcome.written {
        let display = pathdiff::diff_paths(path, &cwd).unwrap_or_else(|| path.clone());
        println!("  create  {}", display.display());
    }
    for path in &outcome.skipped {
        let display = pathdiff::diff_paths(path, &cwd).unwrap_or_else(|| path.clone());
        println!("  skip    {} (already exists)", display.display());
    }
    if outcome.written.is_empty() {
        println!("Nothing to do; all files already exist.");
    } else {
        println!("Done. {} file(s) written.", outcome.written.len());
    }
}
