//! # FsdGen Preset Run Command
//!
//! File: cli/src/commands/preset/run.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! The preset orchestrator: `fsdgen preset run <preset> <entity>` loads a
//! preset definition (`preset.toml`), resolves its actions (either the
//! statically declared list or the auto-discovery conventions over the
//! preset's on-disk layer directories), cascades variables, and drives the
//! generation dispatcher once per action, strictly in order. Later actions
//! may depend on files written by earlier ones, so ordering is a guarantee,
//! not an accident.
//!
//! ## Auto-discovery conventions
//!
//! With `discovery = "auto"` the preset's directory tree is the definition:
//! - `entity/api/<op>/`: one hook per operation directory, named
//!   `use<Op><Entity>` via a known-operation table (`create` -> `Create`,
//!   `get`/`read` -> `Get`, `update` -> `Update`, `delete` -> `Delete`,
//!   `list`/`getAll` -> `GetAll`) with PascalCase of the directory name as
//!   the fallback for unrecognized operations.
//! - `feature/buttons/<kind>/`: one component per button kind, named
//!   `<Kind><Entity>Button`.
//! - `widget/table/`: one `<Entity>Table` component.
//! - `page/page/`: one `<Entity>Page` component.
//! - `shared/<dir>/`: one shared component per directory; a directory
//!   literally named `shared` uses the entity name as its slice.
//!
//! Slice names come from the `[naming]` conventions
//! (`<prefix><Entity><suffix>` per layer, both parts defaulting to empty).
//!
//! ## Routing
//!
//! A `[routing]` block plus at least one page-layer component action
//! triggers one route injection per page action, each rendered against that
//! action's own variable cascade. Routing with no page actions is a
//! warning, not an error.
//!
use crate::commands::generate::action::{
    self, ActionKind, ActionOutcome, GenAction,
};
use crate::commands::generate::parse_key_val;
use crate::common::fs::io;
use crate::common::mutate::route::{self, RouteInjection};
use crate::core::config::{self, Config};
use crate::core::error::{FsdgenError, Result};
use crate::core::naming;
use crate::core::paths::FsdLayer;
use crate::core::template::{process_template, Template, TemplateLoader, VarMap};
use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Filename of a preset definition inside its preset directory.
pub const PRESET_CONFIG_FILENAME: &str = "preset.toml";

/// How a preset's actions are determined.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Discovery {
    /// Scan the preset's layer directories using the fixed conventions.
    #[default]
    Auto,
    /// Use the statically declared `[[actions]]` list verbatim.
    Manual,
}

/// Per-layer slice naming conventions: `<prefix><Entity><suffix>`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NamingConventions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_suffix: Option<String>,
}

impl NamingConventions {
    /// The slice name for `layer`, built from the conventions.
    pub fn slice_for(&self, layer: FsdLayer, entity: &str) -> String {
        let (prefix, suffix) = match layer {
            FsdLayer::Entity => (self.entity_prefix.as_deref(), self.entity_suffix.as_deref()),
            FsdLayer::Feature => (
                self.feature_prefix.as_deref(),
                self.feature_suffix.as_deref(),
            ),
            FsdLayer::Widget => (self.widget_prefix.as_deref(), self.widget_suffix.as_deref()),
            FsdLayer::Page => (self.page_prefix.as_deref(), self.page_suffix.as_deref()),
            // Shared slices are named by the discovered directory, not the
            // entity; conventions never apply.
            FsdLayer::Shared => (None, None),
        };
        format!(
            "{}{entity}{}",
            prefix.unwrap_or(""),
            suffix.unwrap_or("")
        )
    }
}

/// The `[routing]` block of a preset definition. All string fields may
/// contain placeholders and are rendered per page action.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RoutingConfig {
    /// URL path template (e.g. `/{{entityNameKebab}}`).
    pub path: String,
    /// Import specifier template; aliases from config are applied after
    /// rendering.
    pub import_path: String,
    /// Component identifier template; defaults to the page action's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    /// App component filename; defaults to `App.tsx`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_file: Option<String>,
    /// Directory containing the app component; defaults to the configured
    /// root directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<String>,
}

/// One statically declared `[[actions]]` entry.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PresetActionDef {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice: Option<String>,
    /// Action name; may contain placeholders rendered against the entity
    /// variables, global variables, and this action's own variables.
    pub name: String,
    /// Explicit destination path (required for `file` actions; relative
    /// paths land under the configured root directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Template file, relative to the preset directory. Used literally,
    /// never placeholder-rendered (template filenames may themselves
    /// contain placeholder text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "VarMap::is_empty")]
    pub variables: VarMap,
}

/// The `preset.toml` schema.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PresetDefinition {
    #[serde(default)]
    pub discovery: Discovery,
    #[serde(default, skip_serializing_if = "VarMap::is_empty")]
    pub variables: VarMap,
    #[serde(default)]
    pub naming: NamingConventions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<RoutingConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<PresetActionDef>,
}

/// A resolved action: ready for dispatch, plus its per-action variables.
#[derive(Debug, Clone)]
pub struct ResolvedAction {
    pub action: GenAction,
    pub variables: VarMap,
}

/// Arguments for `fsdgen preset run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Preset name (directory under `<templates_dir>/preset/`)
    pub preset: String,

    /// Entity name the preset is instantiated for (PascalCase)
    pub entity: String,

    /// Extra template variables (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,
}

/// Handles the `preset run` command.
pub async fn handle_run(args: RunArgs) -> Result<()> {
    info!("Running preset '{}' for entity '{}'...", args.preset, args.entity);
    let cfg = config::load_config()?;
    let preset_dir = locate_preset_dir(&cfg, &args.preset)?;
    let definition = load_preset_definition(&preset_dir)?;

    let entity = naming::to_pascal_case(&args.entity);
    let resolved = resolve_actions(&definition, &preset_dir, &entity)?;
    if resolved.is_empty() {
        warn!("Preset '{}' resolved no actions; nothing to do.", args.preset);
        return Ok(());
    }

    let cli_vars: VarMap = args.vars.iter().cloned().collect();
    let loader = TemplateLoader::new(Some(preset_dir.clone()));
    let mut total = ActionOutcome::default();

    // Strictly sequential: later actions may rely on earlier writes.
    for item in &resolved {
        let vars = action_cascade(&definition, item, &entity, &cli_vars);
        let mut gen_action = item.action.clone();
        // File actions with relative destinations land under the root dir.
        if gen_action.kind == ActionKind::File {
            if let Some(p) = &gen_action.path {
                if Path::new(p).is_relative() {
                    gen_action.path = Some(format!("{}/{p}", cfg.root_dir));
                }
            }
        }
        let outcome = action::execute_action(&cfg, &loader, &gen_action, &vars).await?;
        total.written.extend(outcome.written);
        total.skipped.extend(outcome.skipped);
    }

    if let Some(routing) = &definition.routing {
        inject_routes(&cfg, &definition, routing, &resolved, &entity, &cli_vars)?;
    }

    action::print_completion_message(&total);
    Ok(())
}

/// The preset directory: `<templates_dir>/preset/<name>`. Presets require a
/// configured templates directory.
pub fn locate_preset_dir(cfg: &Config, name: &str) -> Result<PathBuf> {
    let templates = cfg.templates_path().ok_or_else(|| {
        FsdgenError::Preset(
            "Running presets requires 'templates_dir' to be configured".to_string(),
        )
    })?;
    let dir = templates.join("preset").join(name);
    if !dir.is_dir() {
        return Err(FsdgenError::Preset(format!(
            "Preset '{name}' not found at {}",
            dir.display()
        )))?;
    }
    Ok(dir)
}

/// Loads `<preset_dir>/preset.toml`. Missing definition is fatal.
pub fn load_preset_definition(preset_dir: &Path) -> Result<PresetDefinition> {
    let path = preset_dir.join(PRESET_CONFIG_FILENAME);
    let content = io::read_file_to_string(&path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse preset definition {}", path.display()))
}

/// Builds one action's full variable cascade: naming tier from the action's
/// concrete name and the entity, then global preset variables, then the
/// action's own variables, then CLI `--var` overrides.
fn action_cascade(
    definition: &PresetDefinition,
    item: &ResolvedAction,
    entity: &str,
    cli_vars: &VarMap,
) -> VarMap {
    let naming_tier = action::naming_vars(&item.action.name, entity);
    let mut vars = action::cascade_vars(naming_tier, &definition.variables, &item.variables);
    vars.extend(cli_vars.iter().map(|(k, v)| (k.clone(), v.clone())));
    vars
}

/// Resolves a preset's actions per its discovery mode.
pub fn resolve_actions(
    definition: &PresetDefinition,
    preset_dir: &Path,
    entity: &str,
) -> Result<Vec<ResolvedAction>> {
    match definition.discovery {
        Discovery::Auto => discover_actions(definition, preset_dir, entity),
        Discovery::Manual => {
            if definition.actions.is_empty() {
                warn!("Preset declares manual discovery but no actions.");
                return Ok(Vec::new());
            }
            definition
                .actions
                .iter()
                .map(|def| resolve_manual_action(definition, preset_dir, def, entity))
                .collect()
        }
    }
}

/// Maps a known API operation directory to its hook-name infix.
fn api_operation_infix(op: &str) -> String {
    match op {
        "create" => "Create".to_string(),
        "get" | "read" => "Get".to_string(),
        "update" => "Update".to_string(),
        "delete" => "Delete".to_string(),
        "list" | "getAll" => "GetAll".to_string(),
        other => naming::to_pascal_case(other),
    }
}

/// Lists the subdirectory names of `dir`, sorted, or empty when absent.
fn subdirs(dir: &Path) -> Vec<String> {
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

/// Applies the fixed auto-discovery conventions to the preset directory.
fn discover_actions(
    definition: &PresetDefinition,
    preset_dir: &Path,
    entity: &str,
) -> Result<Vec<ResolvedAction>> {
    let naming_conv = &definition.naming;
    let mut actions = Vec::new();

    // shared/<dir> is generated first so later layers can import from it.
    for dir in subdirs(&preset_dir.join("shared")) {
        let slice = if dir == "shared" {
            entity.to_string()
        } else {
            dir.clone()
        };
        actions.push(ResolvedAction {
            action: GenAction {
                kind: ActionKind::Component,
                layer: "shared".to_string(),
                slice: slice.clone(),
                name: naming::to_pascal_case(&slice),
                path: None,
                template_file: None,
                template_kind: Some(dir),
            },
            variables: VarMap::new(),
        });
    }

    // entity/api/<op>: one hook per operation directory.
    for op in subdirs(&preset_dir.join("entity/api")) {
        let name = format!("use{}{entity}", api_operation_infix(&op));
        actions.push(ResolvedAction {
            action: GenAction {
                kind: ActionKind::Hook,
                layer: "entity".to_string(),
                slice: naming_conv.slice_for(FsdLayer::Entity, entity),
                name,
                path: None,
                template_file: None,
                template_kind: Some(format!("api/{op}")),
            },
            variables: VarMap::new(),
        });
    }

    // feature/buttons/<kind>: one component per button kind.
    for kind in subdirs(&preset_dir.join("feature/buttons")) {
        let name = format!("{}{entity}Button", naming::to_pascal_case(&kind));
        actions.push(ResolvedAction {
            action: GenAction {
                kind: ActionKind::Component,
                layer: "feature".to_string(),
                slice: naming_conv.slice_for(FsdLayer::Feature, entity),
                name,
                path: None,
                template_file: None,
                template_kind: Some(format!("buttons/{kind}")),
            },
            variables: VarMap::new(),
        });
    }

    // widget/table: one table component.
    if preset_dir.join("widget/table").is_dir() {
        actions.push(ResolvedAction {
            action: GenAction {
                kind: ActionKind::Component,
                layer: "widget".to_string(),
                slice: naming_conv.slice_for(FsdLayer::Widget, entity),
                name: format!("{entity}Table"),
                path: None,
                template_file: None,
                template_kind: Some("table".to_string()),
            },
            variables: VarMap::new(),
        });
    }

    // page/page: one page component.
    if preset_dir.join("page/page").is_dir() {
        actions.push(ResolvedAction {
            action: GenAction {
                kind: ActionKind::Component,
                layer: "page".to_string(),
                slice: naming_conv.slice_for(FsdLayer::Page, entity),
                name: format!("{entity}Page"),
                path: None,
                template_file: None,
                template_kind: Some("page".to_string()),
            },
            variables: VarMap::new(),
        });
    }

    debug!("Auto-discovery resolved {} action(s).", actions.len());
    Ok(actions)
}

/// Resolves one statically declared action. The action name is rendered
/// against the entity variables plus the global and per-action tiers before
/// dispatch; template paths are used literally.
fn resolve_manual_action(
    definition: &PresetDefinition,
    preset_dir: &Path,
    def: &PresetActionDef,
    entity: &str,
) -> Result<ResolvedAction> {
    let naming_tier = action::naming_vars(entity, entity);
    let name_vars =
        action::cascade_vars(naming_tier, &definition.variables, &def.variables);
    let name = process_template(&Template::Text(def.name.clone()), &name_vars);

    let layer = def.layer.clone().unwrap_or_default();
    if layer.is_empty() && def.kind != ActionKind::File {
        return Err(FsdgenError::Preset(format!(
            "Action '{}' ({:?}) requires a layer",
            def.name, def.kind
        )))?;
    }

    Ok(ResolvedAction {
        action: GenAction {
            kind: def.kind,
            layer,
            slice: def.slice.clone().unwrap_or_else(|| entity.to_string()),
            name,
            path: def.path.clone(),
            template_file: def.template.as_ref().map(|t| preset_dir.join(t)),
            template_kind: None,
        },
        variables: def.variables.clone(),
    })
}

/// Performs one route injection per resolved page-layer component action.
fn inject_routes(
    cfg: &Config,
    definition: &PresetDefinition,
    routing: &RoutingConfig,
    resolved: &[ResolvedAction],
    entity: &str,
    cli_vars: &VarMap,
) -> Result<()> {
    let page_actions: Vec<&ResolvedAction> = resolved
        .iter()
        .filter(|r| r.action.kind == ActionKind::Component && r.action.layer == "page")
        .collect();

    if page_actions.is_empty() {
        warn!("Preset declares a routing block but no page actions; skipping route injection.");
        return Ok(());
    }

    for item in page_actions {
        let vars = action_cascade(definition, item, entity, cli_vars);
        let render = |s: &str| process_template(&Template::Text(s.to_string()), &vars);

        let import_path = cfg.apply_alias(&render(&routing.import_path));
        let injection = RouteInjection {
            path: render(&routing.path),
            import_path,
            component_name: routing
                .component_name
                .as_deref()
                .map(render)
                .unwrap_or_else(|| item.action.name.clone()),
        };
        let target_dir = routing
            .target_dir
            .as_deref()
            .map(render)
            .unwrap_or_else(|| cfg.root_dir.clone());
        let app_file = routing.app_file.as_deref().map(render);

        route::inject_route(Path::new(&target_dir), app_file.as_deref(), &injection)?;
    }
    Ok(())
}
