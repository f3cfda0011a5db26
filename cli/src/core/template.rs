//! # FsdGen Template Engine
//!
//! File: cli/src/core/template.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! This module loads templates for the forward pipeline and renders them
//! against a variable bag. A template is either literal text containing
//! `{{identifier}}` placeholders, or a generator function taking the
//! variable bag and returning text, represented as a tagged union and
//! dispatched with a pattern match, never a runtime type check.
//!
//! ## Architecture
//!
//! `TemplateLoader` holds an ordered list of search sources: the user's
//! custom template directory (from config, wins on conflict) followed by a
//! built-in registry injected at construction. There is no process-global
//! template path; the built-in set is a plain value owned by the loader.
//!
//! On-disk lookup for `(layer, kind)` resolves the directory
//! `<search_dir>/<layer>/<kind>` (or `<search_dir>/<kind>` when `layer` is
//! empty, for flat override paths). Within that directory:
//! - the primary template is the first of `Component.tsx`, `Component.ts`,
//!   `Component.js` that exists;
//! - an optional `Component.styles.*` sibling provides the styles template
//!   (absent -> empty string, never an error).
//!
//! Rendering replaces every `{{ key }}` occurrence with the variable's
//! value, substituting the empty string for missing keys. Whitespace around
//! the key is tolerated; the key itself is word characters only (letters,
//! digits, underscore; NOT hyphen or dot). Rendering never fails.
//!
use crate::core::error::{FsdgenError, Result};
use anyhow::Context;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// Variable bag for template rendering: string keys to string values,
/// built by cascading tiers (global preset variables, per-action variables,
/// naming-derived variables) where later tiers override earlier ones.
pub type VarMap = HashMap<String, String>;

/// Signature of a built-in generator template.
pub type TemplateFn = fn(&VarMap) -> String;

/// A template: literal text with placeholders, or a generator function.
#[derive(Debug, Clone)]
pub enum Template {
    Text(String),
    Generator(TemplateFn),
}

impl Template {
    /// True when rendering this template can only ever produce the empty
    /// string (used to skip absent styles files without rendering).
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Template::Text(t) if t.is_empty())
    }
}

/// The pair of templates one component-like action consumes.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub component: Template,
    pub styles: Template,
}

/// One entry in the built-in fallback registry.
struct BuiltinEntry {
    /// Layer the entry applies to; empty string matches any layer.
    layer: &'static str,
    kind: &'static str,
    component: Template,
    styles: Template,
}

/// Template loader with an explicit, injected search order:
/// custom directory first, built-in registry as the fallback.
pub struct TemplateLoader {
    custom_dir: Option<PathBuf>,
    builtin: Vec<BuiltinEntry>,
}

impl TemplateLoader {
    /// Creates a loader. `custom_dir` is the user's template override tree
    /// (usually `<templates_dir>` from config); `None` means built-ins only.
    pub fn new(custom_dir: Option<PathBuf>) -> Self {
        Self {
            custom_dir,
            builtin: default_builtins(),
        }
    }

    /// Loads the template set for `(layer, kind)`.
    ///
    /// Search order: the custom directory (exact `<layer>/<kind>` path, then
    /// the flat `<kind>` override), then the built-in registry. Fails with
    /// `TemplateNotFound` only when no source matches at all.
    pub fn load(&self, layer: &str, kind: &str) -> Result<TemplateSet> {
        if let Some(dir) = &self.custom_dir {
            for candidate in [dir.join(layer).join(kind), dir.join(kind)] {
                if candidate.is_dir() {
                    debug!("Loading template from directory: {}", candidate.display());
                    return load_template_dir(&candidate);
                }
            }
        }

        for entry in &self.builtin {
            if (entry.layer.is_empty() || entry.layer == layer) && entry.kind == kind {
                debug!("Using built-in template for layer '{layer}', kind '{kind}'");
                return Ok(TemplateSet {
                    component: entry.component.clone(),
                    styles: entry.styles.clone(),
                });
            }
        }

        Err(FsdgenError::TemplateNotFound {
            layer: layer.to_string(),
            kind: kind.to_string(),
        })?
    }

    /// Loads a single explicit template file (used by `file` actions whose
    /// preset definition names a concrete template path). Always text.
    pub fn load_file(&self, path: &Path) -> Result<Template> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template file '{}'", path.display()))?;
        Ok(Template::Text(content))
    }
}

/// Loads the primary/styles pair from one on-disk template directory.
fn load_template_dir(dir: &Path) -> Result<TemplateSet> {
    let mut component = None;
    for name in ["Component.tsx", "Component.ts", "Component.js"] {
        let candidate = dir.join(name);
        if candidate.is_file() {
            let content = fs::read_to_string(&candidate)
                .with_context(|| format!("Failed to read template '{}'", candidate.display()))?;
            component = Some(Template::Text(content));
            break;
        }
    }
    let component = component.ok_or_else(|| {
        FsdgenError::FileSystem(format!(
            "Template directory '{}' contains no Component.tsx/ts/js",
            dir.display()
        ))
    })?;

    // The styles file is optional: any extension under the Component.styles
    // stem is accepted, absence yields an empty template.
    let mut styles = Template::Text(String::new());
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list template directory '{}'", dir.display()))?;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with("Component.styles.") && entry.path().is_file() {
            let content = fs::read_to_string(entry.path())
                .with_context(|| format!("Failed to read styles template '{name}'"))?;
            styles = Template::Text(content);
            break;
        }
    }

    Ok(TemplateSet { component, styles })
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Word-character keys only; `{{foo.bar}}` and `{{foo-bar}}` are left
        // untouched rather than half-substituted.
        Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder pattern is a valid regex")
    })
}

/// Renders a template against a variable bag. Never fails: generator
/// templates are invoked, text templates have every `{{ key }}` replaced
/// with the variable's value or the empty string when the key is missing.
pub fn process_template(template: &Template, vars: &VarMap) -> String {
    match template {
        Template::Generator(f) => f(vars),
        Template::Text(text) => placeholder_pattern()
            .replace_all(text, |caps: &Captures| {
                vars.get(&caps[1]).cloned().unwrap_or_default()
            })
            .into_owned(),
    }
}

// --- Built-in fallback templates ---
// These mirror the conventional FSD starter files. They are deliberately
// minimal; a project that cares ships its own tree via `templates_dir`.

fn default_builtins() -> Vec<BuiltinEntry> {
    // Layer-specific entries come before the generic (empty-layer) fallbacks;
    // the loader takes the first match.
    vec![
        BuiltinEntry {
            layer: "page",
            kind: "component",
            component: Template::Text(BUILTIN_PAGE.to_string()),
            styles: Template::Text(String::new()),
        },
        BuiltinEntry {
            layer: "",
            kind: "component",
            component: Template::Text(BUILTIN_COMPONENT.to_string()),
            styles: Template::Text(BUILTIN_COMPONENT_STYLES.to_string()),
        },
        BuiltinEntry {
            layer: "",
            kind: "hook",
            // Generator variant: hook files derive their body from the
            // variable bag rather than pure substitution.
            component: Template::Generator(builtin_hook),
            styles: Template::Text(String::new()),
        },
        BuiltinEntry {
            layer: "",
            kind: "styles",
            component: Template::Text(BUILTIN_STYLES.to_string()),
            styles: Template::Text(String::new()),
        },
    ]
}

const BUILTIN_COMPONENT: &str = r#"import React from 'react';
import './{{componentName}}.styles.ts';

export const {{componentName}} = () => {
  return <div className="{{nameKebab}}">{{componentName}}</div>;
};
"#;

const BUILTIN_COMPONENT_STYLES: &str = r#"export const {{nameLower}}Styles = {};
"#;

const BUILTIN_STYLES: &str = r#"export const {{nameLower}}Styles = {};
"#;

const BUILTIN_PAGE: &str = r#"import React from 'react';

export const {{componentName}} = () => {
  return <main>{{componentName}}</main>;
};
"#;

fn builtin_hook(vars: &VarMap) -> String {
    let name = vars.get("componentName").cloned().unwrap_or_default();
    let entity = vars.get("entityName").cloned().unwrap_or_default();
    format!(
        "export const {name} = () => {{\n  // TODO: implement {entity} data access\n  return null;\n}};\n"
    )
}
