//! # FsdGen Route Injection
//!
//! File: cli/src/common/mutate/route.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Wires a newly generated page into the application's route table. The app
//! component opts in by carrying a marker comment inside its JSX:
//!
//! ```text
//! {/* fsdgen:routes */}
//! ```
//!
//! Injection inserts a `<Route>` element immediately before the marker line
//! and an `import` statement after the last existing import. The marker
//! stays in place so the next injection lands in the same spot.
//!
//! ## Architecture
//!
//! Route injection is best-effort by design: a project without the app file
//! or without the marker has opted out, and generation must still succeed.
//! Missing file and missing marker therefore warn and return; only real I/O
//! failures (permissions, encoding) propagate as errors.
//!
use crate::common::fs::io;
use crate::core::error::{FsdgenError, Result};
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Marker line the app component carries where routes should be inserted.
pub const ROUTE_MARKER: &str = "{/* fsdgen:routes */}";

/// Default app component filename when the routing config names none.
pub const DEFAULT_APP_FILE: &str = "App.tsx";

/// One route-injection request.
#[derive(Debug, Clone)]
pub struct RouteInjection {
    /// URL path of the route (e.g. `/users`).
    pub path: String,
    /// Module specifier for the import statement (e.g. `pages/Users` or an
    /// aliased `@/pages/Users`).
    pub import_path: String,
    /// Component identifier referenced in the route element.
    pub component_name: String,
}

impl RouteInjection {
    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("path", &self.path),
            ("import_path", &self.import_path),
            ("component_name", &self.component_name),
        ] {
            if value.is_empty() {
                return Err(FsdgenError::Route(format!(
                    "Route injection field '{field}' cannot be empty"
                )))?;
            }
        }
        Ok(())
    }
}

/// Injects a route into `target_dir/<app_file>`.
///
/// ## Arguments
///
/// * `target_dir` - Directory containing the app component.
/// * `app_file` - App component filename; `None` means [`DEFAULT_APP_FILE`].
/// * `injection` - The route to insert.
///
/// ## Returns
///
/// * `Result<bool>` - `true` when the file was modified; `false` when the
///   injection was skipped (file absent, marker absent, or duplicate route).
pub fn inject_route(
    target_dir: &Path,
    app_file: Option<&str>,
    injection: &RouteInjection,
) -> Result<bool> {
    injection.validate()?;
    // An empty directory would resolve against the process cwd; that is a
    // broken routing config (e.g. a placeholder that rendered to ""), not a
    // request to mutate ./App.tsx.
    if target_dir.as_os_str().is_empty() {
        return Err(FsdgenError::Route(
            "Route injection target directory cannot be empty".to_string(),
        ))?;
    }

    let app_path = target_dir.join(app_file.unwrap_or(DEFAULT_APP_FILE));
    let content = match fs::read_to_string(&app_path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "App file {:?} not found, skipping route injection.",
                app_path
            );
            return Ok(false);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read app file {:?}", app_path));
        }
    };

    if !content.contains(ROUTE_MARKER) {
        warn!(
            "Route marker '{ROUTE_MARKER}' not found in {:?}, skipping route injection.",
            app_path
        );
        return Ok(false);
    }

    // Duplicate detection is by the quoted route path; the user may have
    // reformatted the element itself.
    let path_literal = format!("path=\"{}\"", injection.path);
    if content.contains(&path_literal) {
        debug!(
            "Route {} already present in {:?}, skipping.",
            injection.path, app_path
        );
        return Ok(false);
    }

    let updated = insert_import(&content, injection);
    let updated = insert_route_element(&updated, injection);
    io::write_string_to_file(&app_path, &updated)?;
    info!("Injected route {} into {:?}", injection.path, app_path);
    Ok(true)
}

/// Inserts the import statement after the last existing top-level import.
/// A file with no imports keeps none: there is no safe position to invent,
/// and the component may already be in scope some other way.
fn insert_import(content: &str, injection: &RouteInjection) -> String {
    let import_line = format!(
        "import {{ {} }} from '{}';",
        injection.component_name, injection.import_path
    );
    if content.contains(&import_line) {
        return content.to_string();
    }

    let last_import_end = content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.trim_start().starts_with("import "))
        .map(|(i, _)| i)
        .last();

    let Some(last_idx) = last_import_end else {
        debug!("No import block found, leaving imports untouched.");
        return content.to_string();
    };

    let mut lines: Vec<&str> = content.lines().collect();
    lines.insert(last_idx + 1, &import_line);
    let mut result = lines.join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }
    result
}

/// Inserts the `<Route>` element on its own line directly above the marker,
/// reusing the marker line's indentation.
fn insert_route_element(content: &str, injection: &RouteInjection) -> String {
    let mut result_lines: Vec<String> = Vec::new();
    for line in content.lines() {
        if line.contains(ROUTE_MARKER) {
            let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
            result_lines.push(format!(
                "{indent}<Route path=\"{}\" element={{<{} />}} />",
                injection.path, injection.component_name
            ));
        }
        result_lines.push(line.to_string());
    }
    let mut result = result_lines.join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }
    result
}
