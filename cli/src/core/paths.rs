//! # FsdGen Path Resolver
//!
//! File: cli/src/core/paths.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! This module maps `(root_dir, layer, slice, component_name)` to the set of
//! filesystem paths the Feature-Sliced Design convention prescribes. Every
//! generation request computes a fresh `FsdPaths`; nothing here is persisted.
//!
//! ## Architecture
//!
//! Resolution is a fixed pipeline of path joins:
//! 1. `layer` maps to its pluralized directory name (`entity` -> `entities`);
//!    unknown layer names are used literally, which enables ad hoc layers.
//! 2. `layer_path = root_dir/<plural>`, `slice_path = layer_path/<slice>`.
//! 3. `ui_path = slice_path/ui`, except for the `shared` layer where the
//!    slice directory itself is the ui directory.
//! 4. `component_path = ui_path/<component_name>` (no extension).
//!
//! The `slice` segment may itself contain path separators (nested slices).
//! `..` segments pass through the joins unsanitized; escaping `root_dir`
//! is intentional pass-through behavior that callers guard externally.
//!
use crate::core::error::{FsdgenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The closed set of Feature-Sliced Design layers.
///
/// Serialized with the lowercase singular names used in preset definitions
/// and the generated analysis artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FsdLayer {
    Entity,
    Feature,
    Widget,
    Page,
    Shared,
}

impl FsdLayer {
    /// All layers, in the conventional FSD order (lowest to highest).
    pub const ALL: [FsdLayer; 5] = [
        FsdLayer::Shared,
        FsdLayer::Entity,
        FsdLayer::Feature,
        FsdLayer::Widget,
        FsdLayer::Page,
    ];

    /// The singular layer name as it appears in configs and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            FsdLayer::Entity => "entity",
            FsdLayer::Feature => "feature",
            FsdLayer::Widget => "widget",
            FsdLayer::Page => "page",
            FsdLayer::Shared => "shared",
        }
    }

    /// The pluralized directory name under the project root.
    /// `shared` is the one layer whose directory is not pluralized.
    pub fn plural_dir(&self) -> &'static str {
        match self {
            FsdLayer::Entity => "entities",
            FsdLayer::Feature => "features",
            FsdLayer::Widget => "widgets",
            FsdLayer::Page => "pages",
            FsdLayer::Shared => "shared",
        }
    }

    /// Parse a layer name, returning `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<FsdLayer> {
        match s {
            "entity" => Some(FsdLayer::Entity),
            "feature" => Some(FsdLayer::Feature),
            "widget" => Some(FsdLayer::Widget),
            "page" => Some(FsdLayer::Page),
            "shared" => Some(FsdLayer::Shared),
            _ => None,
        }
    }
}

impl fmt::Display for FsdLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The derived, immutable path set for one generation call.
///
/// Invariant: `component_path` is a join-descendant of `ui_path`, which is a
/// descendant of `slice_path`, which is a descendant of `layer_path`. For
/// the `shared` layer, `ui_path == slice_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsdPaths {
    pub layer_path: PathBuf,
    pub slice_path: PathBuf,
    pub ui_path: PathBuf,
    pub component_path: PathBuf,
}

/// Maps a layer name to its pluralized directory name.
///
/// Unknown layers fall back to the literal layer string, so ad hoc layers
/// (`"processes"`, say) resolve without special support.
fn plural_layer_dir(layer: &str) -> String {
    match FsdLayer::parse(layer) {
        Some(l) => l.plural_dir().to_string(),
        None => layer.to_string(),
    }
}

/// Resolves the FSD path set for one generation request.
///
/// ## Arguments
/// * `root_dir` - The configured source root (e.g., `src`).
/// * `layer` - Layer name; required. An empty layer is a caller error and
///   fails loudly rather than defaulting silently.
/// * `slice` - Slice name; may contain separators for nested slices.
/// * `component_name` - Base name of the component, without extension.
///
/// ## Returns
/// * `Result<FsdPaths>` - The derived path set.
pub fn resolve_fsd_paths(
    root_dir: &Path,
    layer: &str,
    slice: &str,
    component_name: &str,
) -> Result<FsdPaths> {
    if layer.is_empty() {
        // A missing layer means the caller lost track of what it is
        // generating; guessing a default here would scatter files.
        return Err(FsdgenError::Config(
            "Layer is required for path resolution but was empty".to_string(),
        ))?;
    }

    let layer_path = root_dir.join(plural_layer_dir(layer));
    let slice_path = layer_path.join(slice);
    // The `shared` layer has no ui sub-segment: shared/api, shared/lib etc.
    // sit directly under their slice directory. Comparison is case-sensitive
    // and exact; "Shared" is an ad hoc layer, not the shared layer.
    let ui_path = if layer == "shared" {
        slice_path.clone()
    } else {
        slice_path.join("ui")
    };
    let component_path = ui_path.join(component_name);

    Ok(FsdPaths {
        layer_path,
        slice_path,
        ui_path,
        component_path,
    })
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_entity_paths() {
        let paths = resolve_fsd_paths(Path::new("src"), "entity", "User", "UserCard").unwrap();
        assert_eq!(paths.layer_path, PathBuf::from("src/entities"));
        assert_eq!(paths.slice_path, PathBuf::from("src/entities/User"));
        assert_eq!(paths.ui_path, PathBuf::from("src/entities/User/ui"));
        assert_eq!(
            paths.component_path,
            PathBuf::from("src/entities/User/ui/UserCard")
        );
    }

    #[test]
    fn test_shared_layer_has_no_ui_segment() {
        let paths = resolve_fsd_paths(Path::new("src"), "shared", "api", "client").unwrap();
        assert_eq!(paths.slice_path, PathBuf::from("src/shared/api"));
        assert_eq!(paths.ui_path, paths.slice_path);
        assert_eq!(paths.component_path, PathBuf::from("src/shared/api/client"));
    }

    #[test]
    fn test_unknown_layer_used_literally() {
        let paths = resolve_fsd_paths(Path::new("src"), "processes", "auth", "Login").unwrap();
        assert_eq!(paths.layer_path, PathBuf::from("src/processes"));
        // Not the `shared` layer, so the ui segment is inserted.
        assert_eq!(paths.ui_path, PathBuf::from("src/processes/auth/ui"));
    }

    #[test]
    fn test_nested_slice() {
        let paths = resolve_fsd_paths(Path::new("src"), "feature", "auth/login", "LoginForm").unwrap();
        assert_eq!(paths.slice_path, PathBuf::from("src/features/auth/login"));
        assert_eq!(
            paths.component_path,
            PathBuf::from("src/features/auth/login/ui/LoginForm")
        );
    }

    #[test]
    fn test_empty_layer_is_an_error() {
        let result = resolve_fsd_paths(Path::new("src"), "", "User", "UserCard");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Layer is required"));
    }

    /// Containment invariant: each derived path starts with its parent.
    #[test]
    fn test_path_containment_invariant() {
        for layer in ["entity", "feature", "widget", "page", "custom"] {
            let p = resolve_fsd_paths(Path::new("app/src"), layer, "Thing", "ThingCard").unwrap();
            assert!(p.slice_path.starts_with(&p.layer_path));
            assert!(p.ui_path.starts_with(&p.slice_path));
            assert!(p.component_path.starts_with(&p.ui_path));
        }
    }

    #[test]
    fn test_layer_enum_round_trip() {
        for layer in FsdLayer::ALL {
            assert_eq!(FsdLayer::parse(layer.as_str()), Some(layer));
        }
        assert_eq!(FsdLayer::parse("Entity"), None);
    }
}
