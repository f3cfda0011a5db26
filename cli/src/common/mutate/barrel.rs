//! # FsdGen Barrel Maintenance
//!
//! File: cli/src/common/mutate/barrel.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Maintains the `index.ts` barrel of a directory: after a component or hook
//! is generated, its public surface is re-exported from the slice so imports
//! stay short (`entities/User` instead of `entities/User/ui/UserCard`).
//!
//! ## Architecture
//!
//! A single operation, `update_barrel`:
//! - missing barrel: created with one export line
//! - existing barrel: the export line is appended, after patching a missing
//!   trailing newline on the last existing line
//! - duplicate detection is by the quoted module specifier `'./<path>'` as a
//!   substring, which tolerates user-reformatted barrels (different spacing,
//!   named re-exports) at the cost of missing double-quoted specifiers,
//!   those get a second, harmless export line
//!
use crate::common::fs::io;
use crate::core::error::Result;
use std::path::Path;
use tracing::{debug, info};

/// Name of the barrel file maintained inside slice and ui directories.
pub const BARREL_FILENAME: &str = "index.ts";

/// Ensures `dir/index.ts` re-exports `./<export_path>`.
///
/// ## Arguments
///
/// * `dir` - Directory whose barrel is maintained; created when missing.
/// * `export_path` - Module specifier relative to the barrel, without the
///   leading `./` (e.g. `UserCard` or `ui/UserCard`).
///
/// ## Returns
///
/// * `Result<bool>` - `true` when a line was added, `false` on a duplicate.
pub fn update_barrel(dir: &Path, export_path: &str) -> Result<bool> {
    io::ensure_dir_exists(dir)?;
    let barrel_path = dir.join(BARREL_FILENAME);
    let export_line = format!("export * from './{export_path}';\n");

    if !barrel_path.exists() {
        io::write_string_to_file(&barrel_path, &export_line)?;
        info!("Created barrel {:?}", barrel_path);
        return Ok(true);
    }

    let mut content = io::read_file_to_string(&barrel_path)?;
    // Substring match on the quoted specifier, not the whole line: a barrel
    // the user rewrote as `export { UserCard } from './UserCard';` still
    // counts as already exporting the module.
    let specifier = format!("'./{export_path}'");
    if content.contains(&specifier) {
        debug!("Barrel {:?} already exports {specifier}, skipping", barrel_path);
        return Ok(false);
    }

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&export_line);
    io::write_string_to_file(&barrel_path, &content)?;
    info!("Appended export to barrel {:?}", barrel_path);
    Ok(true)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_creates_barrel_when_missing() -> Result<()> {
        let dir = tempdir()?;
        let slice = dir.path().join("entities/User");

        let added = update_barrel(&slice, "ui/UserCard")?;
        assert!(added);

        let content = fs::read_to_string(slice.join("index.ts"))?;
        assert_eq!(content, "export * from './ui/UserCard';\n");
        Ok(())
    }

    #[test]
    fn test_appends_to_existing_barrel() -> Result<()> {
        let dir = tempdir()?;
        update_barrel(dir.path(), "UserCard")?;
        update_barrel(dir.path(), "UserAvatar")?;

        let content = fs::read_to_string(dir.path().join("index.ts"))?;
        assert_eq!(
            content,
            "export * from './UserCard';\nexport * from './UserAvatar';\n"
        );
        Ok(())
    }

    #[test]
    fn test_skips_duplicate_export() -> Result<()> {
        let dir = tempdir()?;
        assert!(update_barrel(dir.path(), "UserCard")?);
        assert!(!update_barrel(dir.path(), "UserCard")?);

        let content = fs::read_to_string(dir.path().join("index.ts"))?;
        assert_eq!(content.matches("UserCard").count(), 1);
        Ok(())
    }

    #[test]
    fn test_detects_user_reformatted_export() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("index.ts"),
            "export { UserCard } from './UserCard';\n",
        )?;
        assert!(!update_barrel(dir.path(), "UserCard")?);
        Ok(())
    }

    #[test]
    fn test_repairs_missing_trailing_newline() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("index.ts"), "export * from './First';")?;
        update_barrel(dir.path(), "Second")?;

        let content = fs::read_to_string(dir.path().join("index.ts"))?;
        assert_eq!(
            content,
            "export * from './First';\nexport * from './Second';\n"
        );
        Ok(())
    }
}
