//! # FsdGen Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Centralizes the filesystem primitives the generation pipelines build on:
//! ensuring directories exist, reading files into strings, overwriting
//! files, and the workhorse of idempotent generation: writing a file only
//! when it does not already exist.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: `mkdir -p` semantics, with a hard error when
//!   the path exists but is a file.
//! - **`read_file_to_string`** / **`write_string_to_file`**: thin wrappers
//!   around `std::fs` that attach path context to errors. Writes create the
//!   parent directory first.
//! - **`write_new_file`**: skip-if-exists write. Returns whether the file
//!   was actually written so callers can report "create" vs "skip" without
//!   re-checking the filesystem.
//!
//! Generation never deletes or truncates user files; the only mutation of
//! existing files happens through `common::mutate`, which appends or inserts.
//!
use crate::core::error::{FsdgenError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path, creating it (and
/// any missing parents) when absent.
///
/// ## Arguments
///
/// * `path` - The directory path to ensure exists.
///
/// ## Returns
///
/// * `Result<()>` - `Ok(())` if the directory exists or was created.
///
/// Errors when the path exists but is not a directory, or creation fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Creating directory {:?} failed", path))?;
        debug!("Created directory {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(FsdgenError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory {:?} already present", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string, attaching the path to
/// any I/O error.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Reading {:?} failed", path))
}

/// Writes string content to a file, overwriting if it exists. The parent
/// directory is created first when missing.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Writing {:?} failed", path))?;
    info!("Wrote {:?}", path);
    Ok(())
}

/// Writes a file only if it does not already exist.
///
/// ## Returns
///
/// * `Result<bool>` - `true` when the file was written, `false` when an
///   existing file was left untouched.
///
/// This is the idempotence primitive of the forward pipeline: re-running a
/// generation command must never clobber files the user has since edited.
pub fn write_new_file(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        debug!("File already exists, skipping: {:?}", path);
        return Ok(false);
    }
    write_string_to_file(path, content)?;
    Ok(true)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_read_write_round_trip() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("nested/test_rw.txt");
        let content = "export const x = 1;\n";
        write_string_to_file(&file_path, content)?;
        assert_eq!(read_file_to_string(&file_path)?, content);
        Ok(())
    }

    #[test]
    fn test_read_file_not_found() {
        let base_dir = tempdir().unwrap();
        let file_path = base_dir.path().join("nonexistent.txt");
        assert!(read_file_to_string(&file_path).is_err());
    }

    #[test]
    fn test_write_new_file_skips_existing() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("Component.tsx");

        let written = write_new_file(&file_path, "original")?;
        assert!(written);

        // Second write reports a skip and leaves the content alone.
        let written_again = write_new_file(&file_path, "overwrite attempt")?;
        assert!(!written_again);
        assert_eq!(read_file_to_string(&file_path)?, "original");
        Ok(())
    }
}
