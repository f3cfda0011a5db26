//! # FsdGen Error Types
//!
//! File: cli/src/core/error.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Defines the error vocabulary shared by every fsdgen pipeline and the
//! `Result` alias the rest of the crate returns.
//!
//! ## Architecture
//!
//! Two pieces work together:
//! - `FsdgenError`: a `thiserror` enum for the failure classes callers match on
//! - `Result<T>`: an alias for `anyhow::Result<T>`, so context can be layered
//!   onto any error with `.context()` / `.with_context()`
//!
//! The variants cover the taxonomy of the tool:
//! - Configuration errors (fatal, abort the run)
//! - Filesystem errors
//! - Template lookup/rendering errors
//! - Naming-convention violations
//! - Preset definition and reverse-engineering errors
//!
//! Optional-resource misses (a missing styles file, a preset entry whose source
//! file disappeared) are *not* errors: they are logged as warnings at the call
//! site and execution continues. Only fatal conditions surface through these
//! types.
//!
//! ## Examples
//!
//! ```rust
//! if !path.exists() {
//!     return Err(FsdgenError::FileSystem(format!("Path not found: {}", path.display())))?;
//! }
//!
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Reading {} failed", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the fsdgen application.
#[derive(Error, Debug)]
pub enum FsdgenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Template for layer '{layer}', kind '{kind}' not found in any search directory")]
    TemplateNotFound { layer: String, kind: String },

    #[error("Naming convention violation: {0}")]
    Naming(String),

    #[error("Preset error: {0}")]
    Preset(String),

    #[error("Conflicting token replacements for source substring '{substring}' targeting '{path}'")]
    TokenConflict { substring: String, path: String },

    #[error("Route injection error: {0}")]
    Route(String),
}

/// Crate-wide result alias over `anyhow::Error`, so call sites can attach
/// path and operation context as errors bubble up.
pub type Result<T> = anyhow::Result<T>;
