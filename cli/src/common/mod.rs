//! # FsdGen Common Utilities
//!
//! File: cli/src/common/mod.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Shared helpers used by several command handlers: filesystem I/O wrappers
//! and the idempotent source-file mutators (barrel exports, route
//! injection). Command-specific logic never lives here.
//!

/// Filesystem helpers (directory creation, read/write with context).
pub mod fs;

/// Idempotent mutation of existing source files.
pub mod mutate;
