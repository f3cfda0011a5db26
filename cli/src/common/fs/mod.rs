//! # FsdGen Filesystem Utilities
//!
//! File: cli/src/common/fs/mod.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!

/// Core I/O wrappers (ensure dir, read, write, write-if-absent).
pub mod io;
