//! # FsdGen Source Mutators
//!
//! File: cli/src/common/mutate/mod.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Idempotent, append-only mutation of files the user owns. Both mutators
//! share one contract: running them twice with the same arguments leaves
//! the file exactly as one run left it, and neither ever removes or reorders
//! existing content.
//!

/// Barrel file (`index.ts`) export maintenance.
pub mod barrel;

/// Route injection into a marker-carrying app component.
pub mod route;
