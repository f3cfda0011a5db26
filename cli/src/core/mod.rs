//! # FsdGen Core Functionality
//!
//! File: cli/src/core/mod.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Declares the core building blocks of fsdgen: configuration, errors, and
//! the pure engines (naming, path resolution, templating, tokens) that the
//! command handlers compose into the forward and reverse pipelines. Nothing
//! in `core` performs filesystem writes; that is `common::fs` territory.
//!

/// Configuration loading, merging, and validation.
pub mod config;

/// Custom error types and the `Result` alias used throughout.
pub mod error;

/// Case conversion and pluralization transforms.
pub mod naming;

/// FSD layer/slice path resolution.
pub mod paths;

/// Template loading and placeholder substitution.
pub mod template;

/// Entity token vocabulary for the reverse-engineering pipeline.
pub mod tokens;
