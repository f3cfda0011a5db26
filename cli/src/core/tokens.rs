//! # FsdGen Entity Tokens
//!
//! File: cli/src/core/tokens.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! The shared vocabulary of the reverse-engineering pipeline. Analysis scans
//! source files for occurrences of a subject name in its naming variants and
//! records a token map (literal substring -> token); build replays that map
//! to substitute every literal with the token's forward-pipeline
//! placeholder, producing parameterized templates.
//!
//! ## Architecture
//!
//! - `EntityToken`: the closed enumeration of six placeholder kinds. The
//!   generated analysis artifact references these names (never raw
//!   placeholder strings), keeping the interchange format type-safe.
//! - `NameVariations`: every case/number variant derived from a PascalCase
//!   subject. The five case variants participate in token identification;
//!   the plural/singular forms drive subject derivation and short-mode
//!   prefix inference (plural literals cannot round-trip through the closed
//!   token set without corrupting restored text).
//! - `identify_tokens`: ordered candidate matching with distinctness rules.
//! - `apply_tokens`: longest-match-first global substitution, the core
//!   correctness requirement of the build step: `"UserProfile"` must become
//!   `"{{entityName}}Profile"`, never a mangled short-match replacement.
//!
use crate::core::naming;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The closed set of placeholder kinds a token map may reference.
///
/// Serialized with the SCREAMING names used in the generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityToken {
    #[serde(rename = "NAME")]
    Name,
    #[serde(rename = "ENTITY_NAME")]
    EntityName,
    #[serde(rename = "ENTITY_NAME_CAMEL")]
    EntityNameCamel,
    #[serde(rename = "ENTITY_NAME_LOWER")]
    EntityNameLower,
    #[serde(rename = "ENTITY_NAME_UPPER")]
    EntityNameUpper,
    #[serde(rename = "ENTITY_NAME_KEBAB")]
    EntityNameKebab,
}

impl EntityToken {
    /// The forward-pipeline placeholder this token expands to at build time.
    /// These keys are exactly the naming-derived variables of the variable
    /// cascade, so built templates render through the normal template engine.
    pub fn placeholder(&self) -> &'static str {
        match self {
            EntityToken::Name => "{{name}}",
            EntityToken::EntityName => "{{entityName}}",
            EntityToken::EntityNameCamel => "{{entityNameCamel}}",
            EntityToken::EntityNameLower => "{{entityNameLower}}",
            EntityToken::EntityNameUpper => "{{entityNameUpper}}",
            EntityToken::EntityNameKebab => "{{entityNameKebab}}",
        }
    }
}

/// A token map: literal source substrings to the token each stands for.
/// Uniqueness is by source substring; multiple substrings may map to the
/// same token as long as they are textually distinct ("User" and "user").
/// BTreeMap keeps the serialized artifact deterministic.
pub type TokenMap = BTreeMap<String, EntityToken>;

/// Every naming variant of a PascalCase subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameVariations {
    pub pascal: String,
    pub camel: String,
    pub lower: String,
    pub upper: String,
    pub kebab: String,
    pub plural: String,
    pub singular: String,
    pub plural_camel: String,
}

impl NameVariations {
    pub fn new(subject: &str) -> Self {
        let pascal = naming::to_pascal_case(subject);
        let plural = naming::pluralize(&pascal);
        Self {
            camel: naming::to_camel_case(&pascal),
            lower: pascal.to_lowercase(),
            upper: pascal.to_uppercase(),
            kebab: naming::to_kebab_case(&pascal),
            singular: naming::singularize(&pascal),
            plural_camel: naming::to_camel_case(&plural),
            plural,
            pascal,
        }
    }
}

/// Scans `content` for occurrences of the subject's variants and records a
/// token map.
///
/// Candidates are tested in a fixed order, the Pascal form first so that
/// when the resolved name coincides with the subject, the substring maps to
/// `ENTITY_NAME` (the entity survives preset renaming) rather than `NAME`.
/// A candidate is recorded only when it (a) occurs in the content and
/// (b) is textually distinct from every variant already recorded (camel is
/// skipped when it equals pascal, and so on).
pub fn identify_tokens(content: &str, resolved_name: &str, variations: &NameVariations) -> TokenMap {
    let mut tokens = TokenMap::new();
    let candidates: [(&str, EntityToken); 6] = [
        (&variations.pascal, EntityToken::EntityName),
        (resolved_name, EntityToken::Name),
        (&variations.camel, EntityToken::EntityNameCamel),
        (&variations.lower, EntityToken::EntityNameLower),
        (&variations.upper, EntityToken::EntityNameUpper),
        (&variations.kebab, EntityToken::EntityNameKebab),
    ];

    for (literal, token) in candidates {
        if literal.is_empty() || tokens.contains_key(literal) {
            continue;
        }
        if content.contains(literal) {
            tokens.insert(literal.to_string(), token);
        }
    }
    tokens
}

/// Applies replacement pairs to `content`, longest literal first.
///
/// Sorting by descending literal length guarantees that a longer match
/// ("UserProfile") is consumed before a shorter literal that is its
/// substring ("User") can corrupt it. Each literal is regex-escaped before
/// its matcher is built; replacement strings are inserted verbatim.
pub fn apply_replacements(content: &str, pairs: &[(String, String)]) -> String {
    let mut ordered: Vec<&(String, String)> = pairs.iter().collect();
    // Stable sort: equal-length literals keep their given order, making the
    // output independent of map iteration order for non-nested token sets.
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

    let mut result = content.to_string();
    for (literal, replacement) in ordered {
        if literal.is_empty() {
            continue;
        }
        // The pattern is a quoted literal, so compilation cannot fail.
        let matcher =
            Regex::new(&regex::escape(literal)).expect("escaped literal is a valid regex");
        result = matcher
            .replace_all(&result, NoExpand(replacement))
            .into_owned();
    }
    result
}

/// Applies a token map to `content`, substituting each literal with its
/// token's placeholder.
pub fn apply_tokens(content: &str, tokens: &TokenMap) -> String {
    let pairs: Vec<(String, String)> = tokens
        .iter()
        .map(|(literal, token)| (literal.clone(), token.placeholder().to_string()))
        .collect();
    apply_replacements(content, &pairs)
}
