//! # FsdGen Naming Engine
//!
//! File: cli/src/core/naming.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Pure, stateless string transforms used by every other part of the tool:
//! case conversions between the conventions frontend code mixes freely
//! (PascalCase, camelCase, kebab-case) plus rule-based English
//! pluralization/singularization for slice names.
//!
//! ## Architecture
//!
//! All functions here are total: no input produces an error, and the empty
//! string maps to the empty string. Pluralization is a heuristic rule set,
//! not a dictionary; irregular plurals ("person" -> "people") are NOT
//! handled. That limitation is deliberate and documented; the reverse
//! pipeline only ever needs the rules to agree with themselves
//! (`pluralize(singularize(w)) == pluralize(w)` for regular nouns).
//!

/// Converts a kebab-case (or already-Pascal) string to PascalCase.
/// Capitalizes the first letter and the letter following each `-`,
/// stripping the hyphen.
pub fn to_pascal_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut capitalize_next = true; // Start by capitalizing the first character.

    for c in input.chars() {
        if c == '-' {
            // Delimiter found, next character should be capitalized.
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Converts a kebab-case or PascalCase string to camelCase.
/// Lower-cases the first letter; for every `-x` sequence, drops the hyphen
/// and upper-cases `x`.
pub fn to_camel_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut capitalize_next = false;
    let mut first_char = true; // The very first character is always lowercased.

    for c in input.chars() {
        if c == '-' {
            capitalize_next = true;
        } else if first_char {
            result.push(c.to_ascii_lowercase());
            first_char = false;
            capitalize_next = false;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Converts a PascalCase or camelCase string to kebab-case.
/// Inserts `-` between a lowercase letter or digit and an immediately
/// following uppercase letter, then lower-cases everything.
pub fn to_kebab_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;

    for c in input.chars() {
        if c.is_ascii_uppercase() {
            if let Some(p) = prev {
                if p.is_ascii_lowercase() || p.is_ascii_digit() {
                    result.push('-');
                }
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
        prev = Some(c);
    }
    result.to_lowercase()
}

/// Pluralizes a regular English noun.
///
/// Rules, in order:
/// 1. consonant + `y` -> `...ies` ("Category" -> "Categories")
/// 2. ends in `x`, `ch`, `sh`, or `ss` -> `...es` ("Box" -> "Boxes")
/// 3. default -> append `s` ("User" -> "Users")
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if let Some(stem) = word.strip_suffix('y') {
        // Only consonant+y takes "ies"; "Day" stays "Days".
        if !stem.ends_with(|c: char| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
            && !stem.is_empty()
        {
            return format!("{stem}ies");
        }
    }
    let lower = word.to_ascii_lowercase();
    if lower.ends_with('x') || lower.ends_with("ch") || lower.ends_with("sh") || lower.ends_with("ss")
    {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Singularizes a regular English noun, reversing each `pluralize` rule.
///
/// Words ending in `ss` are left unchanged; a trailing `s` that is part of
/// a double-s ("Address", "class") is never stripped.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_ascii_lowercase();
    if lower.ends_with("ss") {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if lower.ends_with("xes")
        || lower.ends_with("ches")
        || lower.ends_with("shes")
        || lower.ends_with("sses")
    {
        return word[..word.len() - 2].to_string();
    }
    if let Some(stem) = word.strip_suffix('s') {
        return stem.to_string();
    }
    word.to_string()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("user-card"), "UserCard");
        assert_eq!(to_pascal_case("user"), "User");
        assert_eq!(to_pascal_case("UserCard"), "UserCard");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("user-card"), "userCard");
        assert_eq!(to_camel_case("UserCard"), "userCard");
        assert_eq!(to_camel_case("manage-user-profile"), "manageUserProfile");
        assert_eq!(to_camel_case("simple"), "simple");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(to_kebab_case("UserCard"), "user-card");
        assert_eq!(to_kebab_case("userCard"), "user-card");
        assert_eq!(to_kebab_case("User2Card"), "user2-card");
        assert_eq!(to_kebab_case("user"), "user");
        assert_eq!(to_kebab_case(""), "");
    }

    #[test]
    fn test_pluralize_rules() {
        assert_eq!(pluralize("User"), "Users");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Day"), "Days"); // vowel + y takes plain s
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Match"), "Matches");
        assert_eq!(pluralize("Dish"), "Dishes");
        assert_eq!(pluralize("Class"), "Classes");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn test_singularize_rules() {
        assert_eq!(singularize("Users"), "User");
        assert_eq!(singularize("Categories"), "Category");
        assert_eq!(singularize("Boxes"), "Box");
        assert_eq!(singularize("Matches"), "Match");
        assert_eq!(singularize("Dishes"), "Dish");
        assert_eq!(singularize("Classes"), "Class");
        // Double-s words keep their trailing s.
        assert_eq!(singularize("Address"), "Address");
        assert_eq!(singularize("class"), "class");
        assert_eq!(singularize(""), "");
    }

    /// Property from the design contract: for regular nouns, singularizing
    /// then pluralizing agrees with pluralizing directly. Irregular forms
    /// ("people") are explicitly out of scope.
    #[test]
    fn test_pluralize_singularize_round_trip() {
        for word in ["User", "Category", "Box", "Match", "Dish"] {
            assert_eq!(pluralize(&singularize(word)), pluralize(word), "word: {word}");
            let plural = pluralize(word);
            assert_eq!(singularize(&plural), word, "plural: {plural}");
        }
    }
}
