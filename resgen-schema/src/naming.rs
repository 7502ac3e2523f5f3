//! Identifier and case helpers.
//!
//! Every function here is pure. In particular [`nested_type_name`] always
//! yields the same name for the same path, which is what lets container
//! promotion and content-reference reuse agree on type names.

use crate::elements::CHOICE_MARKER;

/// Rust strict and reserved keywords.
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.push(c.to_ascii_lowercase());
    }
    result
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
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

/// Uppercases the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character, leaving the rest untouched.
#[must_use]
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strips the choice marker from a path segment.
#[must_use]
pub fn strip_choice_marker(segment: &str) -> &str {
    segment.strip_suffix(CHOICE_MARKER).unwrap_or(segment)
}

/// Derives the type name for a dotted path.
///
/// `Observation.referenceRange` becomes `ObservationReferenceRange` and
/// `Observation.component.value[x]` becomes `ObservationComponentValue`.
#[must_use]
pub fn nested_type_name(path: &str) -> String {
    path.split('.')
        .map(|segment| capitalize(strip_choice_marker(segment)))
        .collect()
}

/// Returns true if `s` is a syntactically legal identifier.
#[must_use]
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns true if `s` is a Rust keyword.
#[must_use]
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Returns true if `s` can name a generated type.
#[must_use]
pub fn is_valid_type_name(s: &str) -> bool {
    is_valid_identifier(s) && !is_keyword(s)
}

/// Derives the Rust field identifier for an element name.
///
/// Keywords become raw identifiers. Returns `None` when no legal
/// identifier exists.
#[must_use]
pub fn field_ident(wire_name: &str) -> Option<String> {
    let snake = to_snake_case(wire_name);
    if !is_valid_identifier(&snake) || NON_RAW_KEYWORDS.contains(&snake.as_str()) {
        return None;
    }
    if is_keyword(&snake) {
        Some(format!("r#{snake}"))
    } else {
        Some(snake)
    }
}
