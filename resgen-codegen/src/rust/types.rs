//! Rust spellings of type expressions, predicates and literals.
//!
//! Std types are always written fully qualified: units import every
//! generated type through `use super::*`, and the `string` wrapper schema
//! generates a type named `String`.

use resgen_schema::ScalarKind;
use resgen_schema::TypeExpr;
use resgen_schema::naming::is_valid_type_name;

/// Rust type of opaque payloads.
pub const RAW_VALUE: &str = "resgen_core::RawValue";

/// Renders the Rust type for a field type expression.
///
/// Named types that are not legal identifiers fall back to the raw payload
/// type under the same wrapping, so the unit stays well-formed.
#[must_use]
pub fn rust_type(expr: &TypeExpr) -> String {
    match expr {
        TypeExpr::Scalar(kind) => kind.rust_type().to_string(),
        TypeExpr::Opaque => RAW_VALUE.to_string(),
        TypeExpr::Named(name) if is_valid_type_name(name) => name.clone(),
        TypeExpr::Named(_) => RAW_VALUE.to_string(),
        TypeExpr::Sequence(inner) => format!("::std::vec::Vec<{}>", rust_type(inner)),
        TypeExpr::Optional(inner) if is_boxed(inner) => format!(
            "::std::option::Option<::std::boxed::Box<{}>>",
            rust_type(inner)
        ),
        TypeExpr::Optional(inner) => format!("::std::option::Option<{}>", rust_type(inner)),
    }
}

/// Composites behind an optional indirection are boxed.
fn is_boxed(inner: &TypeExpr) -> bool {
    matches!(inner, TypeExpr::Named(name) if is_valid_type_name(name))
}

/// Returns the named type a field refers to, if it renders as one.
#[must_use]
pub fn referenced_type(expr: &TypeExpr) -> Option<&str> {
    expr.base_name().filter(|name| is_valid_type_name(name))
}

/// Predicate used to leave an absent value out of JSON.
#[must_use]
pub fn skip_predicate(expr: &TypeExpr) -> &'static str {
    match expr {
        TypeExpr::Optional(_) => "::std::option::Option::is_none",
        TypeExpr::Sequence(_) => "::std::vec::Vec::is_empty",
        _ => "resgen_core::is_default",
    }
}

/// Boolean expression that holds when the value at `access` is unset.
#[must_use]
pub fn unset_check(expr: &TypeExpr, access: &str) -> String {
    match expr {
        TypeExpr::Optional(_) => format!("{access}.is_none()"),
        TypeExpr::Sequence(_) => format!("{access}.is_empty()"),
        TypeExpr::Opaque | TypeExpr::Named(_) => format!("{access}.is_null()"),
        TypeExpr::Scalar(ScalarKind::Text) => format!("{access}.is_empty()"),
        TypeExpr::Scalar(ScalarKind::Boolean) => format!("!{access}"),
        TypeExpr::Scalar(ScalarKind::Integer | ScalarKind::Integer64) => format!("{access} == 0"),
        TypeExpr::Scalar(ScalarKind::Decimal) => format!("{access} == 0.0"),
    }
}

/// Rust string literal for `s`.
#[must_use]
pub fn string_literal(s: &str) -> String {
    format!("{s:?}")
}

/// Makes free text safe for a single `///` line.
#[must_use]
pub fn doc_text(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            '"' | '`' => '\'',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TypeExpr {
        TypeExpr::Named(name.to_string())
    }

    #[test]
    fn test_rust_type() {
        assert_eq!(
            rust_type(&TypeExpr::Scalar(ScalarKind::Text)),
            "::std::string::String"
        );
        assert_eq!(
            rust_type(&TypeExpr::optional(named("HumanName"))),
            "::std::option::Option<::std::boxed::Box<HumanName>>"
        );
        assert_eq!(
            rust_type(&TypeExpr::optional(TypeExpr::Scalar(ScalarKind::Integer))),
            "::std::option::Option<i32>"
        );
        assert_eq!(
            rust_type(&TypeExpr::sequence(named("Coding"))),
            "::std::vec::Vec<Coding>"
        );
        assert_eq!(rust_type(&TypeExpr::Opaque), RAW_VALUE);
    }

    #[test]
    fn test_illegal_named_falls_back_to_raw() {
        assert_eq!(
            rust_type(&TypeExpr::optional(named("Not-Legal"))),
            "::std::option::Option<resgen_core::RawValue>"
        );
        assert_eq!(
            rust_type(&TypeExpr::sequence(named("Self"))),
            "::std::vec::Vec<resgen_core::RawValue>"
        );
        assert_eq!(referenced_type(&TypeExpr::sequence(named("Self"))), None);
    }

    #[test]
    fn test_skip_predicate_and_unset_check() {
        assert_eq!(
            skip_predicate(&TypeExpr::optional(named("Period"))),
            "::std::option::Option::is_none"
        );
        assert_eq!(
            skip_predicate(&TypeExpr::Scalar(ScalarKind::Text)),
            "resgen_core::is_default"
        );
        assert_eq!(
            unset_check(&TypeExpr::Scalar(ScalarKind::Decimal), "self.value"),
            "self.value == 0.0"
        );
        assert_eq!(
            unset_check(&TypeExpr::sequence(named("Coding")), "self.coding"),
            "self.coding.is_empty()"
        );
    }

    #[test]
    fn test_doc_text() {
        assert_eq!(doc_text("A \"quoted\"\nline "), "A 'quoted' line");
        assert_eq!(doc_text("`code`"), "'code'");
    }
}
