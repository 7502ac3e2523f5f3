//! # resgen core
//!
//! Runtime support for code generated by resgen.
//!
//! This crate provides:
//! - The [`Validate`] trait and the [`ValidationError`] taxonomy
//! - Full-match pattern checks with a compiled regex cache
//! - The XML encoding traits and `#[derive(XmlElement)]`
//! - [`RawValue`] for untyped payloads, and a `serde` re-export so generated
//!   code depends on this crate alone

extern crate self as resgen_core;

pub mod error;
pub mod pattern;
pub mod validate;
pub mod xml;

pub use error::ValidationError;
pub use validate::{Validate, validate_items};
pub use xml::{XmlElement, XmlError, XmlValue, XmlWriter};

pub use resgen_derive::XmlElement;
pub use serde;

/// Untyped payload for opaque fields.
pub type RawValue = serde_json::Value;

/// Returns true if the value equals its type's default.
///
/// Used as a `skip_serializing_if` predicate for optional bare scalars.
#[must_use]
pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_default() {
        assert!(is_default(&String::new()));
        assert!(!is_default(&"x".to_string()));
        assert!(is_default(&0i32));
        assert!(is_default(&false));
        assert!(is_default(&RawValue::Null));
        assert!(!is_default(&serde_json::json!({"a": 1})));
    }
}
