//! Type mapping from element type references to type expressions.
//!
//! The mapper turns one element's type reference into a [`TypeExpr`]: a
//! scalar, an opaque payload, or a named type. Names of externally defined
//! types it hands out are collected per mapper instance and returned with
//! the resolved unit, so no state outlives a single compilation.

use crate::elements::ElementDef;
use crate::ir::TypeExpr;
use crate::naming::{capitalize, decapitalize, is_valid_identifier, is_valid_type_name, nested_type_name};
use crate::types::PrimitiveType;
use std::collections::BTreeSet;

/// Codes standing for an arbitrary resource payload.
pub const GENERIC_RESOURCE_CODES: &[&str] = &["Resource", "Any"];

/// Codes whose substructure is declared inline by child elements.
pub const CONTAINER_CODES: &[&str] = &["BackboneElement", "Element"];

/// Result of mapping one type reference.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedType {
    /// Resolved type expression (never wrapped).
    pub expr: TypeExpr,
    /// True when `expr` names a nested type derived from the element's own
    /// path, which the resolver must make sure exists.
    pub container: bool,
}

impl MappedType {
    fn plain(expr: TypeExpr) -> Self {
        Self {
            expr,
            container: false,
        }
    }

    fn container(expr: TypeExpr) -> Self {
        Self {
            expr,
            container: true,
        }
    }
}

/// Maps type references to type expressions.
#[derive(Debug, Default)]
pub struct TypeMapper {
    used: BTreeSet<String>,
}

impl TypeMapper {
    /// Creates a mapper with an empty used-type set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps an element using all of its type references.
    ///
    /// Several simultaneous references resolve to [`TypeExpr::Opaque`]; the
    /// resolver splits choice elements before calling this.
    pub fn map_element(&mut self, element: &ElementDef) -> MappedType {
        match element.type_refs.as_slice() {
            [] => derive_from_path(&element.path),
            [single] => self.map_code(&single.code, &element.path),
            _ => MappedType::plain(TypeExpr::Opaque),
        }
    }

    /// Maps a single type code appearing on the element at `path`.
    pub fn map_code(&mut self, code: &str, path: &str) -> MappedType {
        if let Some(prim) = PrimitiveType::from_code(code) {
            return MappedType::plain(TypeExpr::Scalar(prim.scalar_kind()));
        }
        if GENERIC_RESOURCE_CODES.contains(&code) {
            return MappedType::plain(TypeExpr::Opaque);
        }
        if CONTAINER_CODES.contains(&code) {
            return derive_from_path(path);
        }
        if code.contains('/') {
            return self.map_reduced(trailing_segment(code));
        }
        self.map_named(code)
    }

    /// Returns the external type names handed out so far.
    #[must_use]
    pub fn used(&self) -> &BTreeSet<String> {
        &self.used
    }

    /// Consumes the mapper, returning the external type names it handed out.
    #[must_use]
    pub fn into_used(self) -> BTreeSet<String> {
        self.used
    }

    /// Maps the trailing segment of a dereferenced code.
    fn map_reduced(&mut self, segment: &str) -> MappedType {
        let prim = PrimitiveType::from_code(segment)
            .or_else(|| PrimitiveType::from_code(&decapitalize(segment)));
        if let Some(prim) = prim {
            return MappedType::plain(TypeExpr::Scalar(prim.scalar_kind()));
        }
        if GENERIC_RESOURCE_CODES.contains(&segment) {
            return MappedType::plain(TypeExpr::Opaque);
        }
        self.map_named(segment)
    }

    fn map_named(&mut self, code: &str) -> MappedType {
        if !is_valid_identifier(code) {
            return MappedType::plain(TypeExpr::Opaque);
        }
        let name = capitalize(code);
        if !is_valid_type_name(&name) {
            return MappedType::plain(TypeExpr::Opaque);
        }
        self.used.insert(name.clone());
        MappedType::plain(TypeExpr::Named(name))
    }
}

/// Nested type for the element's own path, or opaque when the path does not
/// yield a legal type name.
fn derive_from_path(path: &str) -> MappedType {
    let name = nested_type_name(path);
    if is_valid_type_name(&name) {
        MappedType::container(TypeExpr::Named(name))
    } else {
        MappedType::plain(TypeExpr::Opaque)
    }
}

/// Last segment of a URL-like code, after the last `/` and then the last `.`.
fn trailing_segment(code: &str) -> &str {
    let after_slash = code.rsplit('/').next().unwrap_or(code);
    after_slash.rsplit('.').next().unwrap_or(after_slash)
}
