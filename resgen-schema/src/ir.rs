//! Intermediate representation for code generation.
//!
//! This module turns one schema's flat element list into a set of named
//! types, each with an ordered list of resolved fields. The result is the
//! only input the emitter needs besides the registry.

use crate::elements::{ElementDef, FixedValue};
use crate::mapper::TypeMapper;
use crate::naming::{capitalize, field_ident, is_valid_type_name, nested_type_name, strip_choice_marker};
use crate::types::{PrimitiveType, ScalarKind, Schema, SchemaKind};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// Element names that never become fields.
const SKIPPED_NAMES: &[&str] = &["extension", "modifierExtension"];

/// Prefix marking private elements.
const PRIVATE_PREFIX: char = '_';

/// Wire name of the resource discriminator field.
pub const DISCRIMINATOR_WIRE_NAME: &str = "resourceType";

/// Shape of a resolved field type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Primitive scalar stored by value.
    Scalar(ScalarKind),
    /// Repeating value.
    Sequence(Box<TypeExpr>),
    /// Value that may be absent. Composite types are boxed behind it.
    Optional(Box<TypeExpr>),
    /// Untyped raw payload.
    Opaque,
    /// Generated or externally defined type.
    Named(String),
}

impl TypeExpr {
    /// Wraps in a sequence.
    #[must_use]
    pub fn sequence(inner: Self) -> Self {
        Self::Sequence(Box::new(inner))
    }

    /// Wraps in an optional indirection.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Wraps in an optional indirection unless already a sequence, optional
    /// or opaque.
    #[must_use]
    pub fn or_optional(self) -> Self {
        match self {
            Self::Sequence(_) | Self::Optional(_) | Self::Opaque => self,
            other => Self::optional(other),
        }
    }

    /// Returns the innermost type, stripping sequence and optional layers.
    #[must_use]
    pub fn base(&self) -> &Self {
        match self {
            Self::Sequence(inner) | Self::Optional(inner) => inner.base(),
            other => other,
        }
    }

    /// Returns the referenced type name, if the base is named.
    #[must_use]
    pub fn base_name(&self) -> Option<&str> {
        match self.base() {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the scalar kind, if the base is a scalar.
    #[must_use]
    pub fn base_scalar(&self) -> Option<ScalarKind> {
        match self.base() {
            Self::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns true for sequences.
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Returns true for optional indirections.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns true if the base is opaque.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        matches!(self.base(), Self::Opaque)
    }

    /// Applies cardinality wrapping for an element.
    ///
    /// Repeating elements become sequences. Optional elements get an
    /// indirection. Mandatory scalars stay bare. Mandatory composites are
    /// still held behind an indirection so recursive types stay finite.
    #[must_use]
    pub fn for_cardinality(self, element: &ElementDef) -> Self {
        if element.is_repeating() {
            return Self::sequence(self);
        }
        if !element.is_required() {
            return self.or_optional();
        }
        match self {
            Self::Scalar(_) | Self::Opaque => self,
            other => other.or_optional(),
        }
    }
}

/// Key under which a field is written in one wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireKey {
    /// Key name.
    pub name: String,
    /// Whether absent/empty values are left out.
    pub omit_empty: bool,
}

impl WireKey {
    /// Creates a wire key.
    #[must_use]
    pub fn new(name: impl Into<String>, omit_empty: bool) -> Self {
        Self {
            name: name.into(),
            omit_empty,
        }
    }
}

/// Resolved field information.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    /// Rust field identifier (raw for keywords).
    pub name: String,
    /// Element name as written on the wire.
    pub wire_name: String,
    /// Field type.
    pub type_expr: TypeExpr,
    /// JSON key.
    pub json: WireKey,
    /// XML key, `None` when the field is not written as an XML element.
    pub xml: Option<WireKey>,
    /// Whether at least one value is mandatory.
    pub is_required: bool,
    /// Minimum cardinality.
    pub min: u32,
    /// Maximum text length.
    pub max_length: Option<u32>,
    /// Full-match pattern.
    pub pattern: Option<String>,
    /// Fixed literal.
    pub fixed_value: Option<FixedValue>,
    /// Short description.
    pub short: Option<String>,
    /// Path of the source element.
    pub source_path: String,
    /// Base name shared by the fields of one choice element.
    pub choice_group: Option<String>,
    /// Expected value of a resource discriminator field.
    pub discriminator: Option<String>,
}

impl ResolvedField {
    /// Creates a field for an element, copying its constraints.
    ///
    /// Returns `None` when the wire name yields no legal identifier.
    #[must_use]
    pub fn from_element(element: &ElementDef, wire_name: &str, type_expr: TypeExpr) -> Option<Self> {
        let name = field_ident(wire_name)?;
        let omit_empty = !element.is_required();
        Some(Self {
            name,
            wire_name: wire_name.to_string(),
            type_expr,
            json: WireKey::new(wire_name, omit_empty),
            xml: Some(WireKey::new(wire_name, omit_empty)),
            is_required: element.is_required(),
            min: element.min,
            max_length: element.max_length,
            pattern: element.pattern.clone(),
            fixed_value: element.fixed_value.clone(),
            short: element.short.clone(),
            source_path: element.path.clone(),
            choice_group: None,
            discriminator: None,
        })
    }

    /// Creates the synthetic discriminator field for a resource.
    #[must_use]
    pub fn discriminator(resource: &str) -> Self {
        Self {
            name: "resource_type".to_string(),
            wire_name: DISCRIMINATOR_WIRE_NAME.to_string(),
            type_expr: TypeExpr::Scalar(ScalarKind::Text),
            json: WireKey::new(DISCRIMINATOR_WIRE_NAME, false),
            xml: None,
            is_required: true,
            min: 1,
            max_length: None,
            pattern: None,
            fixed_value: None,
            short: Some(format!("Always \"{resource}\"")),
            source_path: resource.to_string(),
            choice_group: None,
            discriminator: Some(resource.to_string()),
        }
    }
}

/// A named type produced for a schema.
#[derive(Debug, Clone)]
pub struct ResolvedType {
    /// Type name.
    pub name: String,
    /// Doc comment.
    pub doc: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<ResolvedField>,
}

impl ResolvedType {
    /// Creates an empty type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
        }
    }

    /// Appends a field. The first field with a given identifier wins;
    /// returns false if `field` was dropped as a duplicate.
    pub fn push_field(&mut self, field: ResolvedField) -> bool {
        if self.field(&field.name).is_some() {
            return false;
        }
        self.fields.push(field);
        true
    }

    /// Looks up a field by identifier.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if the type has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Intermediate representation of one schema for code generation.
#[derive(Debug, Clone)]
pub struct SchemaIr {
    /// Source schema name.
    pub schema_name: String,
    /// Name of the schema's own top-level type.
    pub root_type: String,
    /// Schema kind.
    pub kind: SchemaKind,
    /// Whether the schema is abstract.
    pub is_abstract: bool,
    /// Base type name, excluded from dependency closure.
    pub base_type_name: Option<String>,
    /// Externally defined types referenced by this unit.
    pub external_types: BTreeSet<String>,
    types: Vec<ResolvedType>,
    type_index: HashMap<String, usize>,
}

impl SchemaIr {
    /// Resolves a schema's elements into types and fields.
    #[must_use]
    pub fn from_schema(schema: &Schema) -> Self {
        let root_type = schema.type_name();
        let mut ir = Self {
            schema_name: schema.name.clone(),
            root_type: root_type.clone(),
            kind: schema.kind,
            is_abstract: schema.is_abstract,
            base_type_name: schema.base_type_name.as_deref().map(capitalize),
            external_types: BTreeSet::new(),
            types: Vec::new(),
            type_index: HashMap::new(),
        };

        let root = ir.ensure_type(&root_type);
        root.doc = schema.description.clone();
        if schema.has_discriminator() {
            root.push_field(ResolvedField::discriminator(&schema.name));
        }

        let mut resolver = Resolver::new(schema, root_type);
        for element in &schema.elements {
            resolver.resolve(element, &mut ir);
        }
        ir.external_types = resolver.mapper.into_used();

        ir
    }

    /// Gets a type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&ResolvedType> {
        self.type_index.get(name).map(|&idx| &self.types[idx])
    }

    /// Returns true if the unit has a type with this name.
    #[must_use]
    pub fn contains_type(&self, name: &str) -> bool {
        self.type_index.contains_key(name)
    }

    /// Returns the named type, creating an empty one if absent. A second
    /// route to the same name is a no-op.
    pub fn ensure_type(&mut self, name: &str) -> &mut ResolvedType {
        let idx = match self.type_index.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.types.len();
                self.types.push(ResolvedType::new(name));
                self.type_index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.types[idx]
    }

    /// Returns the root type.
    #[must_use]
    pub fn root(&self) -> Option<&ResolvedType> {
        self.get_type(&self.root_type)
    }

    /// Types in creation order.
    #[must_use]
    pub fn types(&self) -> &[ResolvedType] {
        &self.types
    }

    /// Total number of fields across all types.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.types.iter().map(|t| t.fields.len()).sum()
    }
}

/// Per-schema element walker.
struct Resolver<'a> {
    schema: &'a Schema,
    root_type: String,
    mapper: TypeMapper,
    /// Kind of the `value` field when the schema is a primitive wrapper.
    wrapper_value: Option<ScalarKind>,
}

impl<'a> Resolver<'a> {
    fn new(schema: &'a Schema, root_type: String) -> Self {
        let wrapper_value = PrimitiveType::from_code(&schema.name)
            .filter(|_| schema.is_primitive_wrapper())
            .and_then(|p| p.wrapper_value_kind());
        Self {
            schema,
            root_type,
            mapper: TypeMapper::new(),
            wrapper_value,
        }
    }

    fn is_wrapper(&self) -> bool {
        self.schema.is_primitive_wrapper()
    }

    fn resolve(&mut self, element: &ElementDef, ir: &mut SchemaIr) {
        let Some(parent) = element.parent_path() else {
            return;
        };
        if element.is_slice() || element.is_prohibited() {
            debug!(id = %element.id, "skipping sliced or prohibited element");
            return;
        }

        let last = element.last_segment();
        let depth = element.depth();

        if self.is_wrapper() && depth == 2 && (last == "value" || last == "id") {
            self.resolve_wrapper_member(element, last, ir);
            return;
        }

        let base_name = strip_choice_marker(last);
        if self.is_skipped(base_name, last) {
            return;
        }

        let target = if depth == 2 {
            self.root_type.clone()
        } else {
            nested_type_name(parent)
        };

        if let Some(anchor) = element.content_reference.as_deref() {
            let expr = content_reference_type(anchor).for_cardinality(element);
            self.push(ir, &target, ResolvedField::from_element(element, base_name, expr), element);
        } else if element.is_choice() {
            self.resolve_choice(element, base_name, &target, ir);
        } else {
            let mapped = self.mapper.map_element(element);
            if mapped.container {
                self.promote(&mapped.expr, element, ir);
            }
            let expr = mapped.expr.for_cardinality(element);
            self.push(ir, &target, ResolvedField::from_element(element, base_name, expr), element);
        }
    }

    /// Handles `<wrapper>.value` and `<wrapper>.id`.
    fn resolve_wrapper_member(&mut self, element: &ElementDef, last: &str, ir: &mut SchemaIr) {
        let expr = match last {
            "value" => match self.wrapper_value {
                Some(kind) => TypeExpr::Scalar(kind),
                None => return,
            },
            _ => TypeExpr::optional(TypeExpr::Scalar(ScalarKind::Text)),
        };
        let target = self.root_type.clone();
        self.push(ir, &target, ResolvedField::from_element(element, last, expr), element);
    }

    fn is_skipped(&self, base_name: &str, last: &str) -> bool {
        if SKIPPED_NAMES.contains(&base_name) || base_name.starts_with(PRIVATE_PREFIX) {
            return true;
        }
        self.is_wrapper()
            && (last == "id"
                || last == "value"
                || PrimitiveType::from_code_ignore_case(last).is_some())
    }

    fn resolve_choice(&mut self, element: &ElementDef, base_name: &str, target: &str, ir: &mut SchemaIr) {
        for type_ref in &element.type_refs {
            let mapped = self.mapper.map_code(&type_ref.code, &element.path);
            if mapped.container {
                self.promote(&mapped.expr, element, ir);
            }
            let wire_name = format!("{base_name}{}", capitalize(&type_ref.code));
            let field = ResolvedField::from_element(element, &wire_name, mapped.expr.or_optional())
                .map(|mut field| {
                    field.choice_group = Some(base_name.to_string());
                    field
                });
            self.push(ir, target, field, element);
        }
    }

    /// Makes sure a container's nested type exists even if no child element
    /// ever lands in it.
    fn promote(&self, expr: &TypeExpr, element: &ElementDef, ir: &mut SchemaIr) {
        let Some(name) = expr.base_name() else {
            return;
        };
        if self.is_wrapper() && PrimitiveType::from_code_ignore_case(name).is_some() {
            return;
        }
        let nested = ir.ensure_type(name);
        if nested.doc.is_none() {
            nested.doc = element.short.clone();
        }
    }

    fn push(&self, ir: &mut SchemaIr, target: &str, field: Option<ResolvedField>, element: &ElementDef) {
        let Some(field) = field else {
            debug!(path = %element.path, "dropping element without a legal field name");
            return;
        };
        let name = field.name.clone();
        if !ir.ensure_type(target).push_field(field) {
            warn!(
                path = %element.path,
                field = %name,
                type_name = %target,
                "duplicate field name, keeping the first declaration"
            );
        }
    }
}

/// Type reused through a content reference anchor (`#Path` or `url#Path`).
fn content_reference_type(anchor: &str) -> TypeExpr {
    let path = anchor.rsplit_once('#').map_or(anchor, |(_, path)| path);
    let name = nested_type_name(path);
    if path.is_empty() || !is_valid_type_name(&name) {
        TypeExpr::Opaque
    } else {
        TypeExpr::Named(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Cardinality;

    fn sample_schema() -> Schema {
        let mut schema = Schema::new("Sample", SchemaKind::ComplexType);
        schema.add_element(ElementDef::new("Sample"));
        schema.add_element(
            ElementDef::new("Sample.name")
                .with_cardinality(1, Cardinality::Bounded(1))
                .with_type("string"),
        );
        schema.add_element(
            ElementDef::new("Sample.tags")
                .with_cardinality(2, Cardinality::Unbounded)
                .with_type("string"),
        );
        schema
    }

    #[test]
    fn test_required_scalar_and_sequence() {
        let ir = SchemaIr::from_schema(&sample_schema());
        let root = ir.root().expect("root type");

        assert_eq!(ir.root_type, "Sample");
        assert_eq!(root.fields.len(), 2);

        let name = root.field("name").expect("name field");
        assert_eq!(name.type_expr, TypeExpr::Scalar(ScalarKind::Text));
        assert!(name.is_required);
        assert!(!name.json.omit_empty);

        let tags = root.field("tags").expect("tags field");
        assert_eq!(tags.type_expr, TypeExpr::sequence(TypeExpr::Scalar(ScalarKind::Text)));
        assert_eq!(tags.min, 2);
        assert!(!tags.xml.as_ref().expect("xml key").omit_empty);
    }

    #[test]
    fn test_choice_expansion() {
        let mut schema = Schema::new("Sample", SchemaKind::ComplexType);
        schema.add_element(ElementDef::new("Sample"));
        schema.add_element(
            ElementDef::new("Sample.value[x]")
                .with_type("string")
                .with_type("integer"),
        );

        let ir = SchemaIr::from_schema(&schema);
        let root = ir.root().expect("root type");
        assert_eq!(root.fields.len(), 2);

        let string = root.field("value_string").expect("valueString");
        assert_eq!(string.json.name, "valueString");
        assert_eq!(string.xml.as_ref().expect("xml key").name, "valueString");
        assert!(string.json.omit_empty);
        assert_eq!(
            string.type_expr,
            TypeExpr::optional(TypeExpr::Scalar(ScalarKind::Text))
        );
        assert_eq!(string.choice_group.as_deref(), Some("value"));

        let integer = root.field("value_integer").expect("valueInteger");
        assert_eq!(
            integer.type_expr,
            TypeExpr::optional(TypeExpr::Scalar(ScalarKind::Integer))
        );
        assert!(root.fields.iter().all(|f| f.json.name != "value"));
    }

    #[test]
    fn test_content_reference_reuses_nested_type() {
        let mut schema = Schema::new("Sample", SchemaKind::Resource);
        schema.add_element(ElementDef::new("Sample"));
        schema.add_element(
            ElementDef::new("Sample.referenceRange")
                .with_cardinality(0, Cardinality::Unbounded)
                .with_type("BackboneElement"),
        );
        schema.add_element(ElementDef::new("Sample.referenceRange.text").with_type("string"));
        schema.add_element(
            ElementDef::new("Sample.component")
                .with_cardinality(0, Cardinality::Unbounded)
                .with_type("BackboneElement"),
        );
        schema.add_element(
            ElementDef::new("Sample.component.referenceRange")
                .with_cardinality(0, Cardinality::Unbounded)
                .with_content_reference("#Sample.referenceRange"),
        );

        let ir = SchemaIr::from_schema(&schema);
        let component = ir.get_type("SampleComponent").expect("component type");
        let field = component.field("reference_range").expect("referenceRange");
        assert_eq!(
            field.type_expr,
            TypeExpr::sequence(TypeExpr::Named("SampleReferenceRange".to_string()))
        );

        let count = ir
            .types()
            .iter()
            .filter(|t| t.name == "SampleReferenceRange")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_content_reference_with_url_anchor() {
        assert_eq!(
            content_reference_type("http://hl7.org/fhir/StructureDefinition/Sample#Sample.item"),
            TypeExpr::Named("SampleItem".to_string())
        );
        assert_eq!(content_reference_type("#"), TypeExpr::Opaque);
    }

    #[test]
    fn test_container_promoted_without_children() {
        let mut schema = Schema::new("Sample", SchemaKind::ComplexType);
        schema.add_element(ElementDef::new("Sample"));
        schema.add_element(
            ElementDef::new("Sample.link")
                .with_cardinality(0, Cardinality::Unbounded)
                .with_type("BackboneElement"),
        );
        schema.add_element(
            ElementDef::new("Sample.link.extension")
                .with_cardinality(0, Cardinality::Unbounded)
                .with_type("Extension"),
        );

        let ir = SchemaIr::from_schema(&schema);
        let link = ir.get_type("SampleLink").expect("promoted type");
        assert!(link.is_empty());
    }

    #[test]
    fn test_required_composite_is_indirected() {
        let mut schema = Schema::new("Sample", SchemaKind::ComplexType);
        schema.add_element(ElementDef::new("Sample"));
        schema.add_element(
            ElementDef::new("Sample.code")
                .with_cardinality(1, Cardinality::Bounded(1))
                .with_type("CodeableConcept"),
        );

        let ir = SchemaIr::from_schema(&schema);
        let field = ir.root().and_then(|r| r.field("code")).expect("code field");
        assert_eq!(
            field.type_expr,
            TypeExpr::optional(TypeExpr::Named("CodeableConcept".to_string()))
        );
        assert!(field.is_required);
        assert!(ir.external_types.contains("CodeableConcept"));
    }

    #[test]
    fn test_skips_root_slices_and_extensions() {
        let mut schema = Schema::new("Sample", SchemaKind::ComplexType);
        schema.add_element(ElementDef::new("Sample"));
        schema.add_element(ElementDef::new("Sample.extension").with_type("Extension"));
        schema.add_element(ElementDef::new("Sample.modifierExtension").with_type("Extension"));
        schema.add_element(ElementDef::new("Sample._hidden").with_type("string"));
        let mut sliced = ElementDef::new("Sample.code").with_type("string");
        sliced.id = "Sample.code:special".to_string();
        schema.add_element(sliced);
        schema.add_element(
            ElementDef::new("Sample.gone")
                .with_cardinality(0, Cardinality::Bounded(0))
                .with_type("string"),
        );

        let ir = SchemaIr::from_schema(&schema);
        assert_eq!(ir.field_count(), 0);
        assert!(ir.external_types.is_empty());
    }

    #[test]
    fn test_primitive_wrapper() {
        let mut schema = Schema::new("string", SchemaKind::PrimitiveType);
        schema.add_element(ElementDef::new("string"));
        schema.add_element(
            ElementDef::new("string.id").with_type("http://hl7.org/fhirpath/System.String"),
        );
        schema.add_element(
            ElementDef::new("string.extension")
                .with_cardinality(0, Cardinality::Unbounded)
                .with_type("Extension"),
        );
        schema.add_element(
            ElementDef::new("string.value").with_type("http://hl7.org/fhirpath/System.String"),
        );

        let ir = SchemaIr::from_schema(&schema);
        let root = ir.root().expect("root type");
        assert_eq!(ir.root_type, "String");
        assert_eq!(root.fields.len(), 2);
        assert_eq!(
            root.field("id").expect("id").type_expr,
            TypeExpr::optional(TypeExpr::Scalar(ScalarKind::Text))
        );
        assert_eq!(
            root.field("value").expect("value").type_expr,
            TypeExpr::Scalar(ScalarKind::Text)
        );
    }

    #[test]
    fn test_temporal_wrapper_has_no_value() {
        let mut schema = Schema::new("dateTime", SchemaKind::PrimitiveType);
        schema.add_element(ElementDef::new("dateTime"));
        schema.add_element(ElementDef::new("dateTime.value").with_type("string"));

        let ir = SchemaIr::from_schema(&schema);
        assert_eq!(ir.field_count(), 0);
    }

    #[test]
    fn test_resource_discriminator_leads() {
        let mut schema = Schema::new("Patient", SchemaKind::Resource);
        schema.add_element(ElementDef::new("Patient"));
        schema.add_element(ElementDef::new("Patient.active").with_type("boolean"));

        let ir = SchemaIr::from_schema(&schema);
        let root = ir.root().expect("root type");
        let first = &root.fields[0];
        assert_eq!(first.discriminator.as_deref(), Some("Patient"));
        assert_eq!(first.json.name, "resourceType");
        assert!(first.xml.is_none());
        assert!(first.is_required);
    }

    #[test]
    fn test_keyword_and_illegal_names() {
        let mut schema = Schema::new("Sample", SchemaKind::ComplexType);
        schema.add_element(ElementDef::new("Sample"));
        schema.add_element(ElementDef::new("Sample.type").with_type("code"));
        schema.add_element(ElementDef::new("Sample.bad-name").with_type("string"));

        let ir = SchemaIr::from_schema(&schema);
        let root = ir.root().expect("root type");
        assert_eq!(root.fields.len(), 1);
        let field = root.field("r#type").expect("type field");
        assert_eq!(field.json.name, "type");
    }

    #[test]
    fn test_duplicate_field_keeps_first() {
        let mut schema = Schema::new("Sample", SchemaKind::ComplexType);
        schema.add_element(ElementDef::new("Sample"));
        schema.add_element(ElementDef::new("Sample.value[x]").with_type("string"));
        let mut clash = ElementDef::new("Sample.valueString").with_type("integer");
        clash.short = Some("second".to_string());
        schema.add_element(clash);

        let ir = SchemaIr::from_schema(&schema);
        let root = ir.root().expect("root type");
        assert_eq!(root.fields.len(), 1);
        assert_eq!(
            root.fields[0].type_expr,
            TypeExpr::optional(TypeExpr::Scalar(ScalarKind::Text))
        );
    }

    #[test]
    fn test_nested_fields_target_parent_type() {
        let mut schema = Schema::new("Patient", SchemaKind::Resource);
        schema.add_element(ElementDef::new("Patient"));
        schema.add_element(
            ElementDef::new("Patient.contact")
                .with_cardinality(0, Cardinality::Unbounded)
                .with_type("BackboneElement"),
        );
        schema.add_element(
            ElementDef::new("Patient.contact.name").with_type("HumanName"),
        );

        let ir = SchemaIr::from_schema(&schema);
        let contact = ir.get_type("PatientContact").expect("contact type");
        assert_eq!(
            contact.field("name").expect("name").type_expr,
            TypeExpr::optional(TypeExpr::Named("HumanName".to_string()))
        );
        assert_eq!(ir.types()[0].name, "Patient");
    }

    #[test]
    fn test_type_expr_helpers() {
        let expr = TypeExpr::sequence(TypeExpr::Named("Foo".to_string()));
        assert_eq!(expr.base_name(), Some("Foo"));
        assert!(expr.is_sequence());
        assert_eq!(TypeExpr::Opaque.or_optional(), TypeExpr::Opaque);
        assert_eq!(
            TypeExpr::Scalar(ScalarKind::Boolean).or_optional(),
            TypeExpr::optional(TypeExpr::Scalar(ScalarKind::Boolean))
        );
        assert!(TypeExpr::sequence(TypeExpr::Opaque).is_opaque());
    }
}
