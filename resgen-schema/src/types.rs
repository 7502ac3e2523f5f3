//! Schema type definitions.
//!
//! This module contains the data structures representing one resource or
//! data-type schema, along with the closed table of primitive type codes.

use crate::elements::ElementDef;

/// A single named type definition: an ordered element tree plus metadata.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Schema name (e.g. `Patient`, `HumanName`, `string`).
    pub name: String,
    /// Structural kind of the definition.
    pub kind: SchemaKind,
    /// Whether the definition is an abstract base.
    pub is_abstract: bool,
    /// How the definition relates to its base.
    pub derivation: Derivation,
    /// Trailing segment of the base definition, if any.
    pub base_type_name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Element declarations in declaration order.
    pub elements: Vec<ElementDef>,
}

impl Schema {
    /// Creates a new schema with no elements.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SchemaKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_abstract: false,
            derivation: Derivation::Specialization,
            base_type_name: None,
            description: None,
            elements: Vec::new(),
        }
    }

    /// Adds an element declaration.
    pub fn add_element(&mut self, element: ElementDef) {
        self.elements.push(element);
    }

    /// Returns the generated type name for this schema.
    #[must_use]
    pub fn type_name(&self) -> String {
        crate::naming::nested_type_name(&self.name)
    }

    /// Returns true if this is a primitive wrapper schema.
    #[must_use]
    pub fn is_primitive_wrapper(&self) -> bool {
        self.kind == SchemaKind::PrimitiveType
    }

    /// Returns true if the root type carries a resource discriminator.
    #[must_use]
    pub fn has_discriminator(&self) -> bool {
        self.kind == SchemaKind::Resource && !self.is_abstract
    }

    /// Returns the first path segment shared by every element.
    #[must_use]
    pub fn root_path(&self) -> Option<&str> {
        self.elements
            .first()
            .and_then(|e| e.path.split('.').next())
    }
}

/// Structural kind of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemaKind {
    /// Primitive wrapper type (`string`, `boolean`, ...).
    PrimitiveType,
    /// Ordinary structured data type.
    #[default]
    ComplexType,
    /// Resource with a type discriminator.
    Resource,
    /// Logical model, not compiled by default.
    Logical,
}

impl SchemaKind {
    /// Parses a kind from its code.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "primitive-type" => Some(Self::PrimitiveType),
            "complex-type" => Some(Self::ComplexType),
            "resource" => Some(Self::Resource),
            "logical" => Some(Self::Logical),
            _ => None,
        }
    }
}

/// Relationship between a definition and its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Derivation {
    /// Defines a new type.
    #[default]
    Specialization,
    /// Restricts an existing type (profile).
    Constraint,
}

impl Derivation {
    /// Parses a derivation from its code.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "specialization" => Some(Self::Specialization),
            "constraint" => Some(Self::Constraint),
            _ => None,
        }
    }
}

/// Scalar kinds a primitive code can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// UTF-8 text.
    Text,
    /// Boolean flag.
    Boolean,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Integer64,
    /// Floating point decimal.
    Decimal,
}

impl ScalarKind {
    /// Returns the fully qualified Rust type for this scalar.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::Text => "::std::string::String",
            Self::Boolean => "bool",
            Self::Integer => "i32",
            Self::Integer64 => "i64",
            Self::Decimal => "f64",
        }
    }

    /// Returns true for the text kind.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Primitive type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// `boolean`.
    Boolean,
    /// `integer`.
    Integer,
    /// `positiveInt`.
    PositiveInt,
    /// `unsignedInt`.
    UnsignedInt,
    /// `integer64`.
    Integer64,
    /// `decimal`.
    Decimal,
    /// `string`.
    String,
    /// `code`.
    Code,
    /// `id`.
    Id,
    /// `markdown`.
    Markdown,
    /// `uri`.
    Uri,
    /// `url`.
    Url,
    /// `canonical`.
    Canonical,
    /// `oid`.
    Oid,
    /// `uuid`.
    Uuid,
    /// `base64Binary`.
    Base64Binary,
    /// `xhtml`.
    Xhtml,
    /// `date`.
    Date,
    /// `dateTime`.
    DateTime,
    /// `instant`.
    Instant,
    /// `time`.
    Time,
}

impl PrimitiveType {
    /// Every primitive code, in table order.
    pub const ALL: [Self; 21] = [
        Self::Boolean,
        Self::Integer,
        Self::PositiveInt,
        Self::UnsignedInt,
        Self::Integer64,
        Self::Decimal,
        Self::String,
        Self::Code,
        Self::Id,
        Self::Markdown,
        Self::Uri,
        Self::Url,
        Self::Canonical,
        Self::Oid,
        Self::Uuid,
        Self::Base64Binary,
        Self::Xhtml,
        Self::Date,
        Self::DateTime,
        Self::Instant,
        Self::Time,
    ];

    /// Returns the type code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::PositiveInt => "positiveInt",
            Self::UnsignedInt => "unsignedInt",
            Self::Integer64 => "integer64",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Code => "code",
            Self::Id => "id",
            Self::Markdown => "markdown",
            Self::Uri => "uri",
            Self::Url => "url",
            Self::Canonical => "canonical",
            Self::Oid => "oid",
            Self::Uuid => "uuid",
            Self::Base64Binary => "base64Binary",
            Self::Xhtml => "xhtml",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Instant => "instant",
            Self::Time => "time",
        }
    }

    /// Parses a primitive from its exact type code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    /// Case-insensitive variant of [`PrimitiveType::from_code`].
    #[must_use]
    pub fn from_code_ignore_case(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(code))
    }

    /// Returns the scalar kind used when a field references this code.
    #[must_use]
    pub const fn scalar_kind(&self) -> ScalarKind {
        match self {
            Self::Boolean => ScalarKind::Boolean,
            Self::Integer | Self::PositiveInt | Self::UnsignedInt => ScalarKind::Integer,
            Self::Integer64 => ScalarKind::Integer64,
            Self::Decimal => ScalarKind::Decimal,
            Self::String
            | Self::Code
            | Self::Id
            | Self::Markdown
            | Self::Uri
            | Self::Url
            | Self::Canonical
            | Self::Oid
            | Self::Uuid
            | Self::Base64Binary
            | Self::Xhtml
            | Self::Date
            | Self::DateTime
            | Self::Instant
            | Self::Time => ScalarKind::Text,
        }
    }

    /// Returns the kind of the `value` field of a wrapper schema for this
    /// code. Temporal wrappers have none.
    #[must_use]
    pub const fn wrapper_value_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Date | Self::DateTime | Self::Instant | Self::Time => None,
            _ => Some(self.scalar_kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_from_code() {
        assert_eq!(PrimitiveType::from_code("string"), Some(PrimitiveType::String));
        assert_eq!(
            PrimitiveType::from_code("positiveInt"),
            Some(PrimitiveType::PositiveInt)
        );
        assert_eq!(PrimitiveType::from_code("String"), None);
        assert_eq!(PrimitiveType::from_code("HumanName"), None);
    }

    #[test]
    fn test_primitive_from_code_ignore_case() {
        assert_eq!(
            PrimitiveType::from_code_ignore_case("DATETIME"),
            Some(PrimitiveType::DateTime)
        );
        assert_eq!(
            PrimitiveType::from_code_ignore_case("Base64binary"),
            Some(PrimitiveType::Base64Binary)
        );
    }

    #[test]
    fn test_primitive_codes_round_trip() {
        for prim in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::from_code(prim.code()), Some(prim));
        }
    }

    #[test]
    fn test_scalar_kind_table() {
        assert_eq!(PrimitiveType::Boolean.scalar_kind(), ScalarKind::Boolean);
        assert_eq!(PrimitiveType::UnsignedInt.scalar_kind(), ScalarKind::Integer);
        assert_eq!(PrimitiveType::Integer64.scalar_kind(), ScalarKind::Integer64);
        assert_eq!(PrimitiveType::Decimal.scalar_kind(), ScalarKind::Decimal);
        assert_eq!(PrimitiveType::Canonical.scalar_kind(), ScalarKind::Text);
        assert_eq!(PrimitiveType::Instant.scalar_kind(), ScalarKind::Text);
    }

    #[test]
    fn test_wrapper_value_kind_skips_temporal() {
        assert_eq!(
            PrimitiveType::String.wrapper_value_kind(),
            Some(ScalarKind::Text)
        );
        assert_eq!(PrimitiveType::Date.wrapper_value_kind(), None);
        assert_eq!(PrimitiveType::DateTime.wrapper_value_kind(), None);
        assert_eq!(PrimitiveType::Time.wrapper_value_kind(), None);
    }

    #[test]
    fn test_schema_kind_parse() {
        assert_eq!(SchemaKind::parse("resource"), Some(SchemaKind::Resource));
        assert_eq!(
            SchemaKind::parse("primitive-type"),
            Some(SchemaKind::PrimitiveType)
        );
        assert_eq!(SchemaKind::parse("widget"), None);
    }

    #[test]
    fn test_schema_discriminator() {
        let mut schema = Schema::new("Patient", SchemaKind::Resource);
        assert!(schema.has_discriminator());
        schema.is_abstract = true;
        assert!(!schema.has_discriminator());

        let datatype = Schema::new("HumanName", SchemaKind::ComplexType);
        assert!(!datatype.has_discriminator());
    }

    #[test]
    fn test_schema_type_name() {
        assert_eq!(Schema::new("string", SchemaKind::PrimitiveType).type_name(), "String");
        assert_eq!(Schema::new("Patient", SchemaKind::Resource).type_name(), "Patient");
    }

    #[test]
    fn test_scalar_rust_type() {
        assert_eq!(ScalarKind::Text.rust_type(), "::std::string::String");
        assert_eq!(ScalarKind::Integer64.rust_type(), "i64");
        assert!(ScalarKind::Text.is_text());
        assert!(!ScalarKind::Decimal.is_text());
    }
}
