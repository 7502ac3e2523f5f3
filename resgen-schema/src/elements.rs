//! Element declarations.
//!
//! This module contains the data structures for the nodes of a schema's
//! element tree: paths, cardinality, type references and constraints.

/// Marker suffix for polymorphic ("choice") elements.
pub const CHOICE_MARKER: &str = "[x]";

/// Separator introducing an inline slice name in an element id.
pub const SLICE_MARKER: char = ':';

/// One node in a schema's element tree.
#[derive(Debug, Clone)]
pub struct ElementDef {
    /// Unique dotted identifier (may contain a slice marker).
    pub id: String,
    /// Dotted path.
    pub path: String,
    /// Minimum cardinality.
    pub min: u32,
    /// Maximum cardinality.
    pub max: Cardinality,
    /// Allowed type references.
    pub type_refs: Vec<TypeRef>,
    /// Anchor into the same schema whose derived type is reused.
    pub content_reference: Option<String>,
    /// Maximum text length.
    pub max_length: Option<u32>,
    /// Regular expression the value must fully match.
    pub pattern: Option<String>,
    /// Exact value the field must equal.
    pub fixed_value: Option<FixedValue>,
    /// Short description.
    pub short: Option<String>,
}

impl ElementDef {
    /// Creates a new element whose id equals its path, with `0..1`
    /// cardinality and no types.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: path.clone(),
            path,
            min: 0,
            max: Cardinality::Bounded(1),
            type_refs: Vec::new(),
            content_reference: None,
            max_length: None,
            pattern: None,
            fixed_value: None,
            short: None,
        }
    }

    /// Sets the cardinality.
    #[must_use]
    pub fn with_cardinality(mut self, min: u32, max: Cardinality) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Adds a type reference.
    #[must_use]
    pub fn with_type(mut self, code: impl Into<String>) -> Self {
        self.type_refs.push(TypeRef::new(code));
        self
    }

    /// Sets the content reference anchor.
    #[must_use]
    pub fn with_content_reference(mut self, anchor: impl Into<String>) -> Self {
        self.content_reference = Some(anchor.into());
        self
    }

    /// Returns the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }

    /// Returns the number of path segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Returns the last path segment.
    #[must_use]
    pub fn last_segment(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// Returns the parent path, or `None` for the root element.
    #[must_use]
    pub fn parent_path(&self) -> Option<&str> {
        self.path.rsplit_once('.').map(|(parent, _)| parent)
    }

    /// Returns true if the id names an inline slice.
    #[must_use]
    pub fn is_slice(&self) -> bool {
        self.id.contains(SLICE_MARKER)
    }

    /// Returns true for polymorphic elements.
    #[must_use]
    pub fn is_choice(&self) -> bool {
        self.path.ends_with(CHOICE_MARKER)
    }

    /// Returns true if the element may repeat.
    #[must_use]
    pub fn is_repeating(&self) -> bool {
        match self.max {
            Cardinality::Unbounded => true,
            Cardinality::Bounded(n) => n > 1,
        }
    }

    /// Returns true if the element is prohibited (`max` is zero).
    #[must_use]
    pub fn is_prohibited(&self) -> bool {
        self.max == Cardinality::Bounded(0)
    }

    /// Returns true if at least one occurrence is mandatory.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.min >= 1
    }
}

/// Upper cardinality bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// At most this many occurrences.
    Bounded(u32),
    /// Any number of occurrences.
    Unbounded,
}

impl Cardinality {
    /// Parses a cardinality from `*` or a decimal bound.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "*" => Some(Self::Unbounded),
            other => other.parse().ok().map(Self::Bounded),
        }
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bounded(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("*"),
        }
    }
}

/// Reference to an allowed type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Type code (primitive code, type name or URL).
    pub code: String,
}

impl TypeRef {
    /// Creates a new type reference.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Literal a field is fixed to.
#[derive(Debug, Clone, PartialEq)]
pub enum FixedValue {
    /// Text literal.
    Text(String),
    /// Boolean literal.
    Boolean(bool),
    /// Numeric literal.
    Number(f64),
}

impl FixedValue {
    /// Builds a fixed value from the type suffix of a `fixed<Type>` element
    /// and its textual value. Returns `None` when a boolean or numeric
    /// literal does not parse.
    #[must_use]
    pub fn from_suffix(suffix: &str, value: &str) -> Option<Self> {
        match suffix {
            "Boolean" => value.parse().ok().map(Self::Boolean),
            "Integer" | "PositiveInt" | "UnsignedInt" | "Integer64" | "Decimal" => {
                value.parse().ok().map(Self::Number)
            }
            _ => Some(Self::Text(value.to_string())),
        }
    }
}
