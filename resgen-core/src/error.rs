//! Error types for generated validators.

use thiserror::Error;

/// Structural validation failure reported by a generated validator.
///
/// Failures in nested values are wrapped with the name (and index) of the
/// field that holds them, so the outermost error describes the full path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Mandatory value is unset, empty or zero.
    #[error("{field} required")]
    Required {
        /// Field name.
        field: &'static str,
    },

    /// Mandatory choice with no alternative set.
    #[error("one of {group}[x] required")]
    ChoiceRequired {
        /// Base name of the choice.
        group: &'static str,
    },

    /// Sequence shorter than its minimum cardinality.
    #[error("{field} needs at least {min}")]
    MinItems {
        /// Field name.
        field: &'static str,
        /// Minimum number of items.
        min: usize,
        /// Actual number of items.
        actual: usize,
    },

    /// Text longer than its maximum length.
    #[error("{field} exceeds max length {max} ({actual} characters)")]
    MaxLength {
        /// Field name.
        field: &'static str,
        /// Maximum number of characters.
        max: usize,
        /// Actual number of characters.
        actual: usize,
    },

    /// Text not fully matching its pattern.
    #[error("{field} does not match pattern {pattern}")]
    Pattern {
        /// Field name.
        field: &'static str,
        /// Expected pattern.
        pattern: &'static str,
    },

    /// Value differs from its fixed literal.
    #[error("{field} must equal {expected}")]
    Fixed {
        /// Field name.
        field: &'static str,
        /// Expected literal.
        expected: String,
    },

    /// Resource discriminator mismatch.
    #[error("{field} must be \"{expected}\", found \"{actual}\"")]
    Discriminator {
        /// Field name.
        field: &'static str,
        /// Expected type name.
        expected: &'static str,
        /// Actual value.
        actual: String,
    },

    /// Failure inside a single nested value.
    #[error("{field}: {source}")]
    Nested {
        /// Field name.
        field: &'static str,
        /// Inner failure.
        source: Box<ValidationError>,
    },

    /// Failure inside one item of a sequence.
    #[error("{field}[{index}]: {source}")]
    Item {
        /// Field name.
        field: &'static str,
        /// Item position.
        index: usize,
        /// Inner failure.
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Creates a required error.
    #[must_use]
    pub fn required(field: &'static str) -> Self {
        Self::Required { field }
    }

    /// Creates a choice required error.
    #[must_use]
    pub fn choice_required(group: &'static str) -> Self {
        Self::ChoiceRequired { group }
    }

    /// Creates a min items error.
    #[must_use]
    pub fn min_items(field: &'static str, min: usize, actual: usize) -> Self {
        Self::MinItems { field, min, actual }
    }

    /// Creates a max length error.
    #[must_use]
    pub fn max_length(field: &'static str, max: usize, actual: usize) -> Self {
        Self::MaxLength { field, max, actual }
    }

    /// Creates a pattern error.
    #[must_use]
    pub fn pattern(field: &'static str, pattern: &'static str) -> Self {
        Self::Pattern { field, pattern }
    }

    /// Creates a fixed value error.
    #[must_use]
    pub fn fixed(field: &'static str, expected: impl std::fmt::Display) -> Self {
        Self::Fixed {
            field,
            expected: expected.to_string(),
        }
    }

    /// Creates a discriminator error.
    #[must_use]
    pub fn discriminator(field: &'static str, expected: &'static str, actual: &str) -> Self {
        Self::Discriminator {
            field,
            expected,
            actual: actual.to_string(),
        }
    }

    /// Wraps a nested failure with its field name.
    #[must_use]
    pub fn nested(field: &'static str, source: Self) -> Self {
        Self::Nested {
            field,
            source: Box::new(source),
        }
    }

    /// Wraps a sequence item failure with its field name and index.
    #[must_use]
    pub fn item(field: &'static str, index: usize, source: Self) -> Self {
        Self::Item {
            field,
            index,
            source: Box::new(source),
        }
    }

    /// Dotted path from the validated value to the failing field.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Nested { field, source } => format!("{field}.{}", source.path()),
            Self::Item {
                field,
                index,
                source,
            } => format!("{field}[{index}].{}", source.path()),
            Self::ChoiceRequired { group } => (*group).to_string(),
            Self::Required { field }
            | Self::MinItems { field, .. }
            | Self::MaxLength { field, .. }
            | Self::Pattern { field, .. }
            | Self::Fixed { field, .. }
            | Self::Discriminator { field, .. } => (*field).to_string(),
        }
    }

    /// Innermost failure, with all field context removed.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Nested { source, .. } | Self::Item { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
