//! Error types for schema loading and validation.

use thiserror::Error;

/// Error type for schema parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute.
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Missing required child element.
    #[error("missing required element '{element}' in '{context}'")]
    MissingElement {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
    },

    /// Invalid element value.
    #[error("invalid value '{value}' for '{element}' in '{context}'")]
    InvalidValue {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
        /// Invalid value.
        value: String,
    },

    /// Invalid document structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for schema validation and registry operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Schema not found in the registry.
    #[error("schema '{name}' not found")]
    SchemaNotFound {
        /// Schema name.
        name: String,
    },

    /// Two schemas share a name.
    #[error("duplicate schema definition: '{name}'")]
    DuplicateSchema {
        /// Schema name.
        name: String,
    },

    /// Two elements share an id.
    #[error("duplicate element id '{id}' in schema '{schema}'")]
    DuplicateElement {
        /// Schema name.
        schema: String,
        /// Element id.
        id: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a missing element error.
    pub fn missing(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingElement {
            element: element.into(),
            context: context.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid(
        element: impl Into<String>,
        context: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            element: element.into(),
            context: context.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

impl SchemaError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
