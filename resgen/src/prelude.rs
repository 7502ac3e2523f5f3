//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use resgen::prelude::*;
//! ```

// Runtime types
pub use resgen_core::{RawValue, Validate, ValidationError, XmlElement, XmlValue};

// Schema types
pub use resgen_schema::{
    ElementDef, ParseError, Schema, SchemaError, SchemaIr, SchemaKind, SchemaRegistry, TypeExpr,
};

// Code generation
pub use resgen_codegen::{
    CodegenError, GeneratedUnit, Generator, GeneratorOptions, render_bundle, render_module_index,
};
