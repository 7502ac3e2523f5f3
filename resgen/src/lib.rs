//! # resgen
//!
//! Compiles FHIR-style StructureDefinitions into Rust types with structural
//! validators.
//!
//! Each definition becomes one module holding its top-level type, the nested
//! types its backbone elements introduce and a `Validate` implementation per
//! type. Generated types serialize to JSON through serde and to XML through
//! `#[derive(XmlElement)]`.
//!
//! ## Quick Start
//!
//! In a build script:
//!
//! ```ignore
//! use resgen::prelude::*;
//!
//! let registry = SchemaRegistry::from_xml(&std::fs::read_to_string("profiles.xml")?)?;
//! let units = Generator::new(&registry).generate_all()?;
//! std::fs::write(out_dir.join("fhir.rs"), render_bundle(&units))?;
//! ```
//!
//! Then in the crate:
//!
//! ```ignore
//! mod fhir {
//!     include!(concat!(env!("OUT_DIR"), "/fhir.rs"));
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime support: `Validate`, validation errors, XML encoding
//! - [`schema`] - Definition parsing, registry and type resolution
//! - [`codegen`] - Rust code generation from resolved schemas

pub mod prelude;

/// Runtime support for generated code.
pub mod core {
    pub use resgen_core::*;
}

/// Definition parsing, registry and type resolution.
pub mod schema {
    pub use resgen_schema::*;
}

/// Rust code generation.
pub mod codegen {
    pub use resgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use resgen_codegen::{
    CodegenError, GeneratedUnit, Generator, GeneratorOptions, generate_from_file,
    generate_from_xml, render_bundle, render_module_index,
};
pub use resgen_core::{RawValue, Validate, ValidationError};
pub use resgen_schema::{Schema, SchemaIr, SchemaRegistry};
