//! # resgen schema
//!
//! Schema model, loader and resolver for resgen.
//!
//! This crate provides:
//! - StructureDefinition XML parsing into [`Schema`] values
//! - A read-only [`SchemaRegistry`] shared across a batch
//! - Type mapping from type codes to [`TypeExpr`]
//! - Element-to-field resolution producing a [`SchemaIr`] for code generation

pub mod elements;
pub mod error;
pub mod ir;
pub mod mapper;
pub mod naming;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validation;

pub use elements::{Cardinality, ElementDef, FixedValue, TypeRef};
pub use error::{ParseError, SchemaError};
pub use ir::{ResolvedField, ResolvedType, SchemaIr, TypeExpr, WireKey};
pub use mapper::{MappedType, TypeMapper};
pub use parser::{parse_bundle, parse_structure_definition};
pub use registry::SchemaRegistry;
pub use types::{Derivation, PrimitiveType, ScalarKind, Schema, SchemaKind};
pub use validation::validate_schema;
