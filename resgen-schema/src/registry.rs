//! Schema registry shared read-only across a batch.

use crate::error::SchemaError;
use crate::parser::parse_bundle;
use crate::types::Schema;
use crate::validation::validate_schema;
use std::collections::HashMap;

/// Name-keyed collection of loaded schemas.
///
/// Populated once before compilation starts, then only read. Lookups work
/// both by schema name (`string`) and by generated type name (`String`).
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: Vec<Schema>,
    by_name: HashMap<String, usize>,
    by_type_name: HashMap<String, Vec<usize>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a schema.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateSchema` if the name is already taken.
    pub fn insert(&mut self, schema: Schema) -> Result<(), SchemaError> {
        if self.by_name.contains_key(&schema.name) {
            return Err(SchemaError::DuplicateSchema { name: schema.name });
        }
        let index = self.schemas.len();
        self.by_name.insert(schema.name.clone(), index);
        self.by_type_name
            .entry(schema.type_name())
            .or_default()
            .push(index);
        self.schemas.push(schema);
        Ok(())
    }

    /// Adds every schema from an iterator.
    ///
    /// # Errors
    /// Returns the first duplicate encountered.
    pub fn extend(&mut self, schemas: impl IntoIterator<Item = Schema>) -> Result<(), SchemaError> {
        for schema in schemas {
            self.insert(schema)?;
        }
        Ok(())
    }

    /// Creates a registry from one StructureDefinition or Bundle document.
    ///
    /// # Errors
    /// Returns `SchemaError` if parsing or validation fails, or if two
    /// definitions share a name.
    pub fn from_xml(xml: &str) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        registry.load_xml(xml)?;
        Ok(registry)
    }

    /// Parses a document, validates each definition and adds it.
    ///
    /// Returns the number of schemas added.
    ///
    /// # Errors
    /// Returns `SchemaError` if parsing or validation fails, or if a name is
    /// already taken.
    pub fn load_xml(&mut self, xml: &str) -> Result<usize, SchemaError> {
        let schemas = parse_bundle(xml)?;
        let count = schemas.len();
        for schema in schemas {
            validate_schema(&schema)?;
            self.insert(schema)?;
        }
        Ok(count)
    }

    /// Looks up a schema by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.by_name.get(name).map(|&idx| &self.schemas[idx])
    }

    /// Looks up a schema by name, failing if absent.
    ///
    /// # Errors
    /// Returns `SchemaError::SchemaNotFound` if no schema has this name.
    pub fn require(&self, name: &str) -> Result<&Schema, SchemaError> {
        self.get(name).ok_or_else(|| SchemaError::SchemaNotFound {
            name: name.to_string(),
        })
    }

    /// Returns true if a schema with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterates the schemas whose generated type has this name, in
    /// insertion order.
    pub fn schemas_for_type(&self, type_name: &str) -> impl Iterator<Item = &Schema> {
        self.by_type_name
            .get(type_name)
            .into_iter()
            .flatten()
            .map(|&idx| &self.schemas[idx])
    }

    /// Iterates schemas in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.iter()
    }

    /// Returns the number of schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
