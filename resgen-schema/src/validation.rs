//! Schema validation utilities.
//!
//! Structural sanity checks run on freshly loaded schemas, before they enter
//! a registry.

use crate::error::SchemaError;
use crate::types::Schema;
use std::collections::HashSet;

/// Validates a loaded schema for structural sanity.
///
/// # Errors
/// Returns `SchemaError` if the name is empty, element paths do not share a
/// single root segment, or two elements share an id.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    validate_name(schema)?;
    validate_paths(schema)?;
    validate_ids(schema)?;
    Ok(())
}

fn validate_name(schema: &Schema) -> Result<(), SchemaError> {
    if schema.name.trim().is_empty() {
        return Err(SchemaError::validation("schema name is empty"));
    }
    Ok(())
}

/// Every path must be non-empty and start with the same root segment.
fn validate_paths(schema: &Schema) -> Result<(), SchemaError> {
    let Some(root) = schema.root_path() else {
        return Ok(());
    };

    for element in &schema.elements {
        if element.path.split('.').any(str::is_empty) {
            return Err(SchemaError::validation(format!(
                "element '{}' in schema '{}' has an empty path segment",
                element.id, schema.name
            )));
        }
        if element.segments().next() != Some(root) {
            return Err(SchemaError::validation(format!(
                "element '{}' in schema '{}' is not rooted at '{}'",
                element.path, schema.name, root
            )));
        }
    }

    Ok(())
}

fn validate_ids(schema: &Schema) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for element in &schema.elements {
        if !seen.insert(element.id.as_str()) {
            return Err(SchemaError::DuplicateElement {
                schema: schema.name.clone(),
                id: element.id.clone(),
            });
        }
    }
    Ok(())
}
