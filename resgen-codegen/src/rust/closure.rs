//! Dependency closure and selection of the types a unit renders.

use crate::rust::types::referenced_type;
use resgen_schema::ir::{ResolvedType, SchemaIr};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Adds an empty placeholder for every referenced type that nothing defines.
///
/// A name is left alone when the unit already has it, `generated` reports
/// another unit of the run defines it, or it is the schema's declared base
/// type. Placeholders are added in name order. Returns the names added.
pub fn close_dependencies(ir: &mut SchemaIr, generated: &dyn Fn(&str) -> bool) -> Vec<String> {
    let missing: BTreeSet<String> = ir
        .types()
        .iter()
        .flat_map(|t| t.fields.iter())
        .filter_map(|f| referenced_type(&f.type_expr))
        .filter(|name| {
            !ir.contains_type(name)
                && !generated(name)
                && ir.base_type_name.as_deref() != Some(*name)
        })
        .map(str::to_string)
        .collect();

    for name in &missing {
        debug!(schema = %ir.schema_name, type_name = %name, "adding placeholder type");
        ir.ensure_type(name);
    }

    missing.into_iter().collect()
}

/// Types the unit renders, in creation order.
///
/// Types with fields are always rendered. A zero-field type is rendered
/// when `generated` reports the run defines it or a rendered field refers
/// to it; otherwise it is elided.
#[must_use]
pub fn rendered_types<'a>(
    ir: &'a SchemaIr,
    generated: &dyn Fn(&str) -> bool,
) -> Vec<&'a ResolvedType> {
    let referenced: HashSet<&str> = ir
        .types()
        .iter()
        .flat_map(|t| t.fields.iter())
        .filter_map(|f| referenced_type(&f.type_expr))
        .collect();

    ir.types()
        .iter()
        .filter(|t| {
            let keep = !t.is_empty()
                || generated(&t.name)
                || referenced.contains(t.name.as_str());
            if !keep {
                debug!(schema = %ir.schema_name, type_name = %t.name, "eliding empty type");
            }
            keep
        })
        .collect()
}
