//! Validator code generation.
//!
//! Each rendered type gets an `impl resgen_core::Validate`. Checks follow
//! field declaration order and return on the first violation.

use crate::rust::types::{referenced_type, string_literal, unset_check};
use resgen_schema::elements::FixedValue;
use resgen_schema::ir::{ResolvedField, ResolvedType};
use resgen_schema::{ScalarKind, TypeExpr};
use std::collections::HashSet;
use tracing::warn;

const ERROR: &str = "resgen_core::ValidationError";

/// Generator for `Validate` implementations.
pub struct ValidatorGenerator<'a> {
    schema_name: &'a str,
    known: &'a dyn Fn(&str) -> bool,
}

impl<'a> ValidatorGenerator<'a> {
    /// Creates a new validator generator.
    ///
    /// `known` tells whether a type name is rendered in this unit or
    /// defined by another unit of the run; only those are validated
    /// recursively.
    #[must_use]
    pub fn new(schema_name: &'a str, known: &'a dyn Fn(&str) -> bool) -> Self {
        Self { schema_name, known }
    }

    /// Generates the `Validate` implementation for a type.
    #[must_use]
    pub fn generate(&self, ty: &ResolvedType) -> String {
        let mut output = String::new();
        let mut groups: HashSet<&str> = HashSet::new();

        output.push_str(&format!("impl resgen_core::Validate for {} {{\n", ty.name));
        output.push_str(&format!(
            "    fn validate(&self) -> ::std::result::Result<(), {ERROR}> {{\n"
        ));
        for field in &ty.fields {
            if let Some(group) = field.choice_group.as_deref() {
                if field.is_required && groups.insert(group) {
                    output.push_str(&self.generate_choice_check(ty, group));
                }
            }
            output.push_str(&self.generate_field_checks(field));
        }
        output.push_str("        ::std::result::Result::Ok(())\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }

    /// One check for a required choice: at least one alternative is set.
    fn generate_choice_check(&self, ty: &ResolvedType, group: &str) -> String {
        let unset: Vec<String> = ty
            .fields
            .iter()
            .filter(|f| f.choice_group.as_deref() == Some(group))
            .map(|f| unset_check(&f.type_expr, &format!("self.{}", f.name)))
            .collect();

        format!(
            "        if {} {{\n            return ::std::result::Result::Err({ERROR}::choice_required({}));\n        }}\n",
            unset.join(" && "),
            string_literal(group)
        )
    }

    fn generate_field_checks(&self, field: &ResolvedField) -> String {
        let mut output = String::new();
        let access = format!("self.{}", field.name);
        let label = string_literal(&field.wire_name);

        if let Some(expected) = field.discriminator.as_deref() {
            output.push_str(&format!(
                "        if {access} != {expected} {{\n            return ::std::result::Result::Err({ERROR}::discriminator({label}, {expected}, &{access}));\n        }}\n",
                expected = string_literal(expected)
            ));
            return output;
        }

        if field.is_required && field.choice_group.is_none() {
            output.push_str(&self.generate_required(field, &access, &label));
        }
        output.push_str(&self.generate_value_checks(field, &access, &label));
        output.push_str(&self.generate_nested(field, &access, &label));

        output
    }

    fn generate_required(&self, field: &ResolvedField, access: &str, label: &str) -> String {
        match &field.type_expr {
            TypeExpr::Sequence(_) => format!(
                "        if {access}.len() < {min} {{\n            return ::std::result::Result::Err({ERROR}::min_items({label}, {min}, {access}.len()));\n        }}\n",
                min = field.min
            ),
            // `false` cannot be told apart from unset.
            TypeExpr::Scalar(ScalarKind::Boolean) => String::new(),
            expr @ (TypeExpr::Optional(_) | TypeExpr::Scalar(_)) => format!(
                "        if {} {{\n            return ::std::result::Result::Err({ERROR}::required({label}));\n        }}\n",
                unset_check(expr, access)
            ),
            TypeExpr::Opaque | TypeExpr::Named(_) => String::new(),
        }
    }

    /// Length, pattern and fixed-value checks on a bare or optional scalar.
    fn generate_value_checks(&self, field: &ResolvedField, access: &str, label: &str) -> String {
        let (kind, optional) = match &field.type_expr {
            TypeExpr::Scalar(kind) => (*kind, false),
            TypeExpr::Optional(inner) => match inner.as_ref() {
                TypeExpr::Scalar(kind) => (*kind, true),
                _ => return String::new(),
            },
            _ => return String::new(),
        };

        let mut checks = Vec::new();

        if let Some(max) = field.max_length.filter(|_| kind.is_text()) {
            checks.push(format!(
                "if v.chars().count() > {max} {{\n    return ::std::result::Result::Err({ERROR}::max_length({label}, {max}, v.chars().count()));\n}}"
            ));
        }

        if let Some(pattern) = field.pattern.as_deref().filter(|_| kind.is_text()) {
            if resgen_core::pattern::is_valid(pattern) {
                let pattern = string_literal(pattern);
                checks.push(format!(
                    "if !resgen_core::pattern::full_match({pattern}, v) {{\n    return ::std::result::Result::Err({ERROR}::pattern({label}, {pattern}));\n}}"
                ));
            } else {
                warn!(
                    schema = %self.schema_name,
                    path = %field.source_path,
                    pattern = %pattern,
                    "dropping pattern that does not compile"
                );
            }
        }

        if let Some(fixed) = &field.fixed_value {
            match fixed_literal(kind, fixed) {
                Some(literal) => {
                    let value = if kind.is_text() { "v" } else { "*v" };
                    let expected = if kind.is_text() {
                        literal.clone()
                    } else {
                        string_literal(&literal)
                    };
                    checks.push(format!(
                        "if {value} != {literal} {{\n    return ::std::result::Result::Err({ERROR}::fixed({label}, {expected}));\n}}"
                    ));
                }
                None => warn!(
                    schema = %self.schema_name,
                    path = %field.source_path,
                    "dropping fixed value that does not fit the field type"
                ),
            }
        }

        if checks.is_empty() {
            return String::new();
        }

        let body: String = checks
            .iter()
            .flat_map(|check| check.lines())
            .map(|line| format!("            {line}\n"))
            .collect();
        if optional {
            format!("        if let ::std::option::Option::Some(v) = &{access} {{\n{body}        }}\n")
        } else if field.is_required {
            format!("        {{\n            let v = &{access};\n{body}        }}\n")
        } else {
            // A bare scalar at its default value counts as unset.
            format!(
                "        if !resgen_core::is_default(&{access}) {{\n            let v = &{access};\n{body}        }}\n"
            )
        }
    }

    /// Recursive validation of composite values.
    fn generate_nested(&self, field: &ResolvedField, access: &str, label: &str) -> String {
        let Some(name) = referenced_type(&field.type_expr) else {
            return String::new();
        };
        if !(self.known)(name) {
            return String::new();
        }

        match &field.type_expr {
            TypeExpr::Sequence(_) => {
                format!("        resgen_core::validate_items({label}, &{access})?;\n")
            }
            TypeExpr::Optional(_) => format!(
                "        if let ::std::option::Option::Some(v) = &{access} {{\n            resgen_core::Validate::validate(v).map_err(|e| {ERROR}::nested({label}, e))?;\n        }}\n"
            ),
            _ => String::new(),
        }
    }
}

/// Rust literal a fixed value compares against, or `None` when the literal
/// does not fit the field's kind.
fn fixed_literal(kind: ScalarKind, fixed: &FixedValue) -> Option<String> {
    match kind {
        ScalarKind::Text => Some(string_literal(&match fixed {
            FixedValue::Text(s) => s.clone(),
            FixedValue::Boolean(b) => b.to_string(),
            FixedValue::Number(n) => n.to_string(),
        })),
        ScalarKind::Boolean => match fixed {
            FixedValue::Boolean(b) => Some(b.to_string()),
            FixedValue::Text(s) => s.trim().parse::<bool>().ok().map(|b| b.to_string()),
            FixedValue::Number(_) => None,
        },
        ScalarKind::Integer => integral(fixed)
            .filter(|n| i32::try_from(*n).is_ok())
            .map(|n| n.to_string()),
        ScalarKind::Integer64 => integral(fixed).map(|n| n.to_string()),
        ScalarKind::Decimal => decimal(fixed).map(|n| format!("{n:?}")),
    }
}

/// Integer value of a fixed literal, truncating fractions.
fn integral(fixed: &FixedValue) -> Option<i64> {
    match fixed {
        FixedValue::Number(n) => truncate(*n),
        FixedValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| s.trim().parse::<f64>().ok().and_then(truncate)),
        FixedValue::Boolean(_) => None,
    }
}

fn truncate(n: f64) -> Option<i64> {
    let t = n.trunc();
    (t.is_finite() && t >= i64::MIN as f64 && t <= i64::MAX as f64).then_some(t as i64)
}

fn decimal(fixed: &FixedValue) -> Option<f64> {
    let value = match fixed {
        FixedValue::Number(n) => Some(*n),
        FixedValue::Text(s) => s.trim().parse::<f64>().ok(),
        FixedValue::Boolean(_) => None,
    };
    value.filter(|n| n.is_finite())
}
