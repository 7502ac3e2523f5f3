//! Struct code generation.

use crate::rust::types::{doc_text, rust_type, skip_predicate, string_literal};
use resgen_schema::ir::{ResolvedField, ResolvedType};

/// Derives shared by every generated struct, `Default` aside.
const DERIVES: &str = "Debug, Clone, PartialEq, resgen_core::serde::Serialize, \
                       resgen_core::serde::Deserialize, resgen_core::XmlElement";

/// Generator for struct definitions.
pub struct StructGenerator<'a> {
    schema_name: &'a str,
}

impl<'a> StructGenerator<'a> {
    /// Creates a new struct generator for one unit.
    #[must_use]
    pub fn new(schema_name: &'a str) -> Self {
        Self { schema_name }
    }

    /// Generates the struct for a type.
    ///
    /// `generated` tells whether a schema compiled in this run defines this
    /// type, which only changes the comment on zero-field types.
    #[must_use]
    pub fn generate(&self, ty: &ResolvedType, generated: bool) -> String {
        let mut output = String::new();
        let discriminator = ty.fields.iter().find(|f| f.discriminator.is_some());

        let doc = ty.doc.as_deref().map(doc_text).filter(|d| !d.is_empty());
        if let Some(doc) = &doc {
            output.push_str(&format!("/// {doc}\n"));
        }
        if ty.is_empty() {
            if doc.is_some() {
                output.push_str("///\n");
            }
            if generated {
                output.push_str("/// Defined with no fields of its own.\n");
            } else {
                output.push_str(&format!(
                    "/// Referenced from `{}` without a definition of its own; kept empty.\n",
                    self.schema_name
                ));
            }
        }

        if discriminator.is_some() {
            output.push_str(&format!("#[derive({DERIVES})]\n"));
        } else {
            output.push_str(&format!("#[derive({DERIVES}, Default)]\n"));
        }
        output.push_str("#[serde(crate = \"resgen_core::serde\", default)]\n");
        output.push_str(&format!("pub struct {} {{\n", ty.name));
        for field in &ty.fields {
            output.push_str(&self.generate_field(field));
        }
        output.push_str("}\n\n");

        if let Some(field) = discriminator {
            output.push_str(&self.generate_default(ty, field));
        }

        output
    }

    /// Generates one field with its doc line and wire attributes.
    fn generate_field(&self, field: &ResolvedField) -> String {
        let mut output = String::new();

        if let Some(short) = field.short.as_deref().map(doc_text).filter(|s| !s.is_empty()) {
            output.push_str(&format!("    /// {short}\n"));
        }

        let json = &field.json;
        if json.omit_empty {
            output.push_str(&format!(
                "    #[serde(rename = {}, skip_serializing_if = {})]\n",
                string_literal(&json.name),
                string_literal(skip_predicate(&field.type_expr))
            ));
        } else {
            output.push_str(&format!(
                "    #[serde(rename = {})]\n",
                string_literal(&json.name)
            ));
        }

        match &field.xml {
            Some(xml) if xml.omit_empty => output.push_str(&format!(
                "    #[xml(rename = {}, omit_empty)]\n",
                string_literal(&xml.name)
            )),
            Some(xml) => output.push_str(&format!(
                "    #[xml(rename = {})]\n",
                string_literal(&xml.name)
            )),
            None => output.push_str("    #[xml(skip)]\n"),
        }

        output.push_str(&format!(
            "    pub {}: {},\n",
            field.name,
            rust_type(&field.type_expr)
        ));

        output
    }

    /// Generates `Default` and the type constant for a resource root, so a
    /// default value already carries its discriminator.
    fn generate_default(&self, ty: &ResolvedType, discriminator: &ResolvedField) -> String {
        let mut output = String::new();
        let expected = discriminator.discriminator.as_deref().unwrap_or(self.schema_name);

        output.push_str(&format!("impl ::std::default::Default for {} {{\n", ty.name));
        output.push_str("    fn default() -> Self {\n");
        output.push_str("        Self {\n");
        for field in &ty.fields {
            if field.discriminator.is_some() {
                output.push_str(&format!(
                    "            {}: ::std::string::String::from({}),\n",
                    field.name,
                    string_literal(expected)
                ));
            } else {
                output.push_str(&format!(
                    "            {}: ::std::default::Default::default(),\n",
                    field.name
                ));
            }
        }
        output.push_str("        }\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str(&format!("impl {} {{\n", ty.name));
        output.push_str("    /// Value of the resource discriminator.\n");
        output.push_str(&format!(
            "    pub const RESOURCE_TYPE: &str = {};\n",
            string_literal(expected)
        ));
        output.push_str("}\n\n");

        output
    }
}
