//! Main code generator implementation.

use crate::error::CodegenError;
use crate::rust::types::referenced_type;
use crate::rust::{
    StructGenerator, ValidatorGenerator, close_dependencies, format_unit, rendered_types,
    unit_header,
};
use resgen_schema::ir::SchemaIr;
use resgen_schema::naming::{field_ident, to_snake_case};
use resgen_schema::registry::SchemaRegistry;
use resgen_schema::types::{Derivation, Schema, SchemaKind};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Settings for a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    diagnostic_path: PathBuf,
    format: bool,
    header: bool,
    include_logical: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            diagnostic_path: std::env::temp_dir().join("resgen-failed.rs"),
            format: true,
            header: true,
            include_logical: false,
        }
    }
}

impl GeneratorOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets where unparseable output is written.
    #[must_use]
    pub fn with_diagnostic_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.diagnostic_path = path.into();
        self
    }

    /// Enables or disables pretty-printing.
    #[must_use]
    pub fn with_format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }

    /// Enables or disables the header comment.
    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Includes logical models in [`Generator::generate_all`].
    #[must_use]
    pub fn with_include_logical(mut self, include: bool) -> Self {
        self.include_logical = include;
        self
    }

    /// Returns the diagnostic dump path.
    #[must_use]
    pub fn diagnostic_path(&self) -> &Path {
        &self.diagnostic_path
    }

    /// Returns true if output is pretty-printed.
    #[must_use]
    pub fn format(&self) -> bool {
        self.format
    }

    /// Returns true if units start with a header comment.
    #[must_use]
    pub fn header(&self) -> bool {
        self.header
    }

    /// Returns true if logical models are generated.
    #[must_use]
    pub fn include_logical(&self) -> bool {
        self.include_logical
    }
}

/// One generated Rust module.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    /// Source schema name.
    pub schema_name: String,
    /// Name of the unit's top-level type.
    pub type_name: String,
    /// Snake-case module name, also the file stem.
    pub module_name: String,
    /// Module name as written in `mod` items.
    pub module_ident: String,
    /// Formatted source.
    pub source: String,
    /// Types defined by the unit, in output order.
    pub types: Vec<String>,
    /// Types the unit uses that other units define.
    pub dependencies: BTreeSet<String>,
}

impl GeneratedUnit {
    /// Returns the file name of the unit.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.module_name)
    }
}

/// Code generator over a loaded registry.
pub struct Generator<'a> {
    registry: &'a SchemaRegistry,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with default options.
    #[must_use]
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self::with_options(registry, GeneratorOptions::default())
    }

    /// Creates a new generator with the given options.
    #[must_use]
    pub fn with_options(registry: &'a SchemaRegistry, options: GeneratorOptions) -> Self {
        Self { registry, options }
    }

    /// Returns the generator options.
    #[must_use]
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generates the unit for one schema.
    ///
    /// # Errors
    /// Returns `CodegenError` if the schema name gives no usable module name
    /// or the rendered code does not parse.
    pub fn generate(&self, schema: &Schema) -> Result<GeneratedUnit, CodegenError> {
        let module_name = to_snake_case(&schema.name);
        let module_ident = field_ident(&module_name).ok_or_else(|| {
            CodegenError::generation(format!(
                "schema '{}' does not give a usable module name",
                schema.name
            ))
        })?;

        let generated = |name: &str| self.generates_type(name);
        let mut ir = SchemaIr::from_schema(schema);
        let placeholders = close_dependencies(&mut ir, &generated);
        let types = rendered_types(&ir, &generated);
        let names: HashSet<&str> = types.iter().map(|t| t.name.as_str()).collect();

        let dependencies: BTreeSet<String> = types
            .iter()
            .flat_map(|t| t.fields.iter())
            .filter_map(|f| referenced_type(&f.type_expr))
            .filter(|name| !names.contains(name) && self.generates_type(name))
            .map(str::to_string)
            .collect();

        let known = |name: &str| names.contains(name) || self.generates_type(name);
        let structs = StructGenerator::new(&schema.name);
        let validators = ValidatorGenerator::new(&schema.name, &known);

        let mut source = String::new();
        source.push_str("#[allow(unused_imports)]\n");
        source.push_str("use super::*;\n\n");
        for ty in &types {
            source.push_str(&structs.generate(ty, self.generates_type(&ty.name)));
            source.push_str(&validators.generate(ty));
        }

        let mut source = format_unit(
            &schema.name,
            &source,
            self.options.format,
            &self.options.diagnostic_path,
        )?;
        if self.options.header {
            source.insert_str(0, &unit_header(&schema.name));
        }

        info!(
            schema = %schema.name,
            module = %module_name,
            types = types.len(),
            placeholders = placeholders.len(),
            dependencies = dependencies.len(),
            "generated unit"
        );

        Ok(GeneratedUnit {
            schema_name: schema.name.clone(),
            type_name: ir.root_type.clone(),
            module_name,
            module_ident,
            source,
            types: types.iter().map(|t| t.name.clone()).collect(),
            dependencies,
        })
    }

    /// Generates the unit for a schema looked up by name.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownSchema` if the registry has no such
    /// schema, or any error from [`Generator::generate`].
    pub fn generate_schema(&self, name: &str) -> Result<GeneratedUnit, CodegenError> {
        let schema = self
            .registry
            .get(name)
            .ok_or_else(|| CodegenError::UnknownSchema {
                name: name.to_string(),
            })?;
        self.generate(schema)
    }

    /// Generates every compilable schema, ordered by name.
    ///
    /// Profiles (constraint derivations) are skipped, as are logical models
    /// unless enabled in the options.
    ///
    /// # Errors
    /// Returns the first generation error.
    pub fn generate_all(&self) -> Result<Vec<GeneratedUnit>, CodegenError> {
        let mut schemas: Vec<&Schema> = self
            .registry
            .iter()
            .filter(|s| {
                let compiled = self.is_compiled(s);
                if !compiled {
                    debug!(
                        schema = %s.name,
                        kind = ?s.kind,
                        derivation = ?s.derivation,
                        "skipping definition"
                    );
                }
                compiled
            })
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = schemas.len(), "generating units");

        schemas.into_iter().map(|s| self.generate(s)).collect()
    }

    /// Returns true if [`Generator::generate_all`] compiles this schema.
    ///
    /// Profiles (constraint derivations) never are; logical models only
    /// when enabled in the options.
    #[must_use]
    pub fn is_compiled(&self, schema: &Schema) -> bool {
        schema.derivation == Derivation::Specialization
            && (schema.kind != SchemaKind::Logical || self.options.include_logical)
    }

    /// Returns true if a schema compiled in this run defines `type_name`.
    ///
    /// A type that only a profile or a skipped logical model declares does
    /// not count; references to it get a placeholder instead.
    #[must_use]
    pub fn generates_type(&self, type_name: &str) -> bool {
        self.registry
            .schemas_for_type(type_name)
            .any(|s| self.is_compiled(s))
    }
}

/// Renders a `mod.rs` declaring every unit and re-exporting its types.
#[must_use]
pub fn render_module_index(units: &[GeneratedUnit]) -> String {
    let mut output = String::new();
    output.push_str("// Generated by resgen. Do not edit by hand.\n\n");
    for unit in units {
        output.push_str(&format!("pub mod {};\n", unit.module_ident));
    }
    if !units.is_empty() {
        output.push('\n');
    }
    for unit in units {
        output.push_str("#[allow(ambiguous_glob_reexports)]\n");
        output.push_str(&format!("pub use {}::*;\n", unit.module_ident));
    }
    output
}

/// Renders every unit as an inline module in one source, for `include!`.
#[must_use]
pub fn render_bundle(units: &[GeneratedUnit]) -> String {
    let mut output = String::new();
    output.push_str("// Generated by resgen. Do not edit by hand.\n\n");
    for unit in units {
        output.push_str(&format!("pub mod {} {{\n", unit.module_ident));
        for line in unit.source.lines() {
            if line.is_empty() {
                output.push('\n');
            } else {
                output.push_str(&format!("    {line}\n"));
            }
        }
        output.push_str("}\n\n");
    }
    for unit in units {
        output.push_str("#[allow(ambiguous_glob_reexports)]\n");
        output.push_str(&format!("pub use {}::*;\n", unit.module_ident));
    }
    output
}
