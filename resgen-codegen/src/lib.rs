//! # resgen codegen
//!
//! Rust code generation from structure definitions.
//!
//! This crate provides:
//! - Dependency closure over a schema registry
//! - Struct generation with JSON and XML wire attributes
//! - `Validate` implementation generation
//! - Formatting and module index rendering for build script integration

pub mod error;
pub mod generator;
pub mod rust;

pub use error::CodegenError;
pub use generator::{GeneratedUnit, Generator, GeneratorOptions, render_bundle, render_module_index};

use resgen_schema::SchemaRegistry;

/// Generates every compilable unit from a StructureDefinition or Bundle
/// document.
///
/// # Arguments
/// * `xml` - Document content
///
/// # Errors
/// Returns `CodegenError` if loading or generation fails.
pub fn generate_from_xml(xml: &str) -> Result<Vec<GeneratedUnit>, CodegenError> {
    let registry = SchemaRegistry::from_xml(xml)?;
    Generator::new(&registry).generate_all()
}

/// Generates every compilable unit from a document on disk.
///
/// # Errors
/// Returns `CodegenError` if reading, loading or generation fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<Vec<GeneratedUnit>, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"<StructureDefinition xmlns="http://hl7.org/fhir">
  <name value="Flag"/>
  <kind value="resource"/>
  <abstract value="false"/>
  <derivation value="specialization"/>
  <snapshot>
    <element id="Flag">
      <path value="Flag"/>
      <min value="0"/>
      <max value="*"/>
    </element>
    <element id="Flag.status">
      <path value="Flag.status"/>
      <min value="1"/>
      <max value="1"/>
      <type>
        <code value="code"/>
      </type>
    </element>
  </snapshot>
</StructureDefinition>"#;

    #[test]
    fn test_generate_from_xml() {
        let units = generate_from_xml(DOCUMENT).expect("generates");
        assert_eq!(units.len(), 1);
        let unit = &units[0];
        assert_eq!(unit.module_name, "flag");
        assert!(unit.source.contains("pub struct Flag {"));
        assert!(unit.source.contains("pub status: ::std::string::String,"));
        assert!(unit.source.contains("pub const RESOURCE_TYPE: &str = \"Flag\";"));
    }

    #[test]
    fn test_generate_from_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = generate_from_file(&dir.path().join("missing.xml")).expect_err("missing");
        assert!(matches!(err, CodegenError::Io(_)));
    }

    #[test]
    fn test_generate_from_invalid_xml() {
        assert!(generate_from_xml("<StructureDefinition>").is_err());
    }
}
