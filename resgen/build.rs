//! Build script for resgen.
//!
//! Compiles the definitions under `tests/fixtures` into one bundle source so
//! the end-to-end tests can `include!` generated code.

use resgen_codegen::{Generator, GeneratorOptions, render_bundle};
use resgen_schema::SchemaRegistry;
use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

const FIXTURES: &str = "tests/fixtures";

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed={FIXTURES}");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let registry = load_fixtures(Path::new(FIXTURES))?;

    let options = GeneratorOptions::new().with_diagnostic_path(out_dir.join("fhir-failed.rs"));
    let units = Generator::with_options(&registry, options).generate_all()?;

    fs::write(out_dir.join("fhir.rs"), render_bundle(&units))?;
    Ok(())
}

fn load_fixtures(dir: &Path) -> Result<SchemaRegistry, Box<dyn Error>> {
    let mut registry = SchemaRegistry::new();
    if !dir.is_dir() {
        return Ok(registry);
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "xml") {
            paths.push(path);
        }
    }
    paths.sort();

    for path in paths {
        println!("cargo:rerun-if-changed={}", path.display());
        registry.load_xml(&fs::read_to_string(&path)?)?;
    }
    Ok(registry)
}
