//! Parsing and pretty-printing of rendered units.

use crate::error::CodegenError;
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Formats one rendered unit.
///
/// The source must parse as a Rust file. On failure the raw text is written
/// to `dump_path` and the error carries the offending line. When `pretty` is
/// off a parseable source is returned untouched.
///
/// # Errors
/// Returns [`CodegenError::Format`] when the source does not parse, or
/// [`CodegenError::Io`] when the dump cannot be written.
pub fn format_unit(
    schema: &str,
    source: &str,
    pretty: bool,
    dump_path: &Path,
) -> Result<String, CodegenError> {
    let file = match syn::parse_file(source) {
        Ok(file) => file,
        Err(err) => {
            let line = err.span().start().line;
            if let Some(parent) = dump_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(dump_path, source)?;
            error!(
                schema = %schema,
                dump = %dump_path.display(),
                line,
                "generated code does not parse"
            );
            return Err(CodegenError::Format {
                schema: schema.to_string(),
                line: (line > 0).then_some(line),
                dump_path: dump_path.to_path_buf(),
                message: err.to_string(),
            });
        }
    };

    if !pretty {
        return Ok(source.to_string());
    }

    debug!(schema = %schema, items = file.items.len(), "formatting unit");
    Ok(prettyplease::unparse(&file))
}

/// Header comment for a generated unit.
#[must_use]
pub fn unit_header(schema: &str) -> String {
    format!(
        "// Generated by resgen from the `{schema}` structure definition.\n// Do not edit by hand.\n\n"
    )
}
