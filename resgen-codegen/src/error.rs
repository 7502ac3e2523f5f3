//! Error types for code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] resgen_schema::ParseError),

    /// Schema validation or registry error.
    #[error("schema error: {0}")]
    Schema(#[from] resgen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },

    /// Rendered unit failed to parse as Rust.
    #[error(
        "generated code for '{schema}' does not parse{}: {message} (unformatted source written to {})",
        .line.map(|l| format!(" at line {l}")).unwrap_or_default(),
        .dump_path.display()
    )]
    Format {
        /// Schema name.
        schema: String,
        /// Best-effort line of the failure in the dumped source.
        line: Option<usize>,
        /// Where the unformatted source was written.
        dump_path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Requested schema is not in the registry.
    #[error("unknown schema '{name}'")]
    UnknownSchema {
        /// Schema name.
        name: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}
