//! Rust code generation modules.

pub mod closure;
pub mod format;
pub mod structs;
pub mod types;
pub mod validators;

pub use closure::{close_dependencies, rendered_types};
pub use format::{format_unit, unit_header};
pub use structs::StructGenerator;
pub use validators::ValidatorGenerator;
