//! Shared config types: errors, diagnostics and field paths.

mod error;
mod field;

pub use error::{ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
