//! Costume document validation.

mod checks;
mod warning;

pub use checks::validate_doc;
pub use warning::{Diagnostic, EntryRef, Severity, ValidationResult};
