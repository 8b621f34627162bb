//! Error types for templates.

use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, FormatError>;

/// A structurally malformed template.
///
/// Positions are byte offsets into the template source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Optional fragment opened at offset {position} is never closed")]
    UnterminatedFragment { position: usize },

    #[error("Escape marker at offset {position} is not followed by a character")]
    DanglingEscape { position: usize },
}

/// A configured template field that failed to compile.
#[derive(Error, Debug)]
#[error("Invalid {field} template '{template}': {source}")]
pub struct FormatsError {
    pub field: &'static str,
    pub template: String,
    #[source]
    pub source: FormatError,
}
