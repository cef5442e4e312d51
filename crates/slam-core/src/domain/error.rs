// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("Unresolved placeholder '${{{name}}}' in {location}")]
    UnresolvedPlaceholder { name: String, location: String },

    #[error("Malformed placeholder in {location}: {reason}")]
    MalformedPlaceholder { location: String, reason: String },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{name}' has no files")]
    EmptyTemplate { name: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the target directory: {path}")]
    PathEscapesTarget { path: String },

    // ========================================================================
    // Invocation Errors
    // ========================================================================
    #[error("Invocation has no program to run")]
    EmptyInvocation,

    #[error("Invalid substitution '{pair}': expected KEY=VALUE")]
    InvalidSubstitution { pair: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnresolvedPlaceholder { name, .. } => vec![
                format!("Provide a value with --var {name}=<value>"),
                "Escape a literal dollar sign as $$".into(),
            ],
            Self::MalformedPlaceholder { .. } => vec![
                "Placeholders look like ${NAME} or $NAME".into(),
                "Escape a literal dollar sign as $$".into(),
            ],
            Self::EmptyTemplate { name } => vec![
                format!("Template '{name}' contains no files"),
                "Add files to the template directory".into(),
            ],
            Self::InvalidSubstitution { .. } => {
                vec!["Variables are passed as --var NAME=value".into()]
            }
            Self::AbsolutePathNotAllowed { .. } | Self::PathEscapesTarget { .. } => vec![
                "Template paths must stay inside the project".into(),
                "Check the substituted values for '/' or '..'".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyInvocation => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
