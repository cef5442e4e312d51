//! Unified error handling for slam core.
//!
//! This module provides a unified error type that wraps domain and
//! application errors, plus the two failure kinds callers most often match
//! on: [`CommandFailure`] and [`PreconditionFailure`].

use thiserror::Error;

use crate::application::{ApplicationError, CommandFailure, PreconditionFailure};
use crate::domain::DomainError;

/// Root error type for slam core operations.
#[derive(Debug, Error, Clone)]
pub enum SlamError {
    /// An external invocation returned nonzero.
    #[error(transparent)]
    Command(#[from] CommandFailure),

    /// A scaffolding/init precondition was violated.
    #[error(transparent)]
    Precondition(#[from] PreconditionFailure),

    /// Errors from the domain layer (rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O and orchestration).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl SlamError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Command(failure) => {
                let mut out = Vec::new();
                if !failure.stderr.is_empty() {
                    out.push("Tool output:".to_string());
                    out.extend(failure.stderr.lines().map(|l| format!("  {l}")));
                }
                out.push("Re-run with --verbose to stream the tool output".into());
                out
            }
            Self::Precondition(e) => e.suggestions(),
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Command(_) => ErrorCategory::Command,
            Self::Precondition(_) => ErrorCategory::Precondition,
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Command,
    Precondition,
    Validation,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type SlamResult<T> = Result<T, SlamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn command_failure_suggestions_include_stderr() {
        let err: SlamError = CommandFailure {
            command: "poetry run pytest".into(),
            code: 1,
            stderr: "E   assert 1 == 2".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Command);
        assert!(err.suggestions().iter().any(|s| s.contains("assert 1 == 2")));
    }

    #[test]
    fn precondition_category() {
        let err: SlamError = PreconditionFailure::ManifestMissing {
            path: PathBuf::from("pyproject.toml"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Precondition);
        assert_eq!(err.to_string(), "No project manifest found at pyproject.toml");
    }

    #[test]
    fn domain_errors_are_validation() {
        let err: SlamError = DomainError::InvalidSubstitution { pair: "x".into() }.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
