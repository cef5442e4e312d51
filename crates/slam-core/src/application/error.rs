//! Application layer errors.
//!
//! These errors represent failures while talking to the outside world
//! (processes, files, template storage), not rule violations. Rule violations
//! are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{ExecutionResult, Invocation};
use crate::error::ErrorCategory;

/// An external invocation exited with a nonzero status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Command failed with exit code {code}: {command}")]
pub struct CommandFailure {
    /// The full command line that was run.
    pub command: String,
    pub code: i32,
    /// Captured standard error; empty when output was streamed.
    pub stderr: String,
}

impl CommandFailure {
    pub fn new(invocation: &Invocation, result: &ExecutionResult) -> Self {
        Self {
            command: invocation.command_line(),
            code: result.returncode,
            stderr: result.stderr_lossy().trim_end().to_string(),
        }
    }

    /// Exit code to hand back to the OS: the child's own code when it fits
    /// in `1..=255`, otherwise 1.
    pub fn exit_code(&self) -> u8 {
        ExecutionResult::clamp_exit_code(self.code)
    }
}

/// A scaffolding or init precondition did not hold.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreconditionFailure {
    #[error("{path} is not a project root (no {marker} present)")]
    NotProjectRoot { path: PathBuf, marker: String },

    #[error("A project manifest already exists at {path}")]
    ManifestExists { path: PathBuf },

    #[error("No project manifest found at {path}")]
    ManifestMissing { path: PathBuf },

    #[error("Defaults were already applied to {path}")]
    DefaultsAlreadyApplied { path: PathBuf },
}

impl PreconditionFailure {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotProjectRoot { marker, .. } => vec![
                "Templates are only applied at the root of a repository".into(),
                format!("Run 'git init' first, or pass --project-root (looking for {marker})"),
            ],
            Self::ManifestExists { .. } => vec![
                "Templates are for new projects only".into(),
                "Maybe you meant 'slam init', to apply defaults to your manifest?".into(),
            ],
            Self::ManifestMissing { .. } => vec![
                "'slam init' updates an existing manifest".into(),
                "Create one with 'poetry init' or scaffold with 'slam new'".into(),
            ],
            Self::DefaultsAlreadyApplied { .. } => vec![
                "Nothing to do; the manifest was left unchanged".into(),
            ],
        }
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The executable could not be started at all.
    #[error("Failed to start '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// No template with that name.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// A template could not be read from its store.
    #[error("Failed to load template '{name}': {reason}")]
    TemplateLoad { name: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SpawnFailed { program, .. } => vec![
                format!("Ensure '{program}' is installed and in your PATH"),
                "Point slam at it with --package-manager or the config file".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::TemplateNotFound { .. } => vec![
                "List available templates: slam list".into(),
                "Point at your own templates with --templates-dir".into(),
            ],
            Self::TemplateLoad { .. } => vec!["Check the template directory contents".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SpawnFailed { .. } => ErrorCategory::Command,
            Self::FilesystemError { .. } | Self::TemplateLoad { .. } => ErrorCategory::Internal,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}
