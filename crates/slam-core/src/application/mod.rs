//! Application layer for slam.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (BuildService, ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer; the rules themselves
//! live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{BuildService, Phase, ScaffoldService};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandExecutor, Filesystem, TemplateStore};

pub use error::{ApplicationError, CommandFailure, PreconditionFailure};
