//! Core domain layer for slam.
//!
//! Pure data and rules: no process spawning, no filesystem access. All I/O
//! goes through the ports in [`crate::application::ports`].
//!
//! - **Invocations**: what to run ([`Invocation`], [`Toolchain`]) and what came
//!   back ([`ExecutionResult`]).
//! - **Templates**: [`Template`] trees rendered through a [`SubstitutionMap`].
//! - **Projects**: [`ProjectLayout`] and the [`ManifestDefaults`] block.

pub mod entities;
pub mod error;

pub use entities::{
    invocation::{ExecutionResult, Invocation, ToolSpec, Toolchain},
    project::{DEFAULTS_MARKER, ManifestDefaults, ProjectLayout},
    template::{
        RenderedEntry, SubstitutionMap, Template, TemplateContent, TemplateFile, to_snake_case,
    },
};

pub use error::{DomainError, ErrorCategory};
