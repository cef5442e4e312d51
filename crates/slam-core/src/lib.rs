//! slam core - ports and adapters around a Poetry build wrapper
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             slam-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (BuildService, ScaffoldService)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (CommandExecutor, Filesystem, Templates)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     slam-adapters (Infrastructure)      │
//! │ (SystemExecutor, LocalFilesystem, ...)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slam_core::prelude::*;
//!
//! # fn demo(executor: Box<dyn CommandExecutor>) -> SlamResult<()> {
//! let service = BuildService::new(executor, Toolchain::default()).verbose(true);
//! service.build(&mut |phase| println!("{}", phase.label()))?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildService, CommandFailure, Phase, PreconditionFailure, ScaffoldService,
        ports::{CommandExecutor, Filesystem, TemplateStore},
    };
    pub use crate::domain::{
        ExecutionResult, Invocation, ManifestDefaults, ProjectLayout, SubstitutionMap, Template,
        TemplateFile, ToolSpec, Toolchain,
    };
    pub use crate::error::{SlamError, SlamResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
