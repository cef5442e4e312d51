//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world. Adapters
//! in `slam-adapters` implement them.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `CommandExecutor`: External process execution
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Template discovery and loading
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CommandExecutor, Filesystem, TemplateStore};

#[cfg(test)]
pub use output::{MockCommandExecutor, MockFilesystem};
