//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `slam-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{ExecutionResult, Invocation, Template};
use crate::error::SlamResult;

/// Port for running external commands.
///
/// Implemented by:
/// - `slam_adapters::process::SystemExecutor` (production)
///
/// Implementations report the child's real exit status in
/// [`ExecutionResult::returncode`] and never turn a nonzero status into an
/// error themselves; only failing to start the process is an `Err`.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor: Send + Sync {
    /// Run `invocation` to completion.
    ///
    /// Streamed invocations inherit stdout/stderr and return empty buffers.
    fn run(&self, invocation: &Invocation) -> SlamResult<ExecutionResult>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `slam_adapters::filesystem::LocalFilesystem` (production)
/// - `slam_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SlamResult<()>;

    /// Write content to a file, creating or truncating it.
    fn write_file(&self, path: &Path, content: &str) -> SlamResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> SlamResult<String>;

    /// Copy a file, replacing `to` if it exists.
    fn copy(&self, from: &Path, to: &Path) -> SlamResult<()>;

    /// Atomically move `from` over `to`.
    fn rename(&self, from: &Path, to: &Path) -> SlamResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> SlamResult<()>;
}

/// Port for template discovery.
///
/// Implemented by:
/// - `slam_adapters::template_store::BuiltinTemplateStore` (ships with slam)
/// - `slam_adapters::template_store::DirectoryTemplateStore` (user templates)
pub trait TemplateStore: Send + Sync {
    /// Names of every available template, sorted.
    fn list(&self) -> SlamResult<Vec<String>>;

    /// Load one template by name.
    fn get(&self, name: &str) -> SlamResult<Template>;
}
