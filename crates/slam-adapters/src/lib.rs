//! Infrastructure adapters for slam.
//!
//! This crate implements the ports defined in `slam-core::application::ports`.
//! It contains all process spawning and filesystem access.

pub mod filesystem;
pub mod process;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::SystemExecutor;
pub use template_store::{BuiltinTemplateStore, DirectoryTemplateStore, LayeredTemplateStore};
