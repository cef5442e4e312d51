//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "build the project" or "apply a template".

pub mod build_service;
pub mod scaffold_service;

pub use build_service::{BuildService, Phase};
pub use scaffold_service::ScaffoldService;
