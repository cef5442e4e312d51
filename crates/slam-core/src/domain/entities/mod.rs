pub mod invocation;
pub mod project;
pub mod template;
