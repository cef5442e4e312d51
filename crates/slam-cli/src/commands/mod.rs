//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into calls on the core services and render
//! the results. No business logic lives here.

pub mod build;
pub mod completions;
pub mod config;
pub mod format;
pub mod init;
pub mod install;
pub mod list;
pub mod new;

use std::path::Path;

use slam_adapters::{
    BuiltinTemplateStore, DirectoryTemplateStore, LayeredTemplateStore, SystemExecutor,
};
use slam_core::application::BuildService;

use crate::{config::Settings, error::CliResult, output::OutputManager};

/// Build service running the configured toolchain in the project root.
pub(crate) fn build_service(settings: &Settings) -> BuildService {
    BuildService::new(Box::new(SystemExecutor::new()), settings.toolchain.clone())
        .verbose(settings.verbose)
        .in_dir(&settings.project_root)
}

/// User templates from `dir` (or the configured directory) first, then the
/// built-in ones.
pub(crate) fn template_store(settings: &Settings, dir: Option<&Path>) -> LayeredTemplateStore {
    let mut store = LayeredTemplateStore::new();
    if let Some(dir) = dir.or(settings.templates_dir.as_deref()) {
        store = store.with_layer(DirectoryTemplateStore::new(dir));
    }
    store.with_layer(BuiltinTemplateStore::new())
}

/// Print `slam <name>: SUCCESS` or `slam <name>: ERROR` for `result`.
pub(crate) fn report<T>(output: &OutputManager, name: &str, result: CliResult<T>) -> CliResult<T> {
    match &result {
        Ok(_) => output.success(&format!("slam {name}: SUCCESS"))?,
        Err(_) => output.error(&format!("slam {name}: ERROR"))?,
    }
    result
}
