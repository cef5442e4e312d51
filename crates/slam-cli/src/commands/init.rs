//! `slam init`: add tool defaults to an existing manifest.

use tracing::{info, instrument};

use slam_adapters::LocalFilesystem;
use slam_core::{application::ScaffoldService, domain::ManifestDefaults};

use crate::{cli::InitArgs, config::Settings, error::CliResult, output::OutputManager};

#[instrument(skip_all)]
pub fn execute(args: InitArgs, settings: &Settings, output: &OutputManager) -> CliResult<()> {
    let manifest = match args.manifest {
        Some(path) if path.is_relative() => settings.project_root.join(path),
        Some(path) => path,
        None => settings.layout.manifest_path(&settings.project_root),
    };
    info!(manifest = %manifest.display(), "applying defaults");

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()), settings.layout.clone());
    let result = service.init_existing(&manifest, &ManifestDefaults::standard());

    if result.is_ok() {
        output.info(&format!("Updated {} (backup kept as .bak)", manifest.display()))?;
    }
    super::report(output, "init", result.map_err(Into::into))
}
