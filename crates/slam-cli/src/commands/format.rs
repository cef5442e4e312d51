//! `slam format`: sort imports, drop unused ones, reformat.

use tracing::instrument;

use crate::{config::Settings, error::CliResult, output::OutputManager};

#[instrument(skip_all)]
pub fn execute(settings: &Settings, output: &OutputManager) -> CliResult<()> {
    let service = super::build_service(settings);

    let progress = output.progress(!service.is_verbose());
    progress.set_message("Formatting...");
    let result = service.auto_format();
    progress.finish();

    super::report(output, "format", result.map_err(Into::into))
}
