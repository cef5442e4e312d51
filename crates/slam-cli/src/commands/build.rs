//! `slam build` (also what plain `slam` runs).

use tracing::{debug, instrument};

use slam_core::application::Phase;

use crate::{config::Settings, error::CliResult, output::OutputManager};

/// Format, install, test and package, stopping at the first failure.
#[instrument(skip_all)]
pub fn execute(settings: &Settings, output: &OutputManager) -> CliResult<()> {
    let service = super::build_service(settings);
    let progress = output.progress(!service.is_verbose());

    let result = service.build(&mut |phase| {
        // Test output is always streamed, so the spinner steps aside.
        progress.set_visible(phase != Phase::Test);
        if progress.is_active() && phase != Phase::Test {
            progress.set_message(phase.label());
        } else if let Err(e) = output.print(phase.label()) {
            debug!(error = %e, "failed to print phase label");
        }
    });
    progress.finish();

    super::report(output, "build", result.map_err(Into::into))
}
