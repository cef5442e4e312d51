//! Implementation of the `slam list` command.

use slam_core::application::ports::TemplateStore;

use crate::{
    cli::{ListArgs, ListFormat},
    config::Settings,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, settings: &Settings, output: &OutputManager) -> CliResult<()> {
    let store = super::template_store(settings, args.templates_dir.as_deref());
    let names = store.list()?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            for name in &names {
                let marker = if *name == settings.default_template {
                    " (default)"
                } else {
                    ""
                };
                output.print(&format!("  {name}{marker}"))?;
            }
        }
        ListFormat::Json => {
            // Bypasses quiet mode: JSON output must stay parseable in pipes.
            let json = serde_json::to_string_pretty(&names).map_err(|e| CliError::InvalidInput {
                message: format!("failed to encode template list: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.data(&json)?;
        }
    }

    Ok(())
}
