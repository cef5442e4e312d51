//! # slam CLI
//!
//! One command for a Python project's format, install, test and build
//! steps, plus project scaffolding.
//!
//! ## Startup sequence
//!
//! 1. Load `.env`, then parse CLI arguments (clap handles `--help` /
//!    `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Resolve the project root and load configuration (file + env +
//!    defaults), then fold CLI flags in to get [`Settings`].
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! |  0   | Success                                   |
//! |  N   | A tool failed with code N (`slam test` too)|
//! |  1   | Internal / system error                   |
//! |  2   | User error or unmet precondition          |
//! |  3   | Resource not found                        |
//! |  4   | Configuration error                       |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::{AppConfig, Settings},
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, with a success exit code.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };
    let (global, command) = cli.into_parts();

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        version = slam_core::VERSION,
        command = command.name(),
        verbose = global.verbose,
        quiet = global.quiet,
        "CLI started"
    );

    // ── 3. Project root and configuration ─────────────────────────────────
    let project_root = match global.project_root.clone() {
        Some(root) => root,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => return handle_error(e.into(), global.verbose, !global.no_color),
        },
    };

    let config_file = AppConfig::locate(global.config.as_deref(), &project_root);
    let config = match AppConfig::load(config_file.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return handle_error(err, global.verbose, !global.no_color);
        }
    };

    // ── 4. Build output manager and settings ──────────────────────────────
    let output = OutputManager::new(&global, &config);
    let settings = Settings::resolve(&global, config, project_root, config_file);
    debug!(
        root = %settings.project_root.display(),
        log_level = %settings.log_level,
        config = ?settings.config_file,
        "settings resolved"
    );

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(command, &settings, &output) {
        Ok(code) => {
            info!("slam finished");
            code
        }
        Err(e) => handle_error(e, settings.verbose, output.supports_color()),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all, fields(command = command.name()))]
fn run(command: Commands, settings: &Settings, output: &OutputManager) -> CliResult<ExitCode> {
    match command {
        Commands::Format => commands::format::execute(settings, output)?,
        Commands::Install => commands::install::execute(settings, output)?,
        Commands::Test(args) => return commands::test::execute(args, settings, output),
        Commands::Build => commands::build::execute(settings, output)?,
        Commands::New(args) => commands::new::execute(args, settings, output)?,
        Commands::Init(args) => commands::init::execute(args, settings, output)?,
        Commands::List(args) => commands::list::execute(args, settings, output)?,
        Commands::Config(cmd) => commands::config::execute(cmd, settings, output)?,
        Commands::Completions(args) => commands::completions::execute(args)?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();

    let msg = if color && std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn every_command_has_a_name() {
        let (_, command) = Cli::try_parse_from(["slam", "list"]).unwrap().into_parts();
        assert_eq!(command.name(), "list");
    }
}
