//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `slam-core` and
//! `slam-adapters` only *emit* spans and events.
//!
//! # Level selection
//!
//! | Flag(s)             | Filter level |
//! |---------------------|--------------|
//! | (none)              | WARN         |
//! | `--log-level LEVEL` | LEVEL        |
//! | `--quiet`           | ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set. `--verbose` does not touch
//! the log level; it streams tool output instead.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, LogLevel};

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = derive_level(args);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "slam={level},slam_core={level},slam_adapters={level}"
        ))
    });

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Translate `--log-level` and `--quiet` to a level.
fn derive_level(args: &GlobalArgs) -> LogLevel {
    if args.quiet {
        return LogLevel::Error;
    }
    args.log_level.unwrap_or_default()
}
