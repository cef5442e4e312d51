//! Global arguments that apply to every subcommand.
//!
//! Declared here and flattened into [`super::Cli`]. They are accepted only
//! before the subcommand, so `slam test -q -v` hands both flags to the test
//! runner.

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Stream tool output instead of capturing it.
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Stream tool output to the terminal",
        long_help = "Stream the output of isort, black, pytest, poetry etc. straight \
                     to the terminal. Without it, output is captured and only shown \
                     when a step fails."
    )]
    pub verbose: bool,

    /// Logging filter for slam's own diagnostics.
    #[arg(
        long = "log-level",
        value_enum,
        value_name = "LEVEL",
        help = "Diagnostic log level [default: warn]"
    )]
    pub log_level: Option<LogLevel>,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Package manager executable.
    #[arg(
        long = "package-manager",
        visible_alias = "poetry",
        value_name = "PATH",
        help = "Package manager executable [default: poetry]"
    )]
    pub package_manager: Option<String>,

    /// Directory to treat as the project root.
    #[arg(
        short = 'C',
        long = "project-root",
        value_name = "DIR",
        help = "Run as if started in DIR"
    )]
    pub project_root: Option<PathBuf>,
}

/// Verbosity of slam's own tracing output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
