//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, LogLevel};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "slam",
    bin_name = "slam",
    version  = slam_core::VERSION,
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Format, test and build Python projects, and scaffold new ones",
    long_about = "slam drives a Python project's toolchain (isort, autoflake, black, \
                  pytest and poetry) with one command, and scaffolds new projects \
                  from templates.\n\nRunning slam with no subcommand runs 'slam build'.",
    after_help = "EXAMPLES:\n\
        \x20 slam                       # format, install, test, build\n\
        \x20 slam test -- -k parser -x\n\
        \x20 slam new --name my-tool --yes\n\
        \x20 slam --poetry ~/.local/bin/poetry install",
)]
pub struct Cli {
    /// Flags given before the subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute; `build` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Split into global flags and the subcommand to run, defaulting to
    /// `build`.
    pub fn into_parts(self) -> (GlobalArgs, Commands) {
        (self.global, self.command.unwrap_or(Commands::Build))
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sort imports, remove unused imports and reformat the sources.
    #[command(
        visible_alias = "fmt",
        about = "Run isort, autoflake and black over src and test"
    )]
    Format,

    /// Install the project and its dependencies.
    #[command(about = "Install dependencies with the package manager")]
    Install,

    /// Run the test suite.
    #[command(
        about = "Run pytest, passing any extra arguments through",
        after_help = "EXAMPLES:\n\
            \x20 slam test\n\
            \x20 slam test -k parser -x\n\
            \x20 slam test test/test_cli.py"
    )]
    Test(TestArgs),

    /// Format, install, test and package, stopping at the first failure.
    #[command(about = "Format, install, test and package the project")]
    Build,

    /// Apply a template to the current project root.
    #[command(
        visible_alias = "n",
        about = "Scaffold a new project from a template",
        after_help = "EXAMPLES:\n\
            \x20 git init my-tool && slam -C my-tool new --yes\n\
            \x20 slam new --template flask --templates-dir ~/templates\n\
            \x20 slam new --var AUTHOR=me --dry-run"
    )]
    New(NewArgs),

    /// Append slam's tool defaults to an existing manifest.
    #[command(
        about = "Add tool defaults to an existing pyproject.toml",
        after_help = "EXAMPLES:\n\
            \x20 slam init\n\
            \x20 slam init --manifest services/api/pyproject.toml"
    )]
    Init(InitArgs),

    /// List available templates.
    #[command(visible_alias = "ls", about = "List available templates")]
    List(ListArgs),

    /// Show the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 slam config list\n\
            \x20 slam config get toolchain.package_manager\n\
            \x20 slam config path"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 slam completions bash > ~/.local/share/bash-completion/completions/slam\n\
            \x20 slam completions zsh  > ~/.zfunc/_slam\n\
            \x20 slam completions fish > ~/.config/fish/completions/slam.fish"
    )]
    Completions(CompletionsArgs),
}

impl Commands {
    /// Name used in `slam <name>: SUCCESS` status lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Install => "install",
            Self::Test(_) => "test",
            Self::Build => "build",
            Self::New(_) => "new",
            Self::Init(_) => "init",
            Self::List(_) => "list",
            Self::Config(_) => "config",
            Self::Completions(_) => "completions",
        }
    }
}

// ── test ──────────────────────────────────────────────────────────────────────

/// Arguments for `slam test`.
#[derive(Debug, Args)]
pub struct TestArgs {
    /// Extra arguments handed to the test runner unchanged.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "Arguments passed through to the test runner"
    )]
    pub args: Vec<String>,
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `slam new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Template to apply.
    #[arg(
        short = 't',
        long = "template",
        value_name = "NAME",
        help = "Template to apply [default: default]"
    )]
    pub template: Option<String>,

    /// Extra directory of templates, searched before the built-in ones.
    #[arg(long = "templates-dir", value_name = "DIR", help = "Directory of user templates")]
    pub templates_dir: Option<PathBuf>,

    /// Additional substitution values.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        help = "Extra placeholder value (repeatable)"
    )]
    pub vars: Vec<String>,

    /// Project name; defaults to the project root's directory name.
    #[arg(long = "name", value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation prompt")]
    pub yes: bool,

    /// Show what would be created without writing anything.
    #[arg(long = "dry-run", help = "Show what would be created without writing")]
    pub dry_run: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `slam init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Manifest to update; defaults to the project root's manifest.
    #[arg(long = "manifest", value_name = "PATH", help = "Manifest to update")]
    pub manifest: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `slam list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,

    /// Extra directory of templates.
    #[arg(long = "templates-dir", value_name = "DIR", help = "Directory of user templates")]
    pub templates_dir: Option<PathBuf>,
}

/// Output format for `slam list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable list.
    Table,
    /// JSON array of names.
    Json,
}

// ── config ────────────────────────────────────────────────────────────────────

/// `slam config` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML.
    List,
    /// Print one value by dotted key.
    Get {
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Print the configuration file in use.
    Path,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `slam completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, value_name = "SHELL")]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_build() {
        let (_, command) = Cli::try_parse_from(["slam"]).unwrap().into_parts();
        assert!(matches!(command, Commands::Build));
    }

    #[test]
    fn test_args_pass_hyphen_values_through() {
        let (_, command) = Cli::try_parse_from(["slam", "test", "-k", "parser", "-x"])
            .unwrap()
            .into_parts();
        match command {
            Commands::Test(args) => assert_eq!(args.args, vec!["-k", "parser", "-x"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_args_keep_flags_that_look_global() {
        let (global, command) = Cli::try_parse_from(["slam", "test", "-q", "-v", "-c", "x.ini"])
            .unwrap()
            .into_parts();
        assert!(!global.quiet);
        assert!(!global.verbose);
        assert!(global.config.is_none());
        match command {
            Commands::Test(args) => assert_eq!(args.args, vec!["-q", "-v", "-c", "x.ini"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_before_test_still_apply() {
        let (global, command) = Cli::try_parse_from(["slam", "-q", "test", "-q"])
            .unwrap()
            .into_parts();
        assert!(global.quiet);
        match command {
            Commands::Test(args) => assert_eq!(args.args, vec!["-q"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand_are_rejected() {
        assert!(Cli::try_parse_from(["slam", "install", "--quiet"]).is_err());
    }

    #[test]
    fn poetry_is_an_alias_for_package_manager() {
        let cli = Cli::try_parse_from(["slam", "--poetry", "/opt/poetry", "install"]).unwrap();
        assert_eq!(cli.global.package_manager.as_deref(), Some("/opt/poetry"));
    }

    #[test]
    fn new_collects_repeated_vars() {
        let (_, command) = Cli::try_parse_from([
            "slam", "new", "--var", "A=1", "--var", "B=2", "--yes",
        ])
        .unwrap()
        .into_parts();
        match command {
            Commands::New(args) => {
                assert_eq!(args.vars, vec!["A=1", "B=2"]);
                assert!(args.yes);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn log_level_parses() {
        let cli = Cli::try_parse_from(["slam", "--log-level", "debug", "format"]).unwrap();
        assert_eq!(cli.global.log_level, Some(LogLevel::Debug));
    }
}
