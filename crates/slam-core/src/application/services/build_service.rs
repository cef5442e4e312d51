//! Build Service - sequences the external tools.
//!
//! Composite operations (`auto_format`, `build`) fail fast: the first step
//! that exits nonzero stops the sequence and is returned as a
//! [`CommandFailure`]. A composite succeeds iff every step exited zero.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, error, info, instrument};

use crate::{
    application::{CommandFailure, ports::CommandExecutor},
    domain::{ExecutionResult, Invocation, Toolchain},
    error::{SlamError, SlamResult},
};

/// A step of `build`, announced before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Format,
    Install,
    Test,
    Package,
}

impl Phase {
    /// Every phase in execution order.
    pub const ALL: [Phase; 4] = [Phase::Format, Phase::Install, Phase::Test, Phase::Package];

    /// Human-readable label printed before the phase starts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Format => "Formatting...",
            Self::Install => "Installing...",
            Self::Test => "Testing...",
            Self::Package => "Building...",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format => write!(f, "format"),
            Self::Install => write!(f, "install"),
            Self::Test => write!(f, "test"),
            Self::Package => write!(f, "package"),
        }
    }
}

/// Thin wrapper around the package manager and the dev tools.
pub struct BuildService {
    executor: Box<dyn CommandExecutor>,
    toolchain: Toolchain,
    verbose: bool,
    working_dir: Option<PathBuf>,
}

impl BuildService {
    pub fn new(executor: Box<dyn CommandExecutor>, toolchain: Toolchain) -> Self {
        Self {
            executor,
            toolchain,
            verbose: false,
            working_dir: None,
        }
    }

    /// Stream tool output instead of capturing it.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run every tool from `dir` (the project root).
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Run an arbitrary command line, failing on a nonzero exit.
    pub fn execute<I, S>(&self, tokens: I, verbose: bool) -> SlamResult<ExecutionResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invocation = Invocation::new(tokens)?.streamed(verbose);
        self.run_checked(invocation)
    }

    /// Sorter, dead-import remover, then formatter.
    #[instrument(skip_all)]
    pub fn auto_format(&self) -> SlamResult<()> {
        for invocation in self.toolchain.format_steps()? {
            self.run_checked(invocation.streamed(self.verbose))?;
        }
        Ok(())
    }

    /// `<package-manager> install`.
    #[instrument(skip_all)]
    pub fn install(&self) -> SlamResult<()> {
        let invocation = self.toolchain.install()?.streamed(self.verbose);
        self.run_checked(invocation).map(|_| ())
    }

    /// Run the test runner with `extra_args`.
    ///
    /// Output is always streamed. The raw result comes back even when tests
    /// fail so the caller can propagate the runner's exit code.
    #[instrument(skip_all, fields(args = extra_args.len()))]
    pub fn test<S: AsRef<str>>(&self, extra_args: &[S]) -> SlamResult<ExecutionResult> {
        let invocation = self.test_invocation(extra_args)?;
        self.run(&invocation)
    }

    /// `<package-manager> build`.
    #[instrument(skip_all)]
    pub fn package(&self) -> SlamResult<()> {
        let invocation = self.toolchain.package()?.streamed(self.verbose);
        self.run_checked(invocation).map(|_| ())
    }

    /// Format, install, test and package, in that order.
    ///
    /// `on_phase` is called with each [`Phase`] right before it starts.
    #[instrument(skip_all)]
    pub fn build(&self, on_phase: &mut dyn FnMut(Phase)) -> SlamResult<()> {
        for phase in Phase::ALL {
            on_phase(phase);
            info!(%phase, "starting phase");
            match phase {
                Phase::Format => self.auto_format()?,
                Phase::Install => self.install()?,
                Phase::Test => {
                    let invocation = self.test_invocation::<&str>(&[])?;
                    let result = self.run(&invocation)?;
                    if !result.is_success() {
                        let failure = CommandFailure::new(&invocation, &result);
                        error!(%failure, "tests failed");
                        return Err(failure.into());
                    }
                }
                Phase::Package => self.package()?,
            }
        }
        info!("build completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn test_invocation<S: AsRef<str>>(&self, extra_args: &[S]) -> SlamResult<Invocation> {
        let invocation = self.toolchain.test(extra_args)?.streamed(true);
        Ok(self.locate(invocation))
    }

    fn locate(&self, invocation: Invocation) -> Invocation {
        match &self.working_dir {
            Some(dir) => invocation.in_dir(dir),
            None => invocation,
        }
    }

    /// Run and report the raw result; only a failure to spawn is an error.
    fn run(&self, invocation: &Invocation) -> SlamResult<ExecutionResult> {
        info!(command = %invocation, streamed = invocation.is_streamed(), "running");
        let result = self.executor.run(invocation)?;
        debug!(returncode = result.returncode, "finished");
        Ok(result)
    }

    /// Run, then turn a nonzero exit into a [`CommandFailure`].
    fn run_checked(&self, invocation: Invocation) -> SlamResult<ExecutionResult> {
        let invocation = self.locate(invocation);
        let result = self.run(&invocation)?;

        if !invocation.is_streamed() {
            if !result.stdout.is_empty() {
                info!(command = %invocation, stdout = %result.stdout_lossy().trim_end(), "captured stdout");
            }
            if !result.stderr.is_empty() {
                if result.is_success() {
                    info!(command = %invocation, stderr = %result.stderr_lossy().trim_end(), "captured stderr");
                } else {
                    error!(command = %invocation, stderr = %result.stderr_lossy().trim_end(), "captured stderr");
                }
            }
        }

        if result.is_success() {
            Ok(result)
        } else {
            Err(SlamError::Command(CommandFailure::new(&invocation, &result)))
        }
    }
}
