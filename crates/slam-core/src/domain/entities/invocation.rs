//! Invocations of external tools and their results.
//!
//! ```text
//! Toolchain ──builds──▶ Invocation ──CommandExecutor──▶ ExecutionResult
//! ```
//!
//! Nothing in here spawns a process; that is the job of the
//! `CommandExecutor` port.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

// ============================================================================
// Invocation
// ============================================================================

/// One external command execution: the program and its argument vector.
///
/// Created per call and discarded after execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    tokens: Vec<String>,
    streamed: bool,
    current_dir: Option<PathBuf>,
}

impl Invocation {
    /// Build an invocation from its token list.
    ///
    /// # Errors
    ///
    /// [`DomainError::EmptyInvocation`] when `tokens` is empty.
    pub fn new<I, S>(tokens: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(DomainError::EmptyInvocation);
        }
        Ok(Self {
            tokens,
            streamed: false,
            current_dir: None,
        })
    }

    /// Stream the child's output to our stdout/stderr instead of capturing it.
    pub fn streamed(mut self, streamed: bool) -> Self {
        self.streamed = streamed;
        self
    }

    /// Run the child in `dir`.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Append pass-through arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_streamed(&self) -> bool {
        self.streamed
    }

    pub fn current_dir(&self) -> Option<&PathBuf> {
        self.current_dir.as_ref()
    }

    /// The command line as a single space-joined string, for logs and errors.
    pub fn command_line(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

// ============================================================================
// ExecutionResult
// ============================================================================

/// Outcome of a finished invocation.
///
/// `stdout`/`stderr` are empty when the invocation was streamed. A child
/// killed by a signal has no exit code and reports [`Self::SIGNALLED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub returncode: i32,
}

impl ExecutionResult {
    pub const SIGNALLED: i32 = -1;

    pub fn new(stdout: Vec<u8>, stderr: Vec<u8>, returncode: i32) -> Self {
        Self {
            stdout,
            stderr,
            returncode,
        }
    }

    /// A zero-exit result with no captured output.
    pub fn success() -> Self {
        Self::new(Vec::new(), Vec::new(), 0)
    }

    pub fn is_success(&self) -> bool {
        self.returncode == 0
    }

    /// Exit code to hand back to the OS.
    pub fn exit_code(&self) -> u8 {
        Self::clamp_exit_code(self.returncode)
    }

    /// `code` when it fits in `1..=255`, otherwise 1. Never 0, so a failure
    /// cannot be reported as success.
    pub fn clamp_exit_code(code: i32) -> u8 {
        u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

// ============================================================================
// Toolchain
// ============================================================================

/// A delegated tool: the executable and its fixed argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Every external executable slam delegates to.
///
/// Formatting and test tools run inside the package manager's environment
/// (`poetry run isort ...`) unless `run_through_package_manager` is off, in
/// which case they are executed directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolchain {
    pub package_manager: String,
    pub run_through_package_manager: bool,
    pub sorter: ToolSpec,
    pub import_remover: ToolSpec,
    pub formatter: ToolSpec,
    pub test_runner: ToolSpec,
    pub install_args: Vec<String>,
    pub package_args: Vec<String>,
}

impl Default for Toolchain {
    fn default() -> Self {
        let sources = ["src", "test"];
        Self {
            package_manager: "poetry".into(),
            run_through_package_manager: true,
            sorter: ToolSpec::new("isort", sources),
            import_remover: ToolSpec::new(
                "autoflake",
                ["--in-place", "--recursive", "--remove-all-unused-imports"]
                    .into_iter()
                    .chain(sources),
            ),
            formatter: ToolSpec::new("black", sources),
            test_runner: ToolSpec::new("pytest", Vec::<String>::new()),
            install_args: vec!["install".into()],
            package_args: vec!["build".into()],
        }
    }
}

impl Toolchain {
    /// Replace the package manager executable, keeping everything else.
    pub fn with_package_manager(mut self, path: impl Into<String>) -> Self {
        self.package_manager = path.into();
        self
    }

    /// Invocation for a delegated tool.
    pub fn tool(&self, spec: &ToolSpec) -> Result<Invocation, DomainError> {
        let mut tokens = Vec::with_capacity(spec.args.len() + 3);
        if self.run_through_package_manager {
            tokens.push(self.package_manager.clone());
            tokens.push("run".to_string());
        }
        tokens.push(spec.program.clone());
        tokens.extend(spec.args.iter().cloned());
        Invocation::new(tokens)
    }

    /// Invocation of the package manager itself.
    pub fn package_manager_command<I, S>(&self, args: I) -> Result<Invocation, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(std::iter::once(self.package_manager.clone()))
            .map(|inv| inv.with_args(args))
    }

    /// The three formatting invocations, in execution order.
    pub fn format_steps(&self) -> Result<[Invocation; 3], DomainError> {
        Ok([
            self.tool(&self.sorter)?,
            self.tool(&self.import_remover)?,
            self.tool(&self.formatter)?,
        ])
    }

    pub fn install(&self) -> Result<Invocation, DomainError> {
        self.package_manager_command(self.install_args.iter().cloned())
    }

    pub fn package(&self) -> Result<Invocation, DomainError> {
        self.package_manager_command(self.package_args.iter().cloned())
    }

    pub fn test<S: AsRef<str>>(&self, extra_args: &[S]) -> Result<Invocation, DomainError> {
        Ok(self
            .tool(&self.test_runner)?
            .with_args(extra_args.iter().map(|a| a.as_ref().to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_invocation_rejected() {
        let err = Invocation::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, DomainError::EmptyInvocation);
    }

    #[test]
    fn invocation_splits_program_and_args() {
        let inv = Invocation::new(["poetry", "install"]).unwrap();
        assert_eq!(inv.program(), "poetry");
        assert_eq!(inv.args(), ["install".to_string()]);
        assert_eq!(inv.command_line(), "poetry install");
        assert!(!inv.is_streamed());
    }

    #[test]
    fn tools_run_through_package_manager_by_default() {
        let tc = Toolchain::default();
        let inv = tc.tool(&tc.sorter).unwrap();
        assert_eq!(inv.command_line(), "poetry run isort src test");
    }

    #[test]
    fn tools_run_directly_when_disabled() {
        let tc = Toolchain {
            run_through_package_manager: false,
            ..Toolchain::default()
        };
        let inv = tc.tool(&tc.formatter).unwrap();
        assert_eq!(inv.command_line(), "black src test");
    }

    #[test]
    fn custom_package_manager_path_is_used() {
        let tc = Toolchain::default().with_package_manager("/opt/poetry/bin/poetry");
        assert_eq!(
            tc.install().unwrap().command_line(),
            "/opt/poetry/bin/poetry install"
        );
        assert_eq!(
            tc.package().unwrap().command_line(),
            "/opt/poetry/bin/poetry build"
        );
    }

    #[test]
    fn format_steps_are_sorter_remover_formatter() {
        let tc = Toolchain::default();
        let programs: Vec<String> = tc
            .format_steps()
            .unwrap()
            .iter()
            .map(|inv| inv.tokens()[2].clone())
            .collect();
        assert_eq!(programs, ["isort", "autoflake", "black"]);
    }

    #[test]
    fn test_passes_extra_args_through() {
        let tc = Toolchain::default();
        let inv = tc.test(&["-k", "slow", "--maxfail=1"]).unwrap();
        assert_eq!(inv.command_line(), "poetry run pytest -k slow --maxfail=1");
    }

    #[test]
    fn exit_code_is_clamped_to_a_failure_code() {
        assert_eq!(ExecutionResult::new(Vec::new(), Vec::new(), 5).exit_code(), 5);
        assert_eq!(ExecutionResult::clamp_exit_code(255), 255);
        assert_eq!(ExecutionResult::clamp_exit_code(ExecutionResult::SIGNALLED), 1);
        assert_eq!(ExecutionResult::clamp_exit_code(256), 1);
        assert_eq!(ExecutionResult::clamp_exit_code(0), 1);
    }

    #[test]
    fn execution_result_lossy_output() {
        let res = ExecutionResult::new(b"out".to_vec(), b"err".to_vec(), 3);
        assert_eq!(res.stdout_lossy(), "out");
        assert_eq!(res.stderr_lossy(), "err");
        assert!(!res.is_success());
    }
}
