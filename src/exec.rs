//! Process runner: every external command goes through [`Executor`].
use std::io::Write as _;
use std::process::{Command, Output, Stdio};

use crate::error::CommandError;

/// Result of a command execution.
///
/// The runner never raises on a non-zero exit; callers inspect `success`
/// and the captured streams before deciding whether to escalate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, or `None` if the process was killed or never started.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

impl ExecResult {
    /// A successful result with the given standard output.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        }
    }

    /// A failed result with the given exit code and standard error.
    #[must_use]
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
            code: Some(code),
        }
    }

    /// The result recorded when the process could not be spawned at all.
    #[must_use]
    pub fn spawn_failure(program: &str, err: &std::io::Error) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("failed to execute {program}: {err}"),
            success: false,
            code: None,
        }
    }

    /// Standard output followed by standard error.
    #[must_use]
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Convert an unsuccessful result into a [`CommandError`].
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] carrying `command_line`, the exit code and
    /// both streams when `success` is false.
    pub fn into_checked(self, command_line: String) -> Result<Self, CommandError> {
        if self.success {
            Ok(self)
        } else {
            Err(self.into_error(command_line))
        }
    }

    /// Wrap this result in a [`CommandError`] regardless of `success`.
    ///
    /// Used where a manager-specific rule, not the exit status, decided the
    /// invocation failed.
    #[must_use]
    pub fn into_error(self, command_line: String) -> CommandError {
        CommandError {
            command: command_line,
            code: self.code,
            stdout: self.stdout,
            stderr: self.stderr,
        }
    }
}

/// Render a program and its arguments as a single command line for logs
/// and error messages.  Arguments containing whitespace are quoted.
#[must_use]
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(|part| {
            if part.is_empty() || part.contains(char::is_whitespace) {
                format!("'{part}'")
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Abstraction over process execution, injectable for tests.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run a program with arguments and capture its result.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> ExecResult;

    /// Run a program, feeding `input` to its standard input.
    fn run_with_input(&self, program: &str, args: &[&str], input: &str) -> ExecResult;

    /// Run a command string through the platform shell.
    fn run_shell(&self, command: &str) -> ExecResult;

    /// Check if a program is available on `PATH`.
    fn which(&self, program: &str) -> bool;

    /// Run a program and convert a non-zero exit into a [`CommandError`].
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] if the command fails or cannot be spawned.
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult, CommandError> {
        self.run_unchecked(program, args)
            .into_checked(command_line(program, args))
    }
}

/// Production [`Executor`] that spawns real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> ExecResult {
        Command::new(program).args(args).output().map_or_else(
            |e| ExecResult::spawn_failure(program, &e),
            ExecResult::from,
        )
    }

    fn run_with_input(&self, program: &str, args: &[&str], input: &str) -> ExecResult {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let mut child = match child {
            Ok(child) => child,
            Err(e) => return ExecResult::spawn_failure(program, &e),
        };
        // A child that exits early closes the pipe; its exit status is what counts
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes()).ok();
        }
        child.wait_with_output().map_or_else(
            |e| ExecResult::spawn_failure(program, &e),
            ExecResult::from,
        )
    }

    fn run_shell(&self, command: &str) -> ExecResult {
        #[cfg(windows)]
        {
            self.run_unchecked("cmd", &["/C", command])
        }
        #[cfg(not(windows))]
        {
            self.run_unchecked("sh", &["-c", command])
        }
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
