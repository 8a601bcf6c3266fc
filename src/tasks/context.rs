use std::path::PathBuf;
use std::sync::Arc;

use crate::error::CommandError;
use crate::exec::{ExecResult, Executor, command_line};
use crate::logging::Log;
use crate::managers::PackageManager;
use crate::platform::Platform;
use crate::privilege::Privilege;
use crate::resources::hook::HookEnv;

/// Shared context for one install run.
///
/// Built once after detection; every step reads the platform, manager and
/// elevation strategy from here instead of probing again.
pub struct Context {
    /// Detected platform information.
    pub platform: Platform,
    /// Package manager selected for this host.
    pub manager: PackageManager,
    /// How mutating commands are elevated.
    pub privilege: Privilege,
    /// Logger for progress output.
    pub log: Arc<dyn Log>,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// Values substituted into hook commands.
    pub hook_env: HookEnv,
    /// Scratch directory for downloaded key files.
    pub work_dir: PathBuf,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("platform", &self.platform)
            .field("manager", &self.manager)
            .field("privilege", &self.privilege)
            .field("log", &"<dyn Log>")
            .field("executor", &"<dyn Executor>")
            .field("hook_env", &self.hook_env)
            .field("work_dir", &self.work_dir)
            .finish()
    }
}

impl Context {
    /// Creates a new context, reading hook values from the environment.
    #[must_use]
    pub fn new(
        platform: Platform,
        manager: PackageManager,
        privilege: Privilege,
        log: Arc<dyn Log>,
        executor: Arc<dyn Executor>,
    ) -> Self {
        Self {
            platform,
            manager,
            privilege,
            log,
            executor,
            hook_env: HookEnv::from_env(),
            work_dir: std::env::temp_dir(),
        }
    }

    /// Run a command and capture its result without judging it.
    #[must_use]
    pub fn run_unchecked(&self, program: &str, args: &[&str]) -> ExecResult {
        self.log.debug(&format!("$ {}", command_line(program, args)));
        self.executor.run_unchecked(program, args)
    }

    /// Run a command, failing on a non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] if the command fails or cannot be spawned.
    pub fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult, CommandError> {
        self.run_unchecked(program, args)
            .into_checked(command_line(program, args))
    }

    /// Run a command through the privilege strategy.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] if the command fails or cannot be spawned.
    pub fn run_elevated(&self, program: &str, args: &[&str]) -> Result<ExecResult, CommandError> {
        let (program, args) = self.privilege.wrap(program, args);
        self.run(program, &args)
    }

    /// Run an elevated command with `input` on its standard input.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] if the command fails or cannot be spawned.
    pub fn run_elevated_with_input(
        &self,
        program: &str,
        args: &[&str],
        input: &str,
    ) -> Result<ExecResult, CommandError> {
        let (program, args) = self.privilege.wrap(program, args);
        let line = command_line(program, &args);
        self.log.debug(&format!("$ {line}"));
        self.executor
            .run_with_input(program, &args, input)
            .into_checked(line)
    }

    /// Run a command string through the platform shell.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] carrying `command` if it fails.
    pub fn run_shell(&self, command: &str) -> Result<ExecResult, CommandError> {
        self.log.debug(&format!("$ {command}"));
        self.executor
            .run_shell(command)
            .into_checked(command.to_string())
    }
}
