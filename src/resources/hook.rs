//! Pre- and post-install hook commands.
use crate::error::{HookStage, InstallError};
use crate::tasks::Context;

/// Values substituted into hook commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookEnv {
    /// Replaces `$USER`.
    pub user: String,
    /// Replaces `$HOME`.
    pub home: String,
}

impl HookEnv {
    /// Read the invoking user's name and home directory from the environment.
    ///
    /// `USER`/`HOME` are preferred, falling back to the Windows spellings
    /// `USERNAME`/`USERPROFILE`.  Missing values substitute as empty.
    #[must_use]
    pub fn from_env() -> Self {
        let var = |primary: &str, fallback: &str| {
            std::env::var(primary)
                .or_else(|_| std::env::var(fallback))
                .unwrap_or_default()
        };
        Self {
            user: var("USER", "USERNAME"),
            home: var("HOME", "USERPROFILE"),
        }
    }

    /// Replace every literal `$HOME` and `$USER` in `command`.
    ///
    /// Substitution is textual: no other variables, no braces, no escaping.
    #[must_use]
    pub fn substitute(&self, command: &str) -> String {
        command
            .replace("$HOME", &self.home)
            .replace("$USER", &self.user)
    }
}

/// Run `commands` in order through the platform shell, stopping at the
/// first failure.
///
/// # Errors
///
/// Returns [`InstallError::Hook`] carrying the substituted command line when
/// a command exits unsuccessfully.
pub fn run_hooks(ctx: &Context, stage: HookStage, commands: &[String]) -> Result<(), InstallError> {
    for command in commands {
        let command = ctx.hook_env.substitute(command);
        ctx.log.info(&format!("{stage}: {command}"));
        ctx.run_shell(&command)
            .map_err(|cause| InstallError::Hook { stage, cause })?;
    }
    Ok(())
}
