//! Native package installation through the detected manager.
use crate::error::CommandError;
use crate::exec::command_line;
use crate::tasks::Context;

/// What an install invocation did for one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageState {
    /// The manager reported the package as already present.
    AlreadyInstalled,
    /// The package was installed by this run.
    NewlyInstalled,
}

/// Packages touched by a native install, split by outcome.
///
/// Classification is best-effort: it relies on manager output phrases that
/// can change between releases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Packages installed by this run.
    pub newly_installed: Vec<String>,
    /// Packages that were already present.
    pub already_installed: Vec<String>,
}

impl InstallReport {
    fn record(&mut self, package: &str, state: PackageState) {
        match state {
            PackageState::AlreadyInstalled => self.already_installed.push(package.to_string()),
            PackageState::NewlyInstalled => self.newly_installed.push(package.to_string()),
        }
    }

    /// Whether nothing new was installed.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.newly_installed.is_empty()
    }
}

/// Install `packages` with the context's package manager.
///
/// The backend decides how packages are batched, whether the call is
/// elevated and what counts as success.  Each package in a successful batch
/// is then classified from the combined output.
///
/// # Errors
///
/// Returns the [`CommandError`] of the first batch the backend judged
/// unsuccessful.  Later batches are not attempted.
pub fn install_packages(ctx: &Context, packages: &[String]) -> Result<InstallReport, CommandError> {
    let backend = ctx.manager.backend();
    let mut report = InstallReport::default();

    for batch in backend.batches(packages) {
        let (program, args) = backend.install_command(&batch);
        let (program, args) = if backend.elevated() {
            ctx.privilege.wrap(program, &args)
        } else {
            (program, args)
        };

        let result = ctx.run_unchecked(program, &args);
        if !backend.succeeded(&result) {
            return Err(result.into_error(command_line(program, &args)));
        }

        let output = result.combined_output();
        for package in batch {
            let state = backend.classify(ctx, package, &output);
            match state {
                PackageState::AlreadyInstalled => {
                    ctx.log.debug(&format!("{package} already installed"));
                }
                PackageState::NewlyInstalled => {
                    ctx.log.info(&format!("installed {package}"));
                }
            }
            report.record(package, state);
        }
    }

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exec::ExecResult;
    use crate::managers::PackageManager;
    use crate::resources::test_helpers::ScriptedExecutor;
    use crate::tasks::test_helpers::context_for;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn apt_installs_in_one_elevated_call() {
        let executor = ScriptedExecutor::new().respond(
            "apt install",
            ExecResult::ok("git is already the newest version (1:2.43.0-1).\n"),
        );
        let (ctx, _log) = context_for(PackageManager::Apt, executor.clone());

        let report = install_packages(&ctx, &names(&["git", "curl"])).unwrap();
        assert_eq!(executor.calls(), vec!["sudo apt install -y git curl"]);
        assert_eq!(report.already_installed, vec!["git"]);
        assert_eq!(report.newly_installed, vec!["curl"]);
        assert!(!report.is_noop());
    }

    #[test]
    fn failed_batch_carries_full_command_line() {
        let executor = ScriptedExecutor::new()
            .respond("apt install", ExecResult::failed(100, "E: Unable to locate package tool"));
        let (ctx, _log) = context_for(PackageManager::Apt, executor);

        let err = install_packages(&ctx, &names(&["tool"])).unwrap_err();
        assert_eq!(err.command, "sudo apt install -y tool");
        assert_eq!(err.code, Some(100));
        assert!(err.stderr.contains("Unable to locate"));
    }

    #[test]
    fn winget_installs_each_id_without_elevation() {
        let executor = ScriptedExecutor::new();
        let (ctx, _log) = context_for(PackageManager::Winget, executor.clone());

        install_packages(&ctx, &names(&["Git.Git", "Microsoft.PowerShell"])).unwrap();
        let calls = executor.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("winget install --id Git.Git --exact"));
        assert!(calls[1].starts_with("winget install --id Microsoft.PowerShell --exact"));
    }

    #[test]
    fn winget_stops_at_first_failed_id() {
        let executor = ScriptedExecutor::new()
            .respond("Bad.Id", ExecResult::failed(1, "No package found"));
        let (ctx, _log) = context_for(PackageManager::Winget, executor.clone());

        assert!(install_packages(&ctx, &names(&["Bad.Id", "Git.Git"])).is_err());
        assert_eq!(executor.call_count(), 1);
    }

    #[test]
    fn homebrew_reinstall_is_a_noop() {
        let executor = ScriptedExecutor::new().respond(
            "brew install",
            ExecResult::ok("Warning: wget 1.21 is already installed and up-to-date.\n"),
        );
        let (ctx, _log) = context_for(PackageManager::Homebrew, executor.clone());

        let report = install_packages(&ctx, &names(&["wget"])).unwrap();
        assert!(report.is_noop());
        assert_eq!(executor.calls(), vec!["brew install wget"]);
    }
}
