//! `install`: run every selected application through the pipeline.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::{GlobalOpts, InstallOpts};
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Log;
use crate::managers::PackageManager;
use crate::platform::Platform;
use crate::privilege::Privilege;
use crate::prompt::{DialoguerPrompt, Prompt};
use crate::tasks::{self, Context, RunReport, reboot};

/// Run the install command against the real host.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or no package manager
/// is detected.  Individual application failures are reported in the
/// summary and do not fail the command.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: Arc<dyn Log>) -> Result<()> {
    let executor: Arc<dyn Executor> = Arc::new(SystemExecutor);
    execute(
        global,
        opts,
        log,
        executor,
        Platform::detect(),
        &DialoguerPrompt,
    )
    .map(|_| ())
}

/// Install the selected applications using the given collaborators.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or no package manager
/// is detected.
pub fn execute(
    global: &GlobalOpts,
    opts: &InstallOpts,
    log: Arc<dyn Log>,
    executor: Arc<dyn Executor>,
    platform: Platform,
    prompt: &dyn Prompt,
) -> Result<RunReport> {
    log.info(&format!("bootstrap {}", super::version()));

    let catalog = super::load_catalog(global, log.as_ref())?;

    log.stage("Detecting package manager");
    let manager = PackageManager::detect(&platform, executor.as_ref())?;
    let privilege = if opts.no_sudo {
        Privilege::Direct
    } else {
        Privilege::detect(&platform, executor.as_ref())
    };
    log.info(&format!("platform: {platform}"));
    log.info(&format!("package manager: {manager}"));
    log.debug(&format!("privilege: {privilege:?}"));

    let apps = catalog.select(&opts.only, &opts.skip);
    if apps.is_empty() {
        log.warn("no applications selected");
    }

    let ctx = Context::new(platform, manager, privilege, log, executor);
    let report = tasks::run_catalog(&ctx, &apps);
    report.print(ctx.log.as_ref());

    if report.reboot_required {
        if opts.no_reboot {
            reboot::remind(&ctx);
        } else {
            let decision = reboot::offer_reboot(&ctx, prompt);
            ctx.log.debug(&format!("reboot: {decision:?}"));
        }
    }

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::BufferedLog;
    use crate::platform::{Arch, Os};
    use crate::prompt::MockPrompt;
    use crate::resources::test_helpers::ScriptedExecutor;

    fn root_with(catalog: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("conf")).unwrap();
        std::fs::write(dir.path().join("conf/apps.json"), catalog).unwrap();
        dir
    }

    fn global(dir: &tempfile::TempDir) -> GlobalOpts {
        GlobalOpts {
            root: Some(dir.path().to_path_buf()),
            catalog: None,
        }
    }

    fn linux() -> Platform {
        Platform::new(Os::Linux, Arch::X86_64)
    }

    #[test]
    fn detection_failure_is_fatal() {
        let dir = root_with(r#"[{"name": "Tool", "apt": ["tool"]}]"#);
        let executor = ScriptedExecutor::new();
        let err = execute(
            &global(&dir),
            &InstallOpts::default(),
            Arc::new(BufferedLog::new()),
            Arc::new(executor.clone()),
            linux(),
            &MockPrompt::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no supported package manager"));
        assert_eq!(executor.call_count(), 0);
    }

    #[test]
    fn app_failures_do_not_fail_the_command() {
        let dir = root_with(r#"[{"name": "Tool", "apt": ["tool"]}]"#);
        let executor = ScriptedExecutor::new()
            .with_which(&["apt", "sudo"])
            .respond("apt install", crate::exec::ExecResult::failed(100, "E: no"));
        let report = execute(
            &global(&dir),
            &InstallOpts::default(),
            Arc::new(BufferedLog::new()),
            Arc::new(executor),
            linux(),
            &MockPrompt::new(),
        )
        .unwrap();
        assert!(report.has_failures());
    }

    #[test]
    fn only_filter_limits_processing() {
        let dir = root_with(
            r#"[{"name": "Tool", "apt": ["tool"]}, {"name": "Editor", "apt": ["editor"]}]"#,
        );
        let executor = ScriptedExecutor::new().with_which(&["apt"]);
        let opts = InstallOpts {
            only: vec!["editor".to_string()],
            ..InstallOpts::default()
        };
        let report = execute(
            &global(&dir),
            &opts,
            Arc::new(BufferedLog::new()),
            Arc::new(executor.clone()),
            linux(),
            &MockPrompt::new(),
        )
        .unwrap();
        assert_eq!(report.succeeded, vec!["Editor"]);
        assert_eq!(executor.calls(), vec!["apt install -y editor"]);
    }

    #[test]
    fn reboot_prompt_only_when_required() {
        let dir = root_with(r#"[{"name": "Driver", "apt": ["driver"], "requiresReboot": true}]"#);
        let executor = ScriptedExecutor::new().with_which(&["apt", "sudo"]);
        let mut prompt = MockPrompt::new();
        prompt.expect_confirm().times(1).return_const(false);

        let report = execute(
            &global(&dir),
            &InstallOpts::default(),
            Arc::new(BufferedLog::new()),
            Arc::new(executor.clone()),
            linux(),
            &prompt,
        )
        .unwrap();
        assert!(report.reboot_required);
        assert_eq!(executor.count_matching("reboot"), 0);
    }

    #[test]
    fn no_reboot_skips_prompt() {
        let dir = root_with(r#"[{"name": "Driver", "apt": ["driver"], "requiresReboot": true}]"#);
        let executor = ScriptedExecutor::new().with_which(&["apt"]);
        let mut prompt = MockPrompt::new();
        prompt.expect_confirm().never();
        let log = Arc::new(BufferedLog::new());
        let opts = InstallOpts {
            no_reboot: true,
            ..InstallOpts::default()
        };

        execute(
            &global(&dir),
            &opts,
            Arc::clone(&log) as Arc<dyn Log>,
            Arc::new(executor),
            linux(),
            &prompt,
        )
        .unwrap();
        assert!(log.contains("restart manually"));
    }

    #[test]
    fn no_sudo_runs_direct() {
        let dir = root_with(r#"[{"name": "Tool", "apt": ["tool"]}]"#);
        let executor = ScriptedExecutor::new().with_which(&["apt", "sudo"]);
        let opts = InstallOpts {
            no_sudo: true,
            ..InstallOpts::default()
        };
        execute(
            &global(&dir),
            &opts,
            Arc::new(BufferedLog::new()),
            Arc::new(executor.clone()),
            linux(),
            &MockPrompt::new(),
        )
        .unwrap();
        assert_eq!(executor.calls(), vec!["apt install -y tool"]);
    }
}
