//! Catalog processing: applications run one at a time in catalog order.
pub mod app;
mod context;
pub mod reboot;
pub mod report;

pub use app::{AppOutcome, process_app};
pub use context::Context;
pub use report::RunReport;

use crate::config::AppDescriptor;
use crate::resources::flatpak::Flatpak;

/// Whether any application that can run here may need the flatpak fallback.
fn needs_flatpak(ctx: &Context, apps: &[AppDescriptor]) -> bool {
    ctx.platform.is_linux()
        && apps
            .iter()
            .any(|a| a.flatpak_id().is_some() && a.runs_on(&ctx.platform))
}

/// Process every application and collect the outcomes.
///
/// Flatpak is prepared once, before the first application, and only on
/// Linux when some application declares a flatpak id.  A failing
/// application is recorded and the run moves on to the next one.
#[must_use]
pub fn run_catalog(ctx: &Context, apps: &[AppDescriptor]) -> RunReport {
    let flatpak = if needs_flatpak(ctx, apps) {
        ctx.log.stage("Flatpak");
        Flatpak::prepare(ctx)
    } else {
        Flatpak::Unavailable
    };

    let mut report = RunReport::default();
    for app in apps {
        ctx.log.stage(&app.name);
        let outcome = process_app(ctx, app, flatpak);
        match &outcome {
            AppOutcome::Succeeded { .. } => ctx.log.info("done"),
            AppOutcome::Skipped(reason) => ctx.log.info(&format!("skipped: {reason}")),
            AppOutcome::Failed(e) => ctx.log.error(&format!("{}: {e}", app.name)),
        }
        report.record(&app.name, outcome);
    }
    report
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::test_helpers::context_for;
    use super::*;
    use crate::exec::ExecResult;
    use crate::managers::PackageManager;
    use crate::resources::test_helpers::ScriptedExecutor;

    fn app(name: &str) -> AppDescriptor {
        AppDescriptor {
            name: name.to_string(),
            apt: Some(vec![name.to_lowercase()]),
            ..AppDescriptor::default()
        }
    }

    #[test]
    fn processes_apps_in_order_and_continues_after_failure() {
        let executor = ScriptedExecutor::new()
            .respond("apt install -y broken", ExecResult::failed(100, "E: no"));
        let (ctx, _log) = context_for(PackageManager::Apt, executor.clone());

        let report = run_catalog(&ctx, &[app("Broken"), app("Tool")]);
        assert_eq!(report.succeeded, vec!["Tool"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "Broken");
        assert_eq!(
            executor.calls(),
            vec!["sudo apt install -y broken", "sudo apt install -y tool"]
        );
    }

    #[test]
    fn flatpak_not_prepared_without_flatpak_ids() {
        let executor = ScriptedExecutor::new().with_which(&["flatpak"]);
        let (ctx, _log) = context_for(PackageManager::Apt, executor.clone());
        let _ = run_catalog(&ctx, &[app("Tool")]);
        assert_eq!(executor.count_matching("flatpak"), 0);
    }

    #[test]
    fn flatpak_prepared_once_for_many_apps() {
        let executor = ScriptedExecutor::new().with_which(&["flatpak"]);
        let (ctx, _log) = context_for(PackageManager::Apt, executor.clone());
        let mut a = app("A");
        a.flatpak = Some("org.a.App".to_string());
        let mut b = app("B");
        b.flatpak = Some("org.b.App".to_string());

        let _ = run_catalog(&ctx, &[a, b]);
        assert_eq!(executor.count_matching("flatpak remotes"), 1);
        assert_eq!(executor.count_matching("flatpak remote-add"), 1);
    }

    #[test]
    fn skipped_app_is_reported_with_reason() {
        let executor = ScriptedExecutor::new();
        let (ctx, _log) = context_for(PackageManager::Apt, executor.clone());
        let mut editor = app("Editor");
        editor.architectures = Some(vec!["aarch64".to_string()]);

        let report = run_catalog(&ctx, &[editor]);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].1.contains("x86_64"));
        assert_eq!(executor.call_count(), 0);
    }

    #[test]
    fn native_and_fallback_failures_are_combined() {
        let executor = ScriptedExecutor::new()
            .with_which(&["flatpak"])
            .respond("apt install", ExecResult::failed(100, "E: Unable to locate package tool"))
            .respond(
                "flatpak install",
                ExecResult::failed(1, "error: Nothing matches org.tool.App"),
            );
        let (ctx, _log) = context_for(PackageManager::Apt, executor.clone());
        let mut tool = app("Tool");
        tool.flatpak = Some("org.tool.App".to_string());

        let report = run_catalog(&ctx, &[tool]);
        let message = &report.failed[0].1;
        assert!(message.contains("Unable to locate package tool"));
        assert!(message.contains("Nothing matches org.tool.App"));
        assert_eq!(executor.count_matching("flatpak install"), 2);
        assert_eq!(executor.count_matching("--appstream"), 2);
    }
}
