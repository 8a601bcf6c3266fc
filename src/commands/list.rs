//! `list`: show the planned action for every catalog entry.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::AppDescriptor;
use crate::exec::Executor;
use crate::logging::Log;
use crate::managers::PackageManager;
use crate::platform::Platform;

/// Describe what `install` would do for `app` on this host.
#[must_use]
pub fn describe(app: &AppDescriptor, platform: &Platform, manager: PackageManager) -> String {
    if !app.runs_on(platform) {
        return format!("skip (not available for {})", platform.arch);
    }

    let mut actions = Vec::new();
    if !app.pre_install_commands.is_empty() {
        actions.push(format!("{} pre-install", app.pre_install_commands.len()));
    }
    if manager.supports_repositories()
        && let Some(url) = app.repo_url()
    {
        actions.push(format!("repo {url}"));
    }
    let flatpak = app.flatpak_id().filter(|_| platform.is_linux());
    match (app.packages_for(manager), flatpak) {
        (Some(packages), Some(id)) => {
            actions.push(format!("{manager}: {} (flatpak {id} on failure)", packages.join(", ")));
        }
        (Some(packages), None) => actions.push(format!("{manager}: {}", packages.join(", "))),
        (None, Some(id)) => actions.push(format!("flatpak {id}")),
        (None, None) => {}
    }
    if !app.post_install_commands.is_empty() {
        actions.push(format!("{} post-install", app.post_install_commands.len()));
    }
    if app.requires_reboot {
        actions.push("reboot".to_string());
    }

    if actions.is_empty() {
        "nothing to do".to_string()
    } else {
        actions.join("; ")
    }
}

/// Print each catalog application with its planned action.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or no package manager
/// is detected.
pub fn run(
    global: &GlobalOpts,
    log: &dyn Log,
    executor: &dyn Executor,
    platform: &Platform,
) -> Result<()> {
    let catalog = super::load_catalog(global, log)?;
    let manager = PackageManager::detect(platform, executor)?;

    log.stage(&format!("Applications ({platform}, {manager})"));
    for app in &catalog.apps {
        log.info(&format!("{}: {}", app.name, describe(app, platform, manager)));
    }
    Ok(())
}
