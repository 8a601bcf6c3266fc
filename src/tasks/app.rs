//! Per-application install pipeline.
//!
//! Each application moves through architecture check, pre-install hooks,
//! repository setup, native install, flatpak fallback and post-install
//! hooks.  The first failing step ends the application; the run moves on.
//! On Linux a failed repository or native install moves on to the flatpak
//! fallback instead when the application has one.
use crate::config::AppDescriptor;
use crate::error::{HookStage, InstallError};
use crate::resources::flatpak::Flatpak;
use crate::resources::hook::run_hooks;
use crate::resources::package::install_packages;
use crate::resources::repository::ensure_repository;
use crate::resources::ResourceChange;

use super::Context;

/// Terminal state of one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppOutcome {
    /// Every step completed.
    Succeeded {
        /// The application asked for a reboot.
        requires_reboot: bool,
    },
    /// The application does not apply to this host.
    Skipped(String),
    /// A step failed.
    Failed(InstallError),
}

/// Run the whole pipeline for one application.
#[must_use]
pub fn process_app(ctx: &Context, app: &AppDescriptor, flatpak: Flatpak) -> AppOutcome {
    if !app.runs_on(&ctx.platform) {
        return AppOutcome::Skipped(format!("not available for {}", ctx.platform.arch));
    }
    match install_app(ctx, app, flatpak) {
        Ok(()) => AppOutcome::Succeeded {
            requires_reboot: app.requires_reboot,
        },
        Err(e) => AppOutcome::Failed(e),
    }
}

fn install_app(ctx: &Context, app: &AppDescriptor, flatpak: Flatpak) -> Result<(), InstallError> {
    run_hooks(ctx, HookStage::PreInstall, &app.pre_install_commands)?;

    let fallback_id = if ctx.platform.is_linux() {
        app.flatpak_id()
    } else {
        None
    };

    let native = match ensure_repository(ctx, app) {
        Ok(change) => {
            if let ResourceChange::Skipped { reason } = change {
                ctx.log.debug(&format!("repository: {reason}"));
            }
            install_native(ctx, app, fallback_id)?
        }
        Err(cause) => {
            let error = InstallError::Repository(cause);
            if fallback_id.is_none() {
                return Err(error);
            }
            ctx.log.warn(&format!("{error}; trying flatpak"));
            Native::Failed(error.to_string())
        }
    };

    let native_failure = match native {
        Native::Installed => {
            return run_hooks(ctx, HookStage::PostInstall, &app.post_install_commands);
        }
        Native::NotAttempted => None,
        Native::Failed(message) => Some(message),
    };

    if let Some(id) = fallback_id {
        flatpak
            .install(ctx, id)
            .map_err(|e| InstallError::Fallback {
                native: native_failure,
                fallback: e.to_string(),
            })?;
    }

    run_hooks(ctx, HookStage::PostInstall, &app.post_install_commands)
}

/// Result of the native path when a fallback may still follow.
enum Native {
    Installed,
    NotAttempted,
    /// Message of the step that failed, kept for the combined error.
    Failed(String),
}

/// Install the native packages, if any.  Failures are only returned as
/// `Err` when there is no fallback to try.
fn install_native(
    ctx: &Context,
    app: &AppDescriptor,
    fallback_id: Option<&str>,
) -> Result<Native, InstallError> {
    let Some(packages) = app.packages_for(ctx.manager) else {
        return Ok(Native::NotAttempted);
    };
    match install_packages(ctx, packages) {
        Ok(report) => {
            if report.is_noop() {
                ctx.log.info("already installed");
            }
            if let Some(id) = fallback_id {
                ctx.log
                    .debug(&format!("skipping flatpak {id}: native install succeeded"));
            }
            Ok(Native::Installed)
        }
        Err(cause) => {
            let error = InstallError::Native {
                manager: ctx.manager,
                cause,
            };
            if fallback_id.is_none() {
                return Err(error);
            }
            ctx.log.warn(&format!("{error}; trying flatpak"));
            Ok(Native::Failed(error.to_string()))
        }
    }
}
