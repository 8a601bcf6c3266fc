//! `detect`: report what the installer sees on this host.
use anyhow::Result;

use crate::exec::Executor;
use crate::logging::Log;
use crate::managers::PackageManager;
use crate::platform::Platform;
use crate::privilege::Privilege;

/// Print the detected platform, package manager and elevation strategy.
///
/// # Errors
///
/// Returns an error if no supported package manager is found.
pub fn run(log: &dyn Log, executor: &dyn Executor, platform: &Platform) -> Result<PackageManager> {
    log.stage("Detecting host");
    log.info(&format!("os: {}", platform.os));
    log.info(&format!("architecture: {}", platform.arch));

    let manager = PackageManager::detect(platform, executor)?;
    log.info(&format!("package manager: {manager}"));

    let elevation = match Privilege::detect(platform, executor) {
        Privilege::Sudo => "sudo",
        Privilege::Direct => "none",
    };
    log.info(&format!("elevation: {elevation}"));
    log.info(&format!(
        "flatpak: {}",
        if platform.is_linux() && executor.which("flatpak") {
            "available"
        } else {
            "unavailable"
        }
    ));
    Ok(manager)
}
