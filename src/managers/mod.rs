//! Supported package managers and their per-manager command strategies.
//!
//! [`PackageManager`] is the closed set of managers the installer knows.
//! Each variant maps to a [`Backend`] implementation that owns the
//! manager's command templates, output classification and repository
//! protocol, so adding a manager means adding one backend module.
pub mod apt;
pub mod dnf;
pub mod homebrew;
pub mod winget;
pub mod zypper;

use std::fmt;

use crate::error::{CommandError, DetectionError};
use crate::exec::{ExecResult, Executor};
use crate::platform::{Os, Platform};
use crate::resources::ResourceChange;
use crate::resources::package::PackageState;
use crate::resources::repository::Repository;
use crate::tasks::Context;

/// Supported package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    /// openSUSE / SLE.
    Zypper,
    /// Fedora / RHEL.
    Dnf,
    /// Debian / Ubuntu.
    Apt,
    /// Windows Package Manager.
    Winget,
    /// Homebrew on macOS.
    Homebrew,
}

impl PackageManager {
    /// Every supported manager.
    pub const ALL: [Self; 5] = [
        Self::Zypper,
        Self::Dnf,
        Self::Apt,
        Self::Winget,
        Self::Homebrew,
    ];

    /// Linux managers in probe order, most specific distro tooling first.
    pub const LINUX_PRIORITY: [Self; 3] = [Self::Zypper, Self::Dnf, Self::Apt];

    /// Catalog key for this manager's package list.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Zypper => "zypper",
            Self::Dnf => "dnf",
            Self::Apt => "apt",
            Self::Winget => "winget",
            Self::Homebrew => "homebrew",
        }
    }

    /// Executable probed on `PATH` and used for installs.
    #[must_use]
    pub const fn executable(self) -> &'static str {
        match self {
            Self::Zypper => "zypper",
            Self::Dnf => "dnf",
            Self::Apt => "apt",
            Self::Winget => "winget",
            Self::Homebrew => "brew",
        }
    }

    /// Whether `repoUrl` entries apply to this manager.
    #[must_use]
    pub const fn supports_repositories(self) -> bool {
        matches!(self, Self::Zypper | Self::Dnf | Self::Apt)
    }

    /// The command/classification strategy for this manager.
    #[must_use]
    pub fn backend(self) -> &'static dyn Backend {
        match self {
            Self::Zypper => &zypper::Zypper,
            Self::Dnf => &dnf::Dnf,
            Self::Apt => &apt::Apt,
            Self::Winget => &winget::Winget,
            Self::Homebrew => &homebrew::Homebrew,
        }
    }

    /// Pick the package manager for this host.
    ///
    /// Windows and macOS map to their universal manager unconditionally.
    /// On Linux the first of [`LINUX_PRIORITY`](Self::LINUX_PRIORITY) found
    /// on `PATH` wins.
    ///
    /// # Errors
    ///
    /// Returns [`DetectionError::NoPackageManager`] on Linux when none of the
    /// candidates is installed.
    pub fn detect(platform: &Platform, executor: &dyn Executor) -> Result<Self, DetectionError> {
        match platform.os {
            Os::Windows => Ok(Self::Winget),
            Os::MacOs => Ok(Self::Homebrew),
            Os::Linux => Self::LINUX_PRIORITY
                .into_iter()
                .find(|m| executor.which(m.executable()))
                .ok_or_else(|| DetectionError::NoPackageManager {
                    os: platform.os,
                    candidates: Self::LINUX_PRIORITY
                        .map(Self::executable)
                        .join(", "),
                }),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Manager-specific command templates and output handling.
pub trait Backend: Send + Sync + fmt::Debug {
    /// Split the package list into install invocations.
    ///
    /// The default installs everything in one call.
    fn batches<'a>(&self, packages: &'a [String]) -> Vec<Vec<&'a str>> {
        vec![packages.iter().map(String::as_str).collect()]
    }

    /// Program and arguments that install one batch non-interactively.
    fn install_command<'a>(&self, batch: &[&'a str]) -> (&'static str, Vec<&'a str>);

    /// Whether installs and repository changes need privilege elevation.
    fn elevated(&self) -> bool;

    /// Whether a finished install invocation counts as success.
    fn succeeded(&self, result: &ExecResult) -> bool {
        result.success
    }

    /// Whether the install output says `package` was already present.
    fn reports_already_installed(&self, package: &str, output: &str) -> bool;

    /// Classify one package after a successful install invocation.
    fn classify(&self, _ctx: &Context, package: &str, output: &str) -> PackageState {
        if self.reports_already_installed(package, output) {
            PackageState::AlreadyInstalled
        } else {
            PackageState::NewlyInstalled
        }
    }

    /// Register a third-party repository and refresh the package index.
    ///
    /// # Errors
    ///
    /// Returns the first [`CommandError`] raised by the protocol.
    fn add_repository(
        &self,
        _ctx: &Context,
        _repo: &Repository<'_>,
    ) -> Result<ResourceChange, CommandError> {
        Ok(ResourceChange::Skipped {
            reason: "repositories are not supported by this package manager".to_string(),
        })
    }
}
