//! Application descriptors as declared in the catalog file.
use serde::Deserialize;

use crate::managers::PackageManager;
use crate::platform::Platform;

/// One entry in the declarative application catalog.
///
/// Keys are camelCase in the catalog (`repoUrl`, `preInstallCommands`, …).
/// Descriptors are read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    /// Human-readable name, used for logging and the repository short-name.
    pub name: String,

    /// Packages installed with dnf.
    #[serde(default)]
    pub dnf: Option<Vec<String>>,
    /// Packages installed with apt.
    #[serde(default)]
    pub apt: Option<Vec<String>>,
    /// Packages installed with zypper.
    #[serde(default)]
    pub zypper: Option<Vec<String>>,
    /// Packages installed with winget.
    #[serde(default)]
    pub winget: Option<Vec<String>>,
    /// Packages installed with Homebrew.
    #[serde(default)]
    pub homebrew: Option<Vec<String>>,

    /// Flatpak application id, consulted on Linux only.
    #[serde(default)]
    pub flatpak: Option<String>,

    /// Repository to register before installing.
    #[serde(default)]
    pub repo_url: Option<String>,

    /// Legacy spelling of `repoUrl`.
    #[serde(default)]
    pub repo: Option<String>,

    /// Signing key to trust before the repository is added.
    #[serde(default)]
    pub repo_gpg_key: Option<String>,

    /// Shell commands run before anything is installed.
    #[serde(default)]
    pub pre_install_commands: Vec<String>,
    /// Shell commands run after a successful install.
    #[serde(default)]
    pub post_install_commands: Vec<String>,

    /// A successful install should be followed by a reboot.
    #[serde(default)]
    pub requires_reboot: bool,

    /// CPU architecture allow-list; absent means every architecture.
    #[serde(default)]
    pub architectures: Option<Vec<String>>,
}

impl AppDescriptor {
    /// Package identifiers for `manager`, or `None` if the list is absent or
    /// empty.
    #[must_use]
    pub fn packages_for(&self, manager: PackageManager) -> Option<&[String]> {
        let list = match manager {
            PackageManager::Dnf => &self.dnf,
            PackageManager::Apt => &self.apt,
            PackageManager::Zypper => &self.zypper,
            PackageManager::Winget => &self.winget,
            PackageManager::Homebrew => &self.homebrew,
        };
        list.as_deref().filter(|l| !l.is_empty())
    }

    /// Repository location, preferring `repoUrl` over the legacy `repo` key.
    #[must_use]
    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url
            .as_deref()
            .or(self.repo.as_deref())
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    /// Signing key location, if any.
    #[must_use]
    pub fn gpg_key(&self) -> Option<&str> {
        self.repo_gpg_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Flatpak id, if any.
    #[must_use]
    pub fn flatpak_id(&self) -> Option<&str> {
        self.flatpak
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Whether the architecture allow-list admits `platform`.
    ///
    /// No list admits every host; an empty list admits none.
    #[must_use]
    pub fn runs_on(&self, platform: &Platform) -> bool {
        self.architectures
            .as_deref()
            .is_none_or(|archs| platform.allows_arch(archs))
    }

    /// Whether any package list is populated.
    #[must_use]
    pub fn has_any_packages(&self) -> bool {
        PackageManager::ALL
            .iter()
            .any(|m| self.packages_for(*m).is_some())
    }
}
