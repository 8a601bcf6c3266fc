//! Non-fatal checks run over a freshly loaded catalog.
use std::collections::HashSet;

use super::catalog::AppDescriptor;
use crate::platform::Arch;

/// A validation warning detected after loading the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The application the warning is about.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning about `item`.
    #[must_use]
    pub fn new(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Trait for catalog validators.
///
/// Validators never fail the run; they only report entries that are likely
/// to be mistakes.
pub trait CatalogValidator {
    /// Validate the catalog and return any warnings found.
    fn validate(&self, apps: &[AppDescriptor]) -> Vec<ValidationWarning>;
}

/// Checks each descriptor in isolation.
#[derive(Debug)]
pub struct DescriptorValidator;

impl CatalogValidator for DescriptorValidator {
    fn validate(&self, apps: &[AppDescriptor]) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for (index, app) in apps.iter().enumerate() {
            let item = if app.name.trim().is_empty() {
                warnings.push(ValidationWarning::new(
                    format!("#{index}"),
                    "application has an empty name",
                ));
                format!("#{index}")
            } else {
                app.name.clone()
            };

            if let Some(archs) = &app.architectures {
                if archs.is_empty() {
                    warnings.push(ValidationWarning::new(
                        &item,
                        "empty architectures list skips the application everywhere",
                    ));
                }
                for arch in archs {
                    if Arch::normalize(arch).is_none() {
                        warnings.push(ValidationWarning::new(
                            &item,
                            format!("unknown architecture '{arch}'"),
                        ));
                    }
                }
            }

            if app.gpg_key().is_some() && app.repo_url().is_none() {
                warnings.push(ValidationWarning::new(
                    &item,
                    "repoGpgKey is set but repoUrl is missing",
                ));
            }

            if !app.has_any_packages()
                && app.flatpak_id().is_none()
                && app.pre_install_commands.is_empty()
                && app.post_install_commands.is_empty()
            {
                warnings.push(ValidationWarning::new(&item, "application does nothing"));
            }

            let blank = [&app.dnf, &app.apt, &app.zypper, &app.winget, &app.homebrew]
                .into_iter()
                .flatten()
                .flatten()
                .any(|p| p.trim().is_empty());
            if blank {
                warnings.push(ValidationWarning::new(
                    &item,
                    "package list contains a blank identifier",
                ));
            }
        }

        warnings
    }
}

/// Reports applications declared more than once.
#[derive(Debug)]
pub struct DuplicateNameValidator;

impl CatalogValidator for DuplicateNameValidator {
    fn validate(&self, apps: &[AppDescriptor]) -> Vec<ValidationWarning> {
        let mut seen = HashSet::new();
        apps.iter()
            .filter(|app| !app.name.trim().is_empty())
            .filter(|app| !seen.insert(app.name.to_lowercase()))
            .map(|app| ValidationWarning::new(&app.name, "duplicate application name"))
            .collect()
    }
}

/// Run every validator over the catalog.
#[must_use]
pub fn validate_all(apps: &[AppDescriptor]) -> Vec<ValidationWarning> {
    let validators: [&dyn CatalogValidator; 2] = [&DescriptorValidator, &DuplicateNameValidator];
    validators
        .iter()
        .flat_map(|v| v.validate(apps))
        .collect()
}
