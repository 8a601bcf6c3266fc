//! Catalog loading, filtering and validation.
pub mod catalog;
pub mod validation;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use catalog::AppDescriptor;
pub use validation::ValidationWarning;

use crate::error::CatalogError;

/// Catalog path relative to the bootstrap root.
pub const DEFAULT_CATALOG: &str = "conf/apps.json";

/// TOML catalogs hold descriptors under `[[apps]]` tables.
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    apps: Vec<AppDescriptor>,
}

/// The loaded application catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// File the catalog was read from.
    pub path: PathBuf,
    /// Descriptors in declaration order.
    pub apps: Vec<AppDescriptor>,
}

impl Catalog {
    /// Load the catalog at `path`.
    ///
    /// `.json` files hold a top-level array of descriptors; `.toml` files
    /// hold them under `[[apps]]`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read, has an
    /// unsupported extension, or does not parse.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        if !matches!(extension.as_deref(), Some("json" | "toml")) {
            return Err(CatalogError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let apps = if extension.as_deref() == Some("toml") {
            toml::from_str::<TomlCatalog>(&content)
                .map(|c| c.apps)
                .map_err(|e| CatalogError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
        } else {
            serde_json::from_str::<Vec<AppDescriptor>>(&content).map_err(|e| {
                CatalogError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?
        };

        Ok(Self {
            path: path.to_path_buf(),
            apps,
        })
    }

    /// Keep only the applications selected by `--only` / `--skip`.
    ///
    /// Matching is case-insensitive on the full application name.  `only`
    /// takes precedence when both are given.
    #[must_use]
    pub fn select(&self, only: &[String], skip: &[String]) -> Vec<AppDescriptor> {
        let matches = |name: &str, list: &[String]| list.iter().any(|n| n.eq_ignore_ascii_case(name));
        self.apps
            .iter()
            .filter(|app| {
                if !only.is_empty() {
                    return matches(&app.name, only);
                }
                !matches(&app.name, skip)
            })
            .cloned()
            .collect()
    }

    /// Validate the catalog and return warnings.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        validation::validate_all(&self.apps)
    }
}
