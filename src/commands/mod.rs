//! Subcommand entry points and the catalog loading they share.
pub mod detect;
pub mod install;
pub mod list;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{Catalog, DEFAULT_CATALOG};
use crate::logging::Log;

/// Build version: `BOOTSTRAP_VERSION` at build time, else the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("BOOTSTRAP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Whether `dir` holds the default catalog.
fn has_catalog(dir: &Path) -> bool {
    dir.join(DEFAULT_CATALOG).is_file()
}

/// Resolve the bootstrap root directory.
///
/// Order: `--root`, `BOOTSTRAP_ROOT`, the nearest ancestor of the executable
/// holding `conf/apps.json`, then the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        return Ok(root.clone());
    }

    if let Ok(root) = std::env::var("BOOTSTRAP_ROOT")
        && !root.is_empty()
    {
        return Ok(PathBuf::from(root));
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(found) = exe.ancestors().skip(1).find(|dir| has_catalog(dir))
    {
        return Ok(found.to_path_buf());
    }

    Ok(std::env::current_dir()?)
}

/// Catalog file to load: `--catalog` as given, else the default under `root`.
#[must_use]
pub fn catalog_path(global: &GlobalOpts, root: &Path) -> PathBuf {
    global
        .catalog
        .clone()
        .unwrap_or_else(|| root.join(DEFAULT_CATALOG))
}

/// Resolve, load and validate the catalog, logging every warning.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved or the catalog cannot be
/// loaded.
pub fn load_catalog(global: &GlobalOpts, log: &dyn Log) -> Result<Catalog> {
    let root = resolve_root(global)?;
    let path = catalog_path(global, &root);

    log.stage("Loading catalog");
    let catalog = Catalog::load(&path)?;
    log.info(&format!(
        "loaded {} applications from {}",
        catalog.apps.len(),
        path.display()
    ));

    let warnings = catalog.validate();
    if !warnings.is_empty() {
        log.warn(&format!("found {} catalog warning(s):", warnings.len()));
        for warning in &warnings {
            log.warn(&format!("  [{}]: {}", warning.item, warning.message));
        }
    }

    Ok(catalog)
}
