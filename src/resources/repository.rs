//! Third-party package repositories.
use super::ResourceChange;
use crate::config::AppDescriptor;
use crate::error::CommandError;
use crate::tasks::Context;

/// A repository to register, derived from an application descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository<'a> {
    /// Identifier used for the repository alias, `.repo` file and key file.
    pub short_name: String,
    /// Human-readable repository name.
    pub name: &'a str,
    /// Repository location as written in the catalog.
    pub url: &'a str,
    /// Signing key to trust first, if any.
    pub gpg_key: Option<&'a str>,
}

impl<'a> Repository<'a> {
    /// Build the repository for `app`, or `None` if it declares none.
    #[must_use]
    pub fn for_app(app: &'a AppDescriptor) -> Option<Self> {
        Some(Self {
            short_name: short_name(&app.name),
            name: &app.name,
            url: app.repo_url()?,
            gpg_key: app.gpg_key(),
        })
    }
}

/// Repository identifier for an application name: lowercased, whitespace
/// removed.
///
/// # Examples
///
/// ```
/// use bootstrap_cli::resources::repository::short_name;
///
/// assert_eq!(short_name("Visual Studio Code"), "visualstudiocode");
/// ```
#[must_use]
pub fn short_name(app_name: &str) -> String {
    app_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Register the application's repository with the context's manager.
///
/// Skipped when the application declares no repository or the manager has
/// no repository protocol.
///
/// # Errors
///
/// Returns the first failing command of the manager's protocol.
pub fn ensure_repository(ctx: &Context, app: &AppDescriptor) -> Result<ResourceChange, CommandError> {
    let Some(repo) = Repository::for_app(app) else {
        return Ok(ResourceChange::Skipped {
            reason: "no repository declared".to_string(),
        });
    };
    if !ctx.manager.supports_repositories() {
        ctx.log.debug(&format!(
            "ignoring repository {} on {}",
            repo.url, ctx.manager
        ));
        return Ok(ResourceChange::Skipped {
            reason: format!("{} does not use repositories", ctx.manager),
        });
    }
    ctx.manager.backend().add_repository(ctx, &repo)
}
