//! openSUSE backend.
use super::Backend;
use crate::error::CommandError;
use crate::resources::ResourceChange;
use crate::resources::repository::Repository;
use crate::tasks::Context;

/// `zypper` on openSUSE and SLE.
#[derive(Debug)]
pub struct Zypper;

/// Whether `zypper lr` output has a repository whose alias or name is `short`.
///
/// Rows look like `# | Alias | Name | Enabled | ...`; only rows with a
/// numeric `#` column are repositories.
fn lists_repo(listing: &str, short: &str) -> bool {
    listing.lines().any(|line| {
        let mut columns = line.split('|').map(str::trim);
        columns
            .next()
            .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
            && columns.take(2).any(|column| column.eq_ignore_ascii_case(short))
    })
}

impl Backend for Zypper {
    fn install_command<'a>(&self, batch: &[&'a str]) -> (&'static str, Vec<&'a str>) {
        let mut args = vec!["install", "-y"];
        args.extend_from_slice(batch);
        ("zypper", args)
    }

    fn elevated(&self) -> bool {
        true
    }

    fn reports_already_installed(&self, package: &str, output: &str) -> bool {
        output.contains(&format!("'{package}' is already installed"))
    }

    /// Register the repository with auto-refresh unless it is already
    /// listed, then refresh with automatic key import.
    fn add_repository(
        &self,
        ctx: &Context,
        repo: &Repository<'_>,
    ) -> Result<ResourceChange, CommandError> {
        let listing = ctx.run_unchecked("zypper", &["lr"]);
        let change = if listing.success && lists_repo(&listing.stdout, &repo.short_name) {
            ctx.log
                .debug(&format!("repository {} already registered", repo.short_name));
            ResourceChange::AlreadyCorrect
        } else {
            ctx.log.info(&format!("adding repository {}", repo.url));
            ctx.run_elevated("zypper", &["addrepo", "--refresh", repo.url, &repo.short_name])?;
            ResourceChange::Applied
        };

        ctx.run_elevated("zypper", &["--gpg-auto-import-keys", "refresh"])?;
        Ok(change)
    }
}
