//! Fedora-family backend.
use super::Backend;
use crate::error::CommandError;
use crate::resources::ResourceChange;
use crate::resources::package::PackageState;
use crate::resources::repository::Repository;
use crate::tasks::Context;

/// Directory dnf reads `.repo` definitions from.
const REPO_DIR: &str = "/etc/yum.repos.d";

/// `dnf` on Fedora and RHEL derivatives.
#[derive(Debug)]
pub struct Dnf;

/// Render the `.repo` file registered for `repo`.
#[must_use]
pub fn render_repo_file(repo: &Repository<'_>) -> String {
    let gpg = repo.gpg_key.map_or_else(
        || "gpgcheck=0\n".to_string(),
        |key| format!("gpgcheck=1\ngpgkey={key}\n"),
    );
    format!(
        "[{}]\nname={}\nbaseurl={}\nenabled=1\n{gpg}",
        repo.short_name, repo.name, repo.url
    )
}

/// Whether `dnf repolist` output lists a repository with id `id`.
///
/// The first line is the `repo id  repo name` header.
fn lists_repo(listing: &str, id: &str) -> bool {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .any(|first| first.eq_ignore_ascii_case(id))
}

/// Whether `token` names `package`, with or without a version suffix.
fn names_package(token: &str, package: &str) -> bool {
    let token = token.trim_matches(|c| matches!(c, '"' | '\'' | '.' | ','));
    token == package
        || token
            .strip_prefix(package)
            .is_some_and(|rest| rest.starts_with('-'))
}

/// Whether the transaction summary in `output` names `package`.
fn in_transaction(package: &str, output: &str) -> bool {
    output
        .lines()
        .filter(|line| !line.contains("is already installed"))
        .flat_map(str::split_whitespace)
        .any(|token| names_package(token, package))
}

impl Backend for Dnf {
    fn install_command<'a>(&self, batch: &[&'a str]) -> (&'static str, Vec<&'a str>) {
        let mut args = vec!["install", "-y"];
        args.extend_from_slice(batch);
        ("dnf", args)
    }

    fn elevated(&self) -> bool {
        true
    }

    fn reports_already_installed(&self, package: &str, output: &str) -> bool {
        output.lines().any(|line| {
            line.contains("is already installed")
                && line
                    .split_whitespace()
                    .skip_while(|t| *t != "Package")
                    .nth(1)
                    .is_some_and(|t| names_package(t, package))
        })
    }

    /// A package named in the transaction was installed by this call.
    /// Anything else (for example after "Nothing to do") is decided by
    /// `dnf list installed`: listed means it was already present.
    fn classify(&self, ctx: &Context, package: &str, output: &str) -> PackageState {
        if self.reports_already_installed(package, output) {
            return PackageState::AlreadyInstalled;
        }
        if in_transaction(package, output) {
            return PackageState::NewlyInstalled;
        }
        let query = ctx.run_unchecked("dnf", &["list", "installed", package]);
        if query.success {
            PackageState::AlreadyInstalled
        } else {
            ctx.log
                .warn(&format!("{package} is not listed as installed after dnf install"));
            PackageState::NewlyInstalled
        }
    }

    fn add_repository(
        &self,
        ctx: &Context,
        repo: &Repository<'_>,
    ) -> Result<ResourceChange, CommandError> {
        if let Some(key) = repo.gpg_key {
            ctx.log.info(&format!("importing signing key {key}"));
            ctx.run_elevated("rpm", &["--import", key])?;
        }

        let listing = ctx.run_unchecked("dnf", &["repolist", "--enabled"]);
        let change = if listing.success && lists_repo(&listing.stdout, &repo.short_name) {
            ctx.log
                .debug(&format!("repository {} already enabled", repo.short_name));
            ResourceChange::AlreadyCorrect
        } else {
            let path = format!("{REPO_DIR}/{}.repo", repo.short_name);
            ctx.log.info(&format!("writing {path}"));
            ctx.run_elevated_with_input("tee", &[&path], &render_repo_file(repo))?;
            ResourceChange::Applied
        };

        ctx.run_elevated("dnf", &["makecache"])?;
        Ok(change)
    }
}
