//! Debian-family backend.
use super::Backend;
use crate::error::CommandError;
use crate::resources::ResourceChange;
use crate::resources::repository::Repository;
use crate::tasks::Context;

/// `apt` on Debian and Ubuntu.
#[derive(Debug)]
pub struct Apt;

impl Backend for Apt {
    fn install_command<'a>(&self, batch: &[&'a str]) -> (&'static str, Vec<&'a str>) {
        let mut args = vec!["install", "-y"];
        args.extend_from_slice(batch);
        ("apt", args)
    }

    fn elevated(&self) -> bool {
        true
    }

    fn reports_already_installed(&self, package: &str, output: &str) -> bool {
        output.contains(&format!("{package} is already the newest version"))
    }

    /// Trust the key through the legacy `apt-key` store, add the source line
    /// and refresh.  There is no pre-existence check: `add-apt-repository`
    /// tolerates re-adding a source it already has.
    fn add_repository(
        &self,
        ctx: &Context,
        repo: &Repository<'_>,
    ) -> Result<ResourceChange, CommandError> {
        if let Some(key) = repo.gpg_key {
            let key_file = ctx.work_dir.join(format!("{}.asc", repo.short_name));
            let key_file = key_file.to_string_lossy();
            ctx.log.info(&format!("importing signing key {key}"));
            ctx.run("curl", &["-fsSL", "-o", &key_file, key])?;
            ctx.run_elevated("apt-key", &["add", &key_file])?;
        }

        ctx.log.info(&format!("adding repository {}", repo.url));
        ctx.run_elevated("add-apt-repository", &["-y", repo.url])?;
        ctx.run_elevated("apt", &["update"])?;
        Ok(ResourceChange::Applied)
    }
}
