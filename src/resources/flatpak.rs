//! Flatpak fallback: user-scope flathub remote and application installs.
use super::{Resource, ResourceChange, ResourceState};
use crate::error::{CommandError, FallbackError};
use crate::exec::command_line;
use crate::tasks::Context;

/// Remote every fallback install comes from.
pub const REMOTE: &str = "flathub";

/// Location of the flathub remote definition.
pub const REMOTE_URL: &str = "https://dl.flathub.org/repo/flathub.flatpakrepo";

/// Lowercased output fragments meaning the ref is unknown to the local
/// metadata.
const NOT_FOUND_MARKERS: [&str; 3] = ["nothing matches", "no remote refs found", "not found"];

fn is_not_found(output: &str) -> bool {
    let output = output.to_lowercase();
    NOT_FOUND_MARKERS.iter().any(|m| output.contains(m))
}

/// Refresh the remote's appstream metadata.  Failure is only a warning.
fn refresh_appstream(ctx: &Context) {
    let result = ctx.run_unchecked("flatpak", &["update", "--user", "--appstream", REMOTE]);
    if !result.success {
        ctx.log.warn(&format!(
            "flatpak metadata refresh failed: {}",
            result.stderr.trim()
        ));
    }
}

/// The flathub remote in the user installation.
#[derive(Debug)]
pub struct FlathubRemote<'a> {
    ctx: &'a Context,
}

impl<'a> FlathubRemote<'a> {
    /// The remote as seen through `ctx`.
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }
}

impl Resource for FlathubRemote<'_> {
    fn description(&self) -> String {
        format!("flatpak remote {REMOTE}")
    }

    fn current_state(&self) -> ResourceState {
        let result = self.ctx.run_unchecked("flatpak", &["remotes", "--user"]);
        let listed = result
            .stdout
            .lines()
            .any(|line| line.split_whitespace().next() == Some(REMOTE));
        if result.success && listed {
            ResourceState::Correct
        } else {
            ResourceState::Missing
        }
    }

    fn apply(&self) -> Result<ResourceChange, CommandError> {
        self.ctx.log.info(&format!("adding {}", self.description()));
        self.ctx.run(
            "flatpak",
            &["remote-add", "--user", "--if-not-exists", REMOTE, REMOTE_URL],
        )?;
        Ok(ResourceChange::Applied)
    }
}

/// A flatpak application in the user installation.
#[derive(Debug)]
pub struct FlatpakApp<'a> {
    ctx: &'a Context,
    id: &'a str,
}

impl<'a> FlatpakApp<'a> {
    /// The application `id` as seen through `ctx`.
    #[must_use]
    pub const fn new(ctx: &'a Context, id: &'a str) -> Self {
        Self { ctx, id }
    }
}

impl Resource for FlatpakApp<'_> {
    fn description(&self) -> String {
        format!("flatpak {}", self.id)
    }

    fn current_state(&self) -> ResourceState {
        let result = self.ctx.run_unchecked(
            "flatpak",
            &["list", "--user", "--app", "--columns=application"],
        );
        if result.success && result.stdout.lines().any(|l| l.trim() == self.id) {
            ResourceState::Correct
        } else {
            ResourceState::Missing
        }
    }

    /// Install from flathub.  A not-found failure triggers one metadata
    /// refresh and a single retry.
    fn apply(&self) -> Result<ResourceChange, CommandError> {
        let args = ["install", "--user", "-y", REMOTE, self.id];
        let result = self.ctx.run_unchecked("flatpak", &args);
        if result.success {
            self.ctx.log.info(&format!("installed {}", self.description()));
            return Ok(ResourceChange::Applied);
        }
        if !is_not_found(&result.combined_output()) {
            return Err(result.into_error(command_line("flatpak", &args)));
        }

        self.ctx.log.warn(&format!(
            "{} not found on {REMOTE}, refreshing metadata and retrying",
            self.id
        ));
        refresh_appstream(self.ctx);
        self.ctx.run("flatpak", &args)?;
        self.ctx.log.info(&format!("installed {}", self.description()));
        Ok(ResourceChange::Applied)
    }
}

/// Outcome of the one-time flatpak setup for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flatpak {
    /// The remote is registered and installs can proceed.
    Ready,
    /// Flatpak cannot be used on this host.
    Unavailable,
}

impl Flatpak {
    /// Make sure flatpak is usable: the executable exists, the flathub
    /// remote is registered for the user and its metadata is fresh.
    ///
    /// Problems are logged as warnings; the run continues without the
    /// fallback.
    #[must_use]
    pub fn prepare(ctx: &Context) -> Self {
        if !ctx.executor.which("flatpak") {
            ctx.log
                .warn("flatpak is not installed; flatpak fallbacks are unavailable");
            return Self::Unavailable;
        }
        if let Err(e) = FlathubRemote::new(ctx).ensure() {
            ctx.log
                .warn(&format!("cannot register the {REMOTE} remote: {e}"));
            return Self::Unavailable;
        }
        refresh_appstream(ctx);
        Self::Ready
    }

    /// Install application `id` unless it is already present.
    ///
    /// # Errors
    ///
    /// Returns [`FallbackError::Unavailable`] if setup failed, or the
    /// failing flatpak command.
    pub fn install(self, ctx: &Context, id: &str) -> Result<ResourceChange, FallbackError> {
        if self == Self::Unavailable {
            return Err(FallbackError::Unavailable);
        }
        Ok(FlatpakApp::new(ctx, id).ensure()?)
    }
}
