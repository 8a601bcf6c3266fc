//! Privilege elevation strategy for commands that mutate the host.
use crate::exec::Executor;
use crate::platform::Platform;

/// How mutating host commands are elevated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// Prefix commands with `sudo`.
    Sudo,
    /// Run commands as-is (Windows, root shells, or `--no-sudo`).
    Direct,
}

impl Privilege {
    /// Pick the strategy for this host.
    ///
    /// Windows never elevates through a wrapper; Unix hosts use `sudo` when it
    /// is on `PATH`.
    #[must_use]
    pub fn detect(platform: &Platform, executor: &dyn Executor) -> Self {
        if platform.is_windows() || !executor.which("sudo") {
            Self::Direct
        } else {
            Self::Sudo
        }
    }

    /// Wrap `program args...` according to this strategy.
    #[must_use]
    pub fn wrap<'a>(self, program: &'a str, args: &[&'a str]) -> (&'a str, Vec<&'a str>) {
        match self {
            Self::Sudo => {
                let mut wrapped = Vec::with_capacity(args.len() + 1);
                wrapped.push(program);
                wrapped.extend_from_slice(args);
                ("sudo", wrapped)
            }
            Self::Direct => (program, args.to_vec()),
        }
    }

    /// The command that reboots this host.
    #[must_use]
    pub fn reboot_command(self, platform: &Platform) -> (&'static str, Vec<&'static str>) {
        if platform.is_windows() {
            ("shutdown", vec!["/r", "/t", "0"])
        } else {
            self.wrap("reboot", &[])
        }
    }
}
