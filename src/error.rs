//! Domain-specific error types for the bootstrap installer.
//!
//! Internal modules return typed errors built with [`thiserror`]; command
//! handlers at the CLI boundary convert them to [`anyhow::Error`] via `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! fatal (abort the run, non-zero exit)
//! ├── CatalogError    catalog missing, unreadable, or malformed
//! └── DetectionError  no supported package manager on this host
//!
//! per application (recorded, run continues)
//! └── InstallError    hook, repository, native, or fallback failure
//!     ├── CommandError  one external command exited non-zero
//!     └── FallbackError flatpak unavailable or flatpak command failed
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::managers::PackageManager;
use crate::platform::Os;

/// An external command exited unsuccessfully.
///
/// Carries the full command line, the exit code (if the process exited
/// normally) and both captured output streams so the failure can be
/// diagnosed from the run summary alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{command}` {}{}", exit_label(.code), stream_detail(.stdout, .stderr))]
pub struct CommandError {
    /// The command line that was executed.
    pub command: String,
    /// Exit code, or `None` when the process was killed or never spawned.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(
        || "did not exit normally".to_string(),
        |c| format!("exited with code {c}"),
    )
}

fn stream_detail(stdout: &str, stderr: &str) -> String {
    let mut out = String::new();
    if !stdout.trim().is_empty() {
        out.push_str(&format!("\nstdout: {}", stdout.trim()));
    }
    if !stderr.trim().is_empty() {
        out.push_str(&format!("\nstderr: {}", stderr.trim()));
    }
    out
}

/// Errors that arise from loading the application catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("cannot read catalog {}: {source}", .path.display())]
    Io {
        /// Path of the catalog file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The catalog file is not a valid descriptor document.
    #[error("invalid catalog {}: {message}", .path.display())]
    Parse {
        /// Path of the catalog file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The catalog file extension is neither `.json` nor `.toml`.
    #[error("unsupported catalog format: {} (expected .json or .toml)", .path.display())]
    UnsupportedFormat {
        /// Path of the catalog file.
        path: PathBuf,
    },
}

/// Errors that arise while selecting the host package manager.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    /// None of the candidate package managers is on `PATH`.
    #[error("no supported package manager found on {os} (looked for {candidates})")]
    NoPackageManager {
        /// Host operating system family.
        os: Os,
        /// Executables that were probed, in priority order.
        candidates: String,
    },
}

/// Failure of the universal-package fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FallbackError {
    /// The `flatpak` executable is not installed on this host.
    #[error("flatpak is not available on this host")]
    Unavailable,

    /// A flatpak command failed.
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Which hook list a failing command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    /// Commands run before repository and package steps.
    PreInstall,
    /// Commands run after all install steps succeeded.
    PostInstall,
}

impl std::fmt::Display for HookStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreInstall => write!(f, "pre-install"),
            Self::PostInstall => write!(f, "post-install"),
        }
    }
}

/// Application-level failure, recorded in the run summary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstallError {
    /// A pre- or post-install command failed.
    #[error("{stage} command failed: {cause}")]
    Hook {
        /// Hook list the command came from.
        stage: HookStage,
        /// The failed command.
        cause: CommandError,
    },

    /// Registering the third-party repository failed.
    #[error("repository setup failed: {0}")]
    Repository(CommandError),

    /// The native package manager failed and no fallback applies.
    #[error("{manager} install failed: {cause}")]
    Native {
        /// Manager that was invoked.
        manager: PackageManager,
        /// The failed install command.
        cause: CommandError,
    },

    /// The flatpak fallback failed, possibly after a native failure.
    #[error("{}", fallback_message(.native, .fallback))]
    Fallback {
        /// Rendered native failure, when native installation was attempted.
        native: Option<String>,
        /// Rendered fallback failure.
        fallback: String,
    },
}

#[allow(clippy::ref_option)]
fn fallback_message(native: &Option<String>, fallback: &str) -> String {
    native.as_ref().map_or_else(
        || format!("flatpak install failed: {fallback}"),
        |n| format!("{n}; flatpak fallback failed: {fallback}"),
    )
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn apt_failure() -> CommandError {
        CommandError {
            command: "sudo apt install -y tool".to_string(),
            code: Some(100),
            stdout: String::new(),
            stderr: "E: Unable to locate package tool\n".to_string(),
        }
    }

    #[test]
    fn command_error_display_includes_command_code_and_streams() {
        let e = CommandError {
            command: "dnf install -y editor".to_string(),
            code: Some(1),
            stdout: "Last metadata expiration check".to_string(),
            stderr: "No match for argument: editor".to_string(),
        };
        let text = e.to_string();
        assert!(text.contains("`dnf install -y editor`"));
        assert!(text.contains("exited with code 1"));
        assert!(text.contains("stdout: Last metadata expiration check"));
        assert!(text.contains("stderr: No match for argument: editor"));
    }

    #[test]
    fn command_error_display_omits_empty_streams() {
        let e = CommandError {
            command: "false".to_string(),
            code: None,
            stdout: "  ".to_string(),
            stderr: String::new(),
        };
        assert_eq!(e.to_string(), "`false` did not exit normally");
    }

    #[test]
    fn catalog_error_io_display() {
        let e = CatalogError::Io {
            path: PathBuf::from("conf/apps.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("conf/apps.json"));
        assert!(e.to_string().contains("no such file"));
    }

    #[test]
    fn catalog_error_unsupported_format_display() {
        let e = CatalogError::UnsupportedFormat {
            path: PathBuf::from("apps.yaml"),
        };
        assert!(e.to_string().contains("apps.yaml"));
        assert!(e.to_string().contains(".json or .toml"));
    }

    #[test]
    fn detection_error_lists_candidates() {
        let e = DetectionError::NoPackageManager {
            os: Os::Linux,
            candidates: "zypper, dnf, apt".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "no supported package manager found on linux (looked for zypper, dnf, apt)"
        );
    }

    #[test]
    fn hook_error_names_stage() {
        let e = InstallError::Hook {
            stage: HookStage::PostInstall,
            cause: apt_failure(),
        };
        assert!(e.to_string().starts_with("post-install command failed"));
    }

    #[test]
    fn native_error_names_manager() {
        let e = InstallError::Native {
            manager: PackageManager::Apt,
            cause: apt_failure(),
        };
        assert!(e.to_string().starts_with("apt install failed"));
        assert!(e.to_string().contains("Unable to locate package tool"));
    }

    #[test]
    fn fallback_error_combines_both_causes() {
        let native = InstallError::Native {
            manager: PackageManager::Apt,
            cause: apt_failure(),
        };
        let e = InstallError::Fallback {
            native: Some(native.to_string()),
            fallback: "error: Nothing matches org.tool.App".to_string(),
        };
        let text = e.to_string();
        assert!(text.contains("Unable to locate package tool"));
        assert!(text.contains("Nothing matches org.tool.App"));
    }

    #[test]
    fn fallback_error_without_native_cause() {
        let e = InstallError::Fallback {
            native: None,
            fallback: FallbackError::Unavailable.to_string(),
        };
        assert_eq!(
            e.to_string(),
            "flatpak install failed: flatpak is not available on this host"
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<CommandError>();
        assert_send_sync::<CatalogError>();
        assert_send_sync::<DetectionError>();
        assert_send_sync::<FallbackError>();
        assert_send_sync::<InstallError>();
    }

    #[test]
    fn catalog_error_converts_to_anyhow() {
        let e = CatalogError::Parse {
            path: PathBuf::from("apps.json"),
            message: "expected value".to_string(),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
