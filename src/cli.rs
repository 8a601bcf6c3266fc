//! Command-line surface.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the bootstrap installer.
#[derive(Parser, Debug)]
#[command(
    name = "bootstrap",
    about = "Cross-platform application installer for fresh machines",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Override bootstrap root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Catalog file (default: <root>/conf/apps.json)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install every application in the catalog
    Install(InstallOpts),
    /// Show the detected platform and package manager
    Detect,
    /// Show what install would do for each application
    List,
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the per-command log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Install(_) => "install",
            Self::Detect => "detect",
            Self::List => "list",
            Self::Version => "version",
        }
    }
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallOpts {
    /// Skip specific applications
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Install only specific applications
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Never prompt for a reboot
    #[arg(long)]
    pub no_reboot: bool,

    /// Run privileged commands without sudo
    #[arg(long)]
    pub no_sudo: bool,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_install_filters() {
        let cli = Cli::parse_from(["bootstrap", "install", "--only", "Tool,Editor"]);
        match cli.command {
            Command::Install(opts) => {
                assert_eq!(opts.only, vec!["Tool", "Editor"]);
                assert!(opts.skip.is_empty());
                assert!(!opts.no_reboot);
            }
            other => panic!("expected install, got {other:?}"),
        }
    }

    #[test]
    fn parse_install_flags() {
        let cli = Cli::parse_from([
            "bootstrap",
            "install",
            "--skip",
            "Tool",
            "--no-reboot",
            "--no-sudo",
        ]);
        let Command::Install(opts) = cli.command else {
            panic!("expected install");
        };
        assert_eq!(opts.skip, vec!["Tool"]);
        assert!(opts.no_reboot);
        assert!(opts.no_sudo);
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::parse_from([
            "bootstrap",
            "list",
            "--root",
            "/srv/bootstrap",
            "--catalog",
            "apps.toml",
            "-v",
        ]);
        assert!(matches!(cli.command, Command::List));
        assert!(cli.verbose);
        assert_eq!(cli.global.root, Some(PathBuf::from("/srv/bootstrap")));
        assert_eq!(cli.global.catalog, Some(PathBuf::from("apps.toml")));
    }

    #[test]
    fn command_names_match_log_files() {
        assert_eq!(Command::Detect.name(), "detect");
        assert_eq!(Command::Install(InstallOpts::default()).name(), "install");
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["bootstrap"]).is_err());
    }
}
