//! Cross-platform application installer.
//!
//! Reads a declarative catalog of applications and installs each one with
//! the host's package manager (zypper, dnf, apt, winget or Homebrew),
//! registering third-party repositories first and falling back to Flatpak
//! on Linux when native installation is unavailable or fails.  Pre- and
//! post-install hooks run around every application, and the run ends with
//! a succeeded/skipped/failed summary and an optional reboot prompt.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: load and validate the application catalog
//! - **[`managers`]**: package manager detection and per-manager commands
//! - **[`resources`]**: idempotent install steps (repositories, packages, flatpak, hooks)
//! - **[`tasks`]**: the per-application pipeline and run summary
//! - **[`commands`]**: top-level subcommand orchestration (`install`, `detect`, `list`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod privilege;
pub mod prompt;
pub mod resources;
pub mod tasks;
