//! Homebrew backend.
use super::Backend;

/// `brew` on macOS.
#[derive(Debug)]
pub struct Homebrew;

impl Backend for Homebrew {
    fn install_command<'a>(&self, batch: &[&'a str]) -> (&'static str, Vec<&'a str>) {
        let mut args = vec!["install"];
        args.extend_from_slice(batch);
        ("brew", args)
    }

    /// Homebrew refuses to run as root.
    fn elevated(&self) -> bool {
        false
    }

    fn reports_already_installed(&self, package: &str, output: &str) -> bool {
        output.lines().any(|line| {
            line.contains("is already installed")
                && line.split_whitespace().any(|token| token == package)
        })
    }
}
