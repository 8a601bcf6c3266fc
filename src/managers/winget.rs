//! Windows Package Manager backend.
use super::Backend;
use crate::exec::ExecResult;

/// Output phrases winget prints, with a non-zero exit, when there is
/// nothing to install.
const ALREADY_INSTALLED: [&str; 3] = [
    "Found an existing package already installed",
    "No available upgrade found",
    "No newer package versions are available",
];

/// `winget` on Windows.
#[derive(Debug)]
pub struct Winget;

impl Backend for Winget {
    /// winget installs one id per invocation.
    fn batches<'a>(&self, packages: &'a [String]) -> Vec<Vec<&'a str>> {
        packages.iter().map(|p| vec![p.as_str()]).collect()
    }

    fn install_command<'a>(&self, batch: &[&'a str]) -> (&'static str, Vec<&'a str>) {
        let mut args = vec!["install"];
        for &id in batch {
            args.extend(["--id", id]);
        }
        args.extend([
            "--exact",
            "--silent",
            "--accept-source-agreements",
            "--accept-package-agreements",
        ]);
        ("winget", args)
    }

    fn elevated(&self) -> bool {
        false
    }

    fn succeeded(&self, result: &ExecResult) -> bool {
        result.success || self.reports_already_installed("", &result.combined_output())
    }

    fn reports_already_installed(&self, _package: &str, output: &str) -> bool {
        ALREADY_INSTALLED.iter().any(|phrase| output.contains(phrase))
    }
}
