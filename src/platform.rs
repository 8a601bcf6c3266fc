//! Host operating system and CPU architecture.
use std::fmt;

/// Detected operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Any Linux distribution.
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// CPU architecture, normalized to a small closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    /// 64-bit x86 (`x86_64`, `amd64`, `x64`).
    X86_64,
    /// 64-bit ARM (`aarch64`, `arm64`).
    Aarch64,
    /// 32-bit ARM (`arm`, `armv7l`, `armhf`).
    Arm,
    /// 32-bit x86 (`x86`, `i386`, `i686`).
    X86,
    /// 64-bit RISC-V.
    Riscv64,
    /// Anything else; never matches an allow-list.
    Unknown,
}

impl Arch {
    /// Normalize an architecture identifier as written in the catalog or
    /// reported by the toolchain.
    ///
    /// Returns `None` for identifiers outside the supported set.
    #[must_use]
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" | "x86-64" => Some(Self::X86_64),
            "aarch64" | "arm64" => Some(Self::Aarch64),
            "arm" | "armv7" | "armv7l" | "armhf" => Some(Self::Arm),
            "x86" | "i386" | "i686" => Some(Self::X86),
            "riscv64" | "riscv64gc" => Some(Self::Riscv64),
            _ => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X86_64 => write!(f, "x86_64"),
            Self::Aarch64 => write!(f, "aarch64"),
            Self::Arm => write!(f, "arm"),
            Self::X86 => write!(f, "x86"),
            Self::Riscv64 => write!(f, "riscv64"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
    /// Normalized CPU architecture.
    pub arch: Arch,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
            arch: Arch::normalize(std::env::consts::ARCH).unwrap_or(Arch::Unknown),
        }
    }

    /// Create a platform with explicit values.
    #[must_use]
    pub const fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Whether this is a Linux host.
    #[must_use]
    pub fn is_linux(&self) -> bool {
        self.os == Os::Linux
    }

    /// Whether this is a Windows host.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }

    /// Whether this is a macOS host.
    #[must_use]
    pub fn is_macos(&self) -> bool {
        self.os == Os::MacOs
    }

    /// Check an architecture allow-list against the host architecture.
    ///
    /// Entries are normalized before comparison, so `amd64` matches an
    /// `x86_64` host.  Unrecognised entries never match.
    #[must_use]
    pub fn allows_arch<S: AsRef<str>>(&self, allowed: &[S]) -> bool {
        allowed
            .iter()
            .filter_map(|a| Arch::normalize(a.as_ref()))
            .any(|a| a == self.arch && a != Arch::Unknown)
    }

    fn detect_os() -> Os {
        if cfg!(target_os = "windows") {
            Os::Windows
        } else if cfg!(target_os = "macos") {
            Os::MacOs
        } else {
            // Other Unix-like systems are probed like Linux
            Os::Linux
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_detect_returns_valid() {
        let p = Platform::detect();
        assert!(p.is_linux() || p.is_windows() || p.is_macos());
    }

    #[test]
    fn normalize_aliases() {
        assert_eq!(Arch::normalize("amd64"), Some(Arch::X86_64));
        assert_eq!(Arch::normalize("X86_64"), Some(Arch::X86_64));
        assert_eq!(Arch::normalize("arm64"), Some(Arch::Aarch64));
        assert_eq!(Arch::normalize("armv7l"), Some(Arch::Arm));
        assert_eq!(Arch::normalize("i686"), Some(Arch::X86));
        assert_eq!(Arch::normalize("sparc"), None);
    }

    #[test]
    fn allows_arch_matches_normalized_entries() {
        let p = Platform::new(Os::Linux, Arch::X86_64);
        assert!(p.allows_arch(&["amd64"]));
        assert!(p.allows_arch(&["aarch64", "x86_64"]));
    }

    #[test]
    fn allows_arch_rejects_missing_host() {
        let p = Platform::new(Os::Linux, Arch::Aarch64);
        assert!(!p.allows_arch(&["x86_64"]));
        assert!(!p.allows_arch::<&str>(&[]));
    }

    #[test]
    fn unknown_host_never_allowed() {
        let p = Platform::new(Os::Linux, Arch::Unknown);
        assert!(!p.allows_arch(&["x86_64", "sparc"]));
    }

    #[test]
    fn display() {
        assert_eq!(Os::MacOs.to_string(), "macos");
        assert_eq!(
            Platform::new(Os::Windows, Arch::Aarch64).to_string(),
            "windows (aarch64)"
        );
    }
}
