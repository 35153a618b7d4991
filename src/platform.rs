//! Host package manager detection.
use std::fmt;

use crate::exec::Executor;

/// Package managers the bootstrap routines know how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// Debian and Ubuntu.
    Apt,
    /// Arch Linux.
    Pacman,
    /// Fedora.
    Dnf,
    /// macOS (and Linuxbrew).
    Brew,
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl PackageManager {
    /// Detection order; the first program found on `PATH` wins.
    const PROBE_ORDER: [Self; 4] = [Self::Pacman, Self::Apt, Self::Dnf, Self::Brew];

    /// Detect the package manager available on this host.
    #[must_use]
    pub fn detect(executor: &dyn Executor) -> Option<Self> {
        Self::PROBE_ORDER
            .into_iter()
            .find(|pm| executor.which(pm.program()))
    }

    /// The executable probed for during detection.
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Apt => "apt-get",
            Self::Pacman => "pacman",
            Self::Dnf => "dnf",
            Self::Brew => "brew",
        }
    }

    /// Non-interactive command line that installs `package`.
    #[must_use]
    pub fn install_command(self, package: &str) -> String {
        match self {
            Self::Apt => format!("sudo apt-get install -y {package}"),
            Self::Pacman => format!("sudo pacman -S --needed --noconfirm {package}"),
            Self::Dnf => format!("sudo dnf install -y {package}"),
            Self::Brew => format!("brew install {package}"),
        }
    }
}
