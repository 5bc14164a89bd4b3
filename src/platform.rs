use std::fmt;

/// Operating system family, used as the index into an entry's installed paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS; installed paths at index 0.
    MacOs,
    /// Linux; installed paths at index 1.
    Linux,
    /// Anything else; index 2, which usually falls back to the last path.
    Other,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    /// Position of this platform's path in an entry's installed-path list.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::MacOs => 0,
            Self::Linux => 1,
            Self::Other => 2,
        }
    }
}
