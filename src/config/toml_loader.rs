//! TOML parsing for `dotsync.toml`.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// One `[[entry]]` table as written in `dotsync.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntrySpec {
    /// Logical tool name (`nvim`, `vim`, ...).
    pub name: String,
    /// Whether the entry mirrors a whole directory.
    #[serde(default)]
    pub directory: bool,
    /// Installed paths ordered by platform index; `~` is expanded.
    pub installed: Vec<String>,
    /// Path inside the dotfiles repository, relative to its root.
    pub repository: PathBuf,
    /// Cache directory cleared after a downstream sync.
    #[serde(default)]
    pub cache: Option<String>,
}

/// Top-level layout of `dotsync.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Entries, in the order they are processed.
    #[serde(default, rename = "entry")]
    pub entries: Vec<EntrySpec>,
}

/// Read and parse `path`.
///
/// Returns `Ok(None)` when the file does not exist, so callers fall back to
/// the built-in table.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content, path).map(Some)
}

/// Parse `content`; `path` is only used in error messages.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSyntax`] on malformed TOML or schema mismatch.
pub fn parse_config(content: &str, path: &Path) -> Result<ConfigFile, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::InvalidSyntax {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}
