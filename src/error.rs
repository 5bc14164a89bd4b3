//! Domain-specific error types for dotsync.
//!
//! Internal modules return [`SyncError`] or [`ConfigError`]; tasks and
//! command handlers convert them to [`anyhow::Error`] with the `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! SyncError
//! ├── DirtyTree     : working tree has unstaged changes
//! ├── CommandFailed : git or rsync exited non-zero
//! ├── PathMissing   : a repository or source path does not exist
//! ├── Io            : creating or removing a directory failed
//! └── Spawn         : the program could not be started
//! ConfigError       : dotsync.toml parsing and table validation
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Marker git prints in `git status` when tracked files have unstaged edits.
pub const UNSTAGED_MARKER: &str = "Changes not staged for commit:";

/// Errors raised while talking to git, rsync or the filesystem.
#[derive(Error, Debug)]
pub enum SyncError {
    /// `git status` reported tracked files with unstaged modifications.
    #[error("{} changes need to be committed in {}", UNSTAGED_MARKER, .repo.display())]
    DirtyTree {
        /// Repository whose working tree is dirty.
        repo: PathBuf,
    },

    /// An external command ran but exited unsuccessfully.
    #[error("{command} failed (exit {}): {}", .code.unwrap_or(-1), detail(.stdout, .stderr))]
    CommandFailed {
        /// Program and arguments as they were invoked.
        command: String,
        /// Exit code, `None` when the process was killed by a signal.
        code: Option<i32>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// A path the operation depends on does not exist.
    #[error("path does not exist: {}", .path.display())]
    PathMissing {
        /// The missing path.
        path: PathBuf,
    },

    /// A filesystem operation on `path` failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path being created or removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The program could not be started at all (not installed, not executable).
    #[error("failed to execute {program}: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Prefer stderr for the message; rsync and git sometimes only write stdout.
fn detail<'a>(stdout: &'a str, stderr: &'a str) -> &'a str {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        stdout.trim()
    } else {
        stderr
    }
}

/// Errors that arise while building the config table.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `dotsync.toml` could not be read.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// `dotsync.toml` is not valid TOML or does not match the entry schema.
    #[error("invalid config file {}: {message}", .path.display())]
    InvalidSyntax {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A table entry breaks one of the table invariants.
    #[error("invalid entry '{name}': {reason}")]
    InvalidEntry {
        /// Entry name (may be empty when the name itself is the problem).
        name: String,
        /// Human-readable reason.
        reason: String,
    },
}
