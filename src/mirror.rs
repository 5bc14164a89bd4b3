//! Mirror invoker: copies an entry with `rsync` in either direction.
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ConfigEntry;
use crate::error::SyncError;
use crate::exec::{ExecResult, Executor, command_line};
use crate::paths::rsync_source;
use crate::platform::Platform;

const RSYNC: &str = "rsync";

/// Which way a sync run copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Repository to installed paths.
    Downstream,
    /// Installed paths to repository.
    Upstream,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Downstream => write!(f, "downstream"),
            Self::Upstream => write!(f, "upstream"),
        }
    }
}

/// Source and destination of one rsync call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPlan {
    /// Path copied from.
    pub source: PathBuf,
    /// Path copied to.
    pub destination: PathBuf,
    /// Whether the entry is a directory (its contents are mirrored).
    pub is_directory: bool,
}

impl MirrorPlan {
    /// Plan the copy of `entry` for `platform` in `direction`.
    #[must_use]
    pub fn new(entry: &ConfigEntry, platform: Platform, direction: Direction) -> Self {
        let installed = entry.installed_path(platform).to_path_buf();
        let repository = entry.repository_path.clone();
        let (source, destination) = match direction {
            Direction::Downstream => (repository, installed),
            Direction::Upstream => (installed, repository),
        };
        Self {
            source,
            destination,
            is_directory: entry.is_directory,
        }
    }

    /// Arguments passed to rsync.
    #[must_use]
    pub fn rsync_args(&self) -> Vec<String> {
        vec![
            "-arv".to_string(),
            "--progress".to_string(),
            rsync_source(&self.source, self.is_directory),
            self.destination.display().to_string(),
            "--exclude".to_string(),
            ".git".to_string(),
        ]
    }

    /// Full command line, for logs and dry runs.
    #[must_use]
    pub fn command_line(&self) -> String {
        let args = self.rsync_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        command_line(RSYNC, &args)
    }
}

/// Create the missing parent directory of `path`.
///
/// # Errors
///
/// [`SyncError::Io`] if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), SyncError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|source| SyncError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Copy `plan.source` to `plan.destination` with rsync.
///
/// # Errors
///
/// [`SyncError::PathMissing`] if the source does not exist,
/// [`SyncError::Io`] if the destination's parent cannot be created, or
/// [`SyncError::CommandFailed`] if rsync fails.
pub fn mirror(exec: &dyn Executor, plan: &MirrorPlan) -> Result<ExecResult, SyncError> {
    if !plan.source.exists() {
        return Err(SyncError::PathMissing {
            path: plan.source.clone(),
        });
    }
    ensure_parent_dir(&plan.destination)?;

    let cwd = plan
        .destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let args = plan.rsync_args();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    exec.run_in(cwd, RSYNC, &args)
}
