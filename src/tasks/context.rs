use std::path::Path;

use crate::config::Manifest;
use crate::exec::Executor;
use crate::logging::Logger;
use crate::platform::Platform;

/// Shared context for task execution.
#[derive(Debug)]
pub struct Context<'a> {
    /// Entries to sync and the repository root.
    pub manifest: &'a Manifest,
    /// Platform used to pick installed paths.
    pub platform: Platform,
    /// Logger for output and step recording.
    pub log: &'a Logger,
    /// Command executor (real system calls or a test mock).
    pub executor: &'a dyn Executor,
    /// Whether to log commands instead of running them.
    pub dry_run: bool,
    /// Message used by the upstream commit.
    pub commit_message: String,
}

impl Context<'_> {
    /// Root of the dotfiles repository.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.manifest.root()
    }
}
