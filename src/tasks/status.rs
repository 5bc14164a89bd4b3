//! Working-tree status check.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::error::SyncError;
use crate::git;

/// Report whether the repository has unstaged changes.
///
/// A dirty tree is not fatal: the pull that follows stashes around itself.
#[derive(Debug)]
pub struct CheckStatus;

impl Task for CheckStatus {
    fn name(&self) -> &'static str {
        "Check status"
    }

    fn should_run(&self, _ctx: &Context<'_>) -> bool {
        true
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        if ctx.dry_run {
            ctx.log.dry_run("git status");
            return Ok(TaskResult::DryRun);
        }

        match git::status(ctx.executor, ctx.root()) {
            Ok(r) => {
                ctx.log.debug(r.stdout.trim());
                ctx.log.info("working tree clean");
                Ok(TaskResult::Ok)
            }
            Err(e @ SyncError::DirtyTree { .. }) => {
                ctx.log.warn(&e.to_string());
                Ok(TaskResult::Skipped("uncommitted changes".to_string()))
            }
            Err(e) => Err(e).context("git status failed"),
        }
    }
}
