//! Push to the remote.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::git::{self, BRANCH};

/// Publish local commits to `origin`.
#[derive(Debug)]
pub struct PushRepository;

impl Task for PushRepository {
    fn name(&self) -> &'static str {
        "Push repository"
    }

    fn should_run(&self, _ctx: &Context<'_>) -> bool {
        true
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        if ctx.dry_run {
            ctx.log.dry_run(&format!("git push -u origin {BRANCH}"));
            return Ok(TaskResult::DryRun);
        }

        let r = git::push(ctx.executor, ctx.root()).context("git push failed")?;
        ctx.log.debug(r.combined().trim());
        ctx.log.info(&format!("pushed to origin/{BRANCH}"));
        Ok(TaskResult::Ok)
    }
}
