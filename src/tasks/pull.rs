//! Rebasing pull with stash bookkeeping.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::git::{self, UP_TO_DATE_MARKER};

/// Pull the latest repository state, stashing local changes around it.
#[derive(Debug)]
pub struct PullRepository;

impl Task for PullRepository {
    fn name(&self) -> &'static str {
        "Pull repository"
    }

    fn should_run(&self, _ctx: &Context<'_>) -> bool {
        true
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        if ctx.dry_run {
            ctx.log.dry_run("git stash");
            ctx.log.dry_run("git pull --rebase");
            ctx.log.dry_run("git stash apply && git stash clear");
            return Ok(TaskResult::DryRun);
        }

        ctx.log
            .debug(&format!("pulling in {}", ctx.root().display()));
        let report = git::sync(ctx.executor, ctx.root());
        for w in &report.warnings {
            ctx.log.warn(&format!("stash: {w}"));
        }
        if report.stashed {
            ctx.log.debug("local changes were stashed and re-applied");
        }

        let r = report.pull.context("git pull --rebase failed")?;
        let msg = r.stdout.trim();
        ctx.log.debug(&format!("git pull output: {msg}"));
        if msg.contains(UP_TO_DATE_MARKER) {
            ctx.log.info("already up to date");
        } else {
            ctx.log.info("repository updated");
        }
        Ok(TaskResult::Ok)
    }
}
