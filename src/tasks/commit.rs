//! Stage and commit upstream changes.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::git::{self, CommitOutcome};

/// Stage everything and commit it.
#[derive(Debug)]
pub struct CommitChanges;

impl Task for CommitChanges {
    fn name(&self) -> &'static str {
        "Commit changes"
    }

    fn should_run(&self, _ctx: &Context<'_>) -> bool {
        true
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        if ctx.dry_run {
            ctx.log.dry_run("git add .");
            ctx.log
                .dry_run(&format!("git commit -m {:?}", ctx.commit_message));
            return Ok(TaskResult::DryRun);
        }

        git::add_all(ctx.executor, ctx.root()).context("git add failed")?;
        match git::commit(ctx.executor, ctx.root(), &ctx.commit_message)
            .context("git commit failed")?
        {
            CommitOutcome::Committed(r) => {
                if let Some(line) = r.stdout.lines().next() {
                    ctx.log.info(line.trim());
                }
                Ok(TaskResult::Ok)
            }
            CommitOutcome::NothingToCommit => {
                Ok(TaskResult::Skipped("nothing to commit".to_string()))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tasks::test_helpers::Sandbox;

    #[test]
    fn stages_then_commits_with_message() {
        let sb = Sandbox::new(vec![(true, ""), (true, "[main 1a2b3c4] Sync configs")]);
        assert_eq!(CommitChanges.run(&sb.ctx(false)).unwrap(), TaskResult::Ok);
        assert_eq!(sb.exec.calls(), ["git add .", "git commit -m Sync configs"]);
    }

    #[test]
    fn clean_index_is_skipped() {
        let sb = Sandbox::new(vec![(true, ""), (false, "nothing to commit, working tree clean")]);
        assert_eq!(
            CommitChanges.run(&sb.ctx(false)).unwrap(),
            TaskResult::Skipped("nothing to commit".to_string())
        );
    }

    #[test]
    fn failed_add_stops_before_commit() {
        let sb = Sandbox::new(vec![(false, "fatal: pathspec")]);
        assert!(CommitChanges.run(&sb.ctx(false)).is_err());
        assert_eq!(sb.exec.calls(), ["git add ."]);
    }
}
