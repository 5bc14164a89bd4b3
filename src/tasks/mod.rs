//! Named sync steps and the lists run for each direction.
pub mod cache;
mod context;
pub mod commit;
pub mod mirror;
pub mod pull;
pub mod push;
pub mod status;

pub use context::Context;

use anyhow::Result;

use crate::config::Manifest;
use crate::logging::TaskStatus;
use crate::mirror::Direction;

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use dotsync::tasks::TaskResult;
///
/// let skipped = TaskResult::Skipped("nothing to commit".into());
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task had nothing to do, or hit a condition that is reported but not fatal.
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// A named, executable step.
pub trait Task: std::fmt::Debug {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task applies to the current machine.
    fn should_run(&self, ctx: &Context<'_>) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if git, rsync or a filesystem operation fails.
    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult>;
}

/// Steps of a downstream run: repository to installed paths.
#[must_use]
pub fn downstream_tasks(manifest: &Manifest) -> Vec<Box<dyn Task>> {
    let mut tasks: Vec<Box<dyn Task>> =
        vec![Box::new(status::CheckStatus), Box::new(pull::PullRepository)];
    tasks.extend(
        manifest
            .entries()
            .iter()
            .map(|e| Box::new(mirror::MirrorEntry::new(e, Direction::Downstream)) as Box<dyn Task>),
    );
    tasks.extend(
        manifest
            .entries()
            .iter()
            .filter_map(cache::CleanCache::for_entry)
            .map(|t| Box::new(t) as Box<dyn Task>),
    );
    tasks
}

/// Steps of an upstream run: installed paths to repository, then publish.
#[must_use]
pub fn upstream_tasks(manifest: &Manifest) -> Vec<Box<dyn Task>> {
    let mut tasks: Vec<Box<dyn Task>> = manifest
        .entries()
        .iter()
        .map(|e| Box::new(mirror::MirrorEntry::new(e, Direction::Upstream)) as Box<dyn Task>)
        .collect();
    tasks.push(Box::new(commit::CommitChanges));
    tasks.push(Box::new(push::PushRepository));
    tasks
}

/// Steps for `direction`.
#[must_use]
pub fn tasks_for(direction: Direction, manifest: &Manifest) -> Vec<Box<dyn Task>> {
    match direction {
        Direction::Downstream => downstream_tasks(manifest),
        Direction::Upstream => upstream_tasks(manifest),
    }
}

/// Execute a task, recording the result in the logger.
pub fn execute(task: &dyn Task, ctx: &Context<'_>) {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return;
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}
