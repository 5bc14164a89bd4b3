//! The `dotsync` run: one direction, start to summary.
use anyhow::Result;

use super::{CommandSetup, run_tasks_to_completion};
use crate::cli::GlobalOpts;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Logger;
use crate::mirror::Direction;
use crate::tasks::{self, Context};

const REQUIRED_TOOLS: [&str; 2] = ["git", "rsync"];

/// Run a sync in `direction` against the real system.
///
/// # Errors
///
/// Returns an error if setup fails: no home directory or an invalid
/// `dotsync.toml`. Failed steps are reported in the summary instead.
pub fn run(global: &GlobalOpts, direction: Direction, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    run_with(&setup, global, direction, log, &SystemExecutor)
}

/// Run a sync with a prepared setup and executor.
///
/// # Errors
///
/// Currently infallible once setup has succeeded.
pub fn run_with(
    setup: &CommandSetup,
    global: &GlobalOpts,
    direction: Direction,
    log: &Logger,
    executor: &dyn Executor,
) -> Result<()> {
    let ctx = Context {
        manifest: &setup.manifest,
        platform: setup.platform,
        log,
        executor,
        dry_run: global.dry_run,
        commit_message: global.commit_message(),
    };

    if ctx.dry_run {
        log.info("dry run: commands are printed, not executed");
    }
    log.debug(&format!("direction: {direction}"));
    for tool in REQUIRED_TOOLS {
        if !executor.which(tool) {
            log.warn(&format!("{tool} not found on PATH; steps using it will fail"));
        }
    }

    let tasks = tasks::tasks_for(direction, &setup.manifest);
    run_tasks_to_completion(tasks.iter().map(AsRef::as_ref), &ctx, log)
}
