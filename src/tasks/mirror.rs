//! Per-entry mirror step.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::config::ConfigEntry;
use crate::mirror::{self, Direction, MirrorPlan};

/// Copy one entry between the repository and its installed path.
#[derive(Debug)]
pub struct MirrorEntry {
    entry: ConfigEntry,
    direction: Direction,
    name: String,
}

impl MirrorEntry {
    /// Step mirroring `entry` in `direction`.
    #[must_use]
    pub fn new(entry: &ConfigEntry, direction: Direction) -> Self {
        Self {
            name: format!("Mirror {}", entry.name),
            entry: entry.clone(),
            direction,
        }
    }
}

impl Task for MirrorEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn should_run(&self, _ctx: &Context<'_>) -> bool {
        true
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let plan = MirrorPlan::new(&self.entry, ctx.platform, self.direction);
        if ctx.dry_run {
            ctx.log.dry_run(&plan.command_line());
            return Ok(TaskResult::DryRun);
        }

        ctx.log.debug(&plan.command_line());
        let r = mirror::mirror(ctx.executor, &plan)
            .with_context(|| format!("{} {} failed", self.direction, self.entry.name))?;
        let output = r.combined();
        if !output.trim().is_empty() {
            ctx.log.debug(output.trim());
        }
        ctx.log.info(&format!(
            "{} -> {}",
            plan.source.display(),
            plan.destination.display()
        ));
        Ok(TaskResult::Ok)
    }
}
