//! Cache directory cleanup after a downstream sync.
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::config::ConfigEntry;

/// Remove a tool's cache directory after its config was replaced.
#[derive(Debug)]
pub struct CleanCache {
    dir: PathBuf,
    name: String,
}

impl CleanCache {
    /// Step for `entry`, or `None` when it declares no cache.
    #[must_use]
    pub fn for_entry(entry: &ConfigEntry) -> Option<Self> {
        entry.cache_dir.as_ref().map(|dir| Self {
            dir: dir.clone(),
            name: format!("Clean {} cache", entry.name),
        })
    }
}

impl Task for CleanCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn should_run(&self, _ctx: &Context<'_>) -> bool {
        self.dir.exists()
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        if ctx.dry_run {
            ctx.log.dry_run(&format!("rm -rf {}", self.dir.display()));
            return Ok(TaskResult::DryRun);
        }

        std::fs::remove_dir_all(&self.dir)
            .with_context(|| format!("removing {}", self.dir.display()))?;
        ctx.log.info(&format!("removed {}", self.dir.display()));
        Ok(TaskResult::Ok)
    }
}
