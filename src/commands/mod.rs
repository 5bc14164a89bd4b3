//! Command orchestration: setup shared by both directions and the task loop.
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Manifest;
use crate::logging::Logger;
use crate::paths;
use crate::platform::Platform;
use crate::tasks::{self, Context, Task};

/// Environment variable overriding the repository root.
pub const ROOT_ENV: &str = "DOTSYNC_ROOT";

/// Repository root used when neither `--root` nor `DOTSYNC_ROOT` is set,
/// relative to the home directory.
pub const DEFAULT_ROOT: &str = "dev/configs";

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Detected platform.
    pub platform: Platform,
    /// Home directory all `~` paths were expanded against.
    pub home: PathBuf,
    /// Resolved config table.
    pub manifest: Manifest,
}

impl CommandSetup {
    /// Detect the platform and home directory, then load the config table.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or
    /// `dotsync.toml` is invalid.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let home = paths::home_dir()?;
        Self::with_home(global, &home, log)
    }

    /// [`CommandSetup::init`] with an explicit home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `dotsync.toml` is invalid.
    pub fn with_home(global: &GlobalOpts, home: &Path, log: &Logger) -> Result<Self> {
        let platform = Platform::detect();
        let root = resolve_root(global, home);

        log.stage("Loading configuration");
        log.info(&format!("platform: {platform}"));
        log.info(&format!("repository: {}", root.display()));
        if !root.is_dir() {
            log.warn(&format!("repository root {} does not exist", root.display()));
        }

        let manifest = Manifest::load(&root, home)
            .with_context(|| format!("loading config table for {}", root.display()))?;
        for entry in manifest.entries() {
            log.debug(&format!(
                "{}: {} <-> {}",
                entry.name,
                entry.repository_path.display(),
                entry.installed_path(platform).display()
            ));
        }
        log.info(&format!("loaded {} entries", manifest.entries().len()));

        Ok(Self {
            platform,
            home: home.to_path_buf(),
            manifest,
        })
    }
}

/// Repository root: `--root`, else `$DOTSYNC_ROOT`, else `~/dev/configs`.
#[must_use]
pub fn resolve_root(global: &GlobalOpts, home: &Path) -> PathBuf {
    let env = std::env::var_os(ROOT_ENV).map(PathBuf::from);
    resolve_root_from(global.root.as_deref(), env, home)
}

/// Pure form of [`resolve_root`]; empty values count as unset.
#[must_use]
pub fn resolve_root_from(explicit: Option<&Path>, env: Option<PathBuf>, home: &Path) -> PathBuf {
    if let Some(root) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return root.to_path_buf();
    }
    if let Some(root) = env.filter(|p| !p.as_os_str().is_empty()) {
        return root;
    }
    home.join(DEFAULT_ROOT)
}

/// Execute every task in order and print the summary.
///
/// Failed tasks are reported but never abort the run.
///
/// # Errors
///
/// Currently infallible; the `Result` matches the other command entry points.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context<'_>,
    log: &Logger,
) -> Result<()> {
    for task in tasks {
        tasks::execute(task, ctx);
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        log.warn(&format!("{count} step(s) failed, see messages above"));
    }
    Ok(())
}
