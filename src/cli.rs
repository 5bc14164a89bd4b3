//! Command-line interface.
use std::path::PathBuf;

use clap::Parser;

use crate::mirror::Direction;

const VERSION: &str = match option_env!("DOTSYNC_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Sync tool configs between a dotfiles repository and this machine.
#[derive(Parser, Debug)]
#[command(
    name = "dotsync",
    about = "Sync tool configs between a dotfiles repository and this machine",
    version = VERSION
)]
pub struct Cli {
    /// Copy installed configs into the repository, then commit and push
    #[arg(short = 'u', long)]
    pub upstream: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Options shared by both directions.
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// Direction selected by `--upstream`.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        if self.upstream {
            Direction::Upstream
        } else {
            Direction::Downstream
        }
    }
}

/// Options shared by both directions.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview commands without running them
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Override dotfiles repository root (default: $DOTSYNC_ROOT or ~/dev/configs)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Commit message for upstream runs
    #[arg(short, long)]
    pub message: Option<String>,
}

impl GlobalOpts {
    /// The commit message, defaulting to `Sync configs <UTC date>`.
    #[must_use]
    pub fn commit_message(&self) -> String {
        self.message.clone().unwrap_or_else(default_commit_message)
    }
}

/// `Sync configs YYYY-MM-DD` in UTC.
#[must_use]
pub fn default_commit_message() -> String {
    format!("Sync configs {}", chrono::Utc::now().format("%Y-%m-%d"))
}
