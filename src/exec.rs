//! External process execution.
use std::path::Path;
use std::process::{Command, Output};

use crate::error::SyncError;

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

impl ExecResult {
    /// Standard output followed by standard error, for diagnostics.
    #[must_use]
    pub fn combined(&self) -> String {
        match (self.stdout.trim(), self.stderr.trim()) {
            (out, "") => out.to_string(),
            ("", err) => err.to_string(),
            (out, err) => format!("{out}\n{err}"),
        }
    }
}

/// Render `program args...` for messages.
#[must_use]
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Abstraction over process execution so git and rsync calls can be mocked.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run a command in `dir`. Fails if the command exits non-zero.
    ///
    /// # Errors
    ///
    /// [`SyncError::Spawn`] if the program cannot be started,
    /// [`SyncError::CommandFailed`] on a non-zero exit.
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult, SyncError> {
        self.run_in_with_env(dir, program, args, &[])
    }

    /// Run a command in `dir` with extra environment variables.
    ///
    /// # Errors
    ///
    /// [`SyncError::Spawn`] if the program cannot be started,
    /// [`SyncError::CommandFailed`] on a non-zero exit.
    fn run_in_with_env(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<ExecResult, SyncError>;

    /// Run a command in `dir`, returning the result whatever the exit status.
    ///
    /// # Errors
    ///
    /// [`SyncError::Spawn`] if the program cannot be started.
    fn run_unchecked_in(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<ExecResult, SyncError>;

    /// Check if a program is available on PATH.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl SystemExecutor {
    fn output(
        dir: &Path,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<ExecResult, SyncError> {
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(dir);
        for (k, v) in env {
            cmd.env(k, v);
        }
        let output = cmd.output().map_err(|source| SyncError::Spawn {
            program: program.to_string(),
            source,
        })?;
        Ok(ExecResult::from(output))
    }
}

impl Executor for SystemExecutor {
    fn run_in_with_env(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<ExecResult, SyncError> {
        let result = Self::output(dir, program, args, env)?;
        if !result.success {
            return Err(SyncError::CommandFailed {
                command: command_line(program, args),
                code: result.code,
                stdout: result.stdout,
                stderr: result.stderr,
            });
        }
        Ok(result)
    }

    fn run_unchecked_in(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<ExecResult, SyncError> {
        Self::output(dir, program, args, env)
    }

    fn which(&self, program: &str) -> bool {
        which(program)
    }
}

/// Check if a program is available on PATH.
#[must_use]
pub fn which(program: &str) -> bool {
    which::which(program).is_ok()
}
