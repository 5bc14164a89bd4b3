//! Source-control gateway: thin wrappers over the `git` CLI.
//!
//! Every call runs with its working directory set to the repository and
//! `LC_ALL=C`, so the output markers matched here do not depend on the
//! user's locale.
use std::path::Path;

use crate::error::{SyncError, UNSTAGED_MARKER};
use crate::exec::{ExecResult, Executor};

const GIT: &str = "git";
const GIT_ENV: &[(&str, &str)] = &[("LC_ALL", "C")];

/// Printed by `git pull` when there is nothing new upstream.
pub const UP_TO_DATE_MARKER: &str = "Already up to date";

const NO_LOCAL_CHANGES: &str = "No local changes to save";
const NOTHING_TO_COMMIT: &str = "nothing to commit";

/// Branch pushed to on `origin`.
pub const BRANCH: &str = "main";

/// Outcome of [`commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A commit was created.
    Committed(ExecResult),
    /// The index had no changes; no commit was created.
    NothingToCommit,
}

/// Outcome of [`sync`].
#[derive(Debug)]
pub struct SyncReport {
    /// Whether local changes were stashed before the pull.
    pub stashed: bool,
    /// Result of `git pull --rebase`.
    pub pull: Result<ExecResult, SyncError>,
    /// Failures of the stash bookkeeping around the pull.
    pub warnings: Vec<SyncError>,
}

fn ensure_repo(repo: &Path) -> Result<(), SyncError> {
    if repo.is_dir() {
        Ok(())
    } else {
        Err(SyncError::PathMissing {
            path: repo.to_path_buf(),
        })
    }
}

fn git(exec: &dyn Executor, repo: &Path, args: &[&str]) -> Result<ExecResult, SyncError> {
    ensure_repo(repo)?;
    exec.run_in_with_env(repo, GIT, args, GIT_ENV)
}

/// Raw `git status` output, whatever the exit status.
///
/// # Errors
///
/// [`SyncError::PathMissing`] if `repo` does not exist, or
/// [`SyncError::Spawn`] if git cannot be started.
pub fn status_output(exec: &dyn Executor, repo: &Path) -> Result<ExecResult, SyncError> {
    ensure_repo(repo)?;
    exec.run_unchecked_in(repo, GIT, &["status"], GIT_ENV)
}

/// Run `git status` and classify the working tree.
///
/// Untracked files and staged changes do not count as dirty here; only
/// tracked files with unstaged edits do, since a rebasing pull copes with
/// the rest.
///
/// # Errors
///
/// [`SyncError::DirtyTree`] if tracked files have unstaged modifications;
/// otherwise any error from running git.
pub fn status(exec: &dyn Executor, repo: &Path) -> Result<ExecResult, SyncError> {
    let result = git(exec, repo, &["status"])?;
    if result.stdout.contains(UNSTAGED_MARKER) {
        return Err(SyncError::DirtyTree {
            repo: repo.to_path_buf(),
        });
    }
    Ok(result)
}

/// `git pull --rebase`.
///
/// # Errors
///
/// [`SyncError::CommandFailed`] when git refuses, e.g. "Your index contains
/// uncommitted changes".
pub fn pull(exec: &dyn Executor, repo: &Path) -> Result<ExecResult, SyncError> {
    git(exec, repo, &["pull", "--rebase"])
}

/// Stash local changes, pull with rebase, then restore the stash.
///
/// The restore runs even when the pull fails. The stash is only cleared
/// after a successful `git stash apply`, so conflicting changes stay
/// recoverable.
#[must_use]
pub fn sync(exec: &dyn Executor, repo: &Path) -> SyncReport {
    let mut warnings = Vec::new();

    let stashed = match git(exec, repo, &["stash"]) {
        Ok(r) => !r.stdout.contains(NO_LOCAL_CHANGES),
        Err(e) => {
            warnings.push(e);
            false
        }
    };

    let pulled = pull(exec, repo);

    if stashed {
        match git(exec, repo, &["stash", "apply"]) {
            Ok(_) => {
                if let Err(e) = git(exec, repo, &["stash", "clear"]) {
                    warnings.push(e);
                }
            }
            Err(e) => warnings.push(e),
        }
    }

    SyncReport {
        stashed,
        pull: pulled,
        warnings,
    }
}

/// `git add .`
///
/// # Errors
///
/// Any error from running git.
pub fn add_all(exec: &dyn Executor, repo: &Path) -> Result<ExecResult, SyncError> {
    git(exec, repo, &["add", "."])
}

/// `git commit -m <message>`.
///
/// # Errors
///
/// [`SyncError::CommandFailed`] for failures other than an empty index.
pub fn commit(exec: &dyn Executor, repo: &Path, message: &str) -> Result<CommitOutcome, SyncError> {
    ensure_repo(repo)?;
    let args = ["commit", "-m", message];
    let result = exec.run_unchecked_in(repo, GIT, &args, GIT_ENV)?;
    if result.success {
        return Ok(CommitOutcome::Committed(result));
    }
    if result.stdout.contains(NOTHING_TO_COMMIT) {
        return Ok(CommitOutcome::NothingToCommit);
    }
    Err(SyncError::CommandFailed {
        command: crate::exec::command_line(GIT, &args),
        code: result.code,
        stdout: result.stdout,
        stderr: result.stderr,
    })
}

/// `git push -u origin main`.
///
/// # Errors
///
/// Any error from running git.
pub fn push(exec: &dyn Executor, repo: &Path) -> Result<ExecResult, SyncError> {
    git(exec, repo, &["push", "-u", "origin", BRANCH])
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::MockExecutor;

    fn repo() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn status_clean_tree_is_ok() {
        let dir = repo();
        let exec = MockExecutor::with_responses(vec![(
            true,
            "On branch main\nnothing to commit, working tree clean\n",
        )]);
        let out = status(&exec, dir.path()).unwrap();
        assert!(out.stdout.contains("working tree clean"));
        assert_eq!(exec.calls(), ["git status"]);
    }

    #[test]
    fn status_unstaged_change_is_dirty() {
        let dir = repo();
        let exec = MockExecutor::with_responses(vec![(
            true,
            "On branch main\nChanges not staged for commit:\n\tmodified:   README.md\n",
        )]);
        let err = status(&exec, dir.path()).unwrap_err();
        assert!(matches!(err, SyncError::DirtyTree { .. }), "{err:?}");
        assert!(err.to_string().contains(UNSTAGED_MARKER));
    }

    #[test]
    fn status_missing_repo_is_path_missing() {
        let dir = repo();
        let missing = dir.path().join("nope");
        let exec = MockExecutor::new();
        let err = status(&exec, &missing).unwrap_err();
        assert!(matches!(err, SyncError::PathMissing { .. }), "{err:?}");
        assert!(exec.calls().is_empty(), "git must not run");
    }

    #[test]
    fn sync_with_changes_stashes_and_restores() {
        let dir = repo();
        let exec = MockExecutor::with_responses(vec![
            (true, "Saved working directory and index state WIP on main"),
            (true, "Already up to date."),
            (true, ""),
            (true, ""),
        ]);
        let report = sync(&exec, dir.path());
        assert!(report.stashed);
        assert!(report.pull.is_ok());
        assert!(report.warnings.is_empty());
        assert_eq!(exec.calls(), [
            "git stash",
            "git pull --rebase",
            "git stash apply",
            "git stash clear",
        ]);
    }

    #[test]
    fn sync_clean_tree_skips_restore() {
        let dir = repo();
        let exec = MockExecutor::with_responses(vec![
            (true, "No local changes to save"),
            (true, "Already up to date."),
        ]);
        let report = sync(&exec, dir.path());
        assert!(!report.stashed);
        assert_eq!(exec.calls(), ["git stash", "git pull --rebase"]);
    }

    #[test]
    fn sync_restores_after_failed_pull() {
        let dir = repo();
        let exec = MockExecutor::with_responses(vec![
            (true, "Saved working directory"),
            (false, "fatal: couldn't find remote ref"),
            (true, ""),
            (true, ""),
        ]);
        let report = sync(&exec, dir.path());
        assert!(report.pull.is_err());
        assert_eq!(exec.calls().len(), 4, "restore runs after a failed pull");
    }

    #[test]
    fn sync_keeps_stash_when_apply_fails() {
        let dir = repo();
        let exec = MockExecutor::with_responses(vec![
            (true, "Saved working directory"),
            (true, "Already up to date."),
            (false, "CONFLICT"),
        ]);
        let report = sync(&exec, dir.path());
        assert_eq!(report.warnings.len(), 1);
        assert!(
            !exec.calls().iter().any(|c| c == "git stash clear"),
            "stash must not be cleared after a failed apply"
        );
    }

    #[test]
    fn commit_nothing_to_commit() {
        let dir = repo();
        let exec = MockExecutor::with_responses(vec![(
            false,
            "On branch main\nnothing to commit, working tree clean\n",
        )]);
        let outcome = commit(&exec, dir.path(), "Sync configs").unwrap();
        assert_eq!(outcome, CommitOutcome::NothingToCommit);
        assert_eq!(exec.calls(), ["git commit -m Sync configs"]);
    }

    #[test]
    fn commit_other_failure_is_error() {
        let dir = repo();
        let exec = MockExecutor::with_responses(vec![(false, "")]);
        let err = commit(&exec, dir.path(), "msg").unwrap_err();
        assert!(matches!(err, SyncError::CommandFailed { .. }), "{err:?}");
    }

    #[test]
    fn push_targets_origin_main() {
        let dir = repo();
        let exec = MockExecutor::new();
        push(&exec, dir.path()).unwrap();
        add_all(&exec, dir.path()).unwrap();
        assert_eq!(exec.calls(), ["git push -u origin main", "git add ."]);
    }
}
