// Shared helpers for integration tests.
//
// Builds throwaway git repositories (a bare remote plus a local clone) inside
// a `tempfile::TempDir`. Every git call runs with `LC_ALL=C` so output
// markers are stable.
#![allow(dead_code, clippy::expect_used, clippy::panic)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use dotsync::exec;

/// `true` when every program in `tools` is on `PATH`.
pub fn tools_available(tools: &[&str]) -> bool {
    tools.iter().all(|t| exec::which(t))
}

/// Run git in `dir`, returning the raw output.
pub fn git_output(dir: &Path, args: &[&str]) -> Output {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("LC_ALL", "C")
        .output()
        .expect("spawn git")
}

/// Run git in `dir` and panic unless it succeeds. Returns stdout.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let out = git_output(dir, args);
    assert!(
        out.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

/// Configure identity and disable the user settings that change pull/commit
/// behaviour.
fn configure(repo: &Path) {
    git(repo, &["config", "user.email", "dotsync@example.com"]);
    git(repo, &["config", "user.name", "dotsync tests"]);
    git(repo, &["config", "commit.gpgsign", "false"]);
    git(repo, &["config", "rebase.autoStash", "false"]);
}

/// A bare `origin` and a local repository tracking its `main` branch.
pub struct GitSandbox {
    dir: tempfile::TempDir,
    /// Bare remote repository.
    pub remote: PathBuf,
    /// Working repository with one pushed commit (`README.md`).
    pub local: PathBuf,
    /// Home directory for installed paths.
    pub home: PathBuf,
}

impl GitSandbox {
    /// Build the sandbox, or `None` when git is not installed.
    pub fn new() -> Option<Self> {
        if !tools_available(&["git"]) {
            return None;
        }
        let dir = tempfile::tempdir().expect("create temp dir");
        let remote = dir.path().join("remote.git");
        let local = dir.path().join("configs");
        let home = dir.path().join("home");
        std::fs::create_dir_all(&remote).expect("create remote dir");
        std::fs::create_dir_all(&local).expect("create local dir");
        std::fs::create_dir_all(&home).expect("create home dir");

        git(&remote, &["init", "--bare", "-b", "main"]);
        git(&local, &["init", "-b", "main"]);
        configure(&local);

        std::fs::write(local.join("README.md"), "configs\n").expect("write README");
        git(&local, &["add", "README.md"]);
        git(&local, &["commit", "-m", "init"]);
        let remote_str = remote.to_str().expect("utf-8 temp path");
        git(&local, &["remote", "add", "origin", remote_str]);
        git(&local, &["push", "-u", "origin", "main"]);

        Some(Self {
            dir,
            remote,
            local,
            home,
        })
    }

    /// A second clone of the remote, for producing upstream commits.
    pub fn clone_other(&self) -> PathBuf {
        let other = self.dir.path().join("other");
        let remote_str = self.remote.to_str().expect("utf-8 temp path");
        let other_str = other.to_str().expect("utf-8 temp path");
        git(self.dir.path(), &["clone", remote_str, other_str]);
        configure(&other);
        other
    }

    /// Subjects of the remote's `main` log, newest first.
    pub fn remote_log(&self) -> String {
        git(&self.remote, &["log", "--format=%s", "main"])
    }
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}
