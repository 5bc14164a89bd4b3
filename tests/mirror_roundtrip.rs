#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the rsync mirror.
//!
//! Entries are resolved from a `dotsync.toml`-style spec list against a
//! temporary repository and home. Tests return early when rsync is missing.

mod common;

use std::path::{Path, PathBuf};

use common::{tools_available, write_file};
use dotsync::config::Manifest;
use dotsync::config::toml_loader::parse_config;
use dotsync::exec::SystemExecutor;
use dotsync::mirror::{Direction, MirrorPlan, mirror};
use dotsync::platform::Platform;

const TABLE: &str = r#"
[[entry]]
name = "nvim"
directory = true
installed = ["~/.config/nvim"]
repository = "nvim"

[[entry]]
name = "vim"
installed = ["~/deep/nested/.vimrc"]
repository = "vim/.vimrc"
"#;

struct Fixture {
    _dir: tempfile::TempDir,
    root: PathBuf,
    home: PathBuf,
    manifest: Manifest,
}

fn fixture() -> Option<Fixture> {
    if !tools_available(&["rsync"]) {
        return None;
    }
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("configs");
    let home = dir.path().join("home");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::create_dir_all(&home).unwrap();
    let specs = parse_config(TABLE, Path::new("dotsync.toml")).unwrap().entries;
    let manifest = Manifest::from_specs(&root, &home, specs).unwrap();
    Some(Fixture {
        _dir: dir,
        root,
        home,
        manifest,
    })
}

fn sync(f: &Fixture, name: &str, direction: Direction) {
    let entry = f.manifest.get(name).unwrap();
    let plan = MirrorPlan::new(entry, Platform::Linux, direction);
    mirror(&SystemExecutor, &plan).unwrap();
}

#[test]
fn directory_round_trip_is_byte_identical() {
    let Some(f) = fixture() else { return };
    let init = "require('keys')\n";
    let keys = "vim.keymap.set('n', '<leader>w', ':w<cr>')\n";
    write_file(&f.root.join("nvim").join("init.lua"), init);
    write_file(&f.root.join("nvim").join("lua").join("keys.lua"), keys);

    sync(&f, "nvim", Direction::Downstream);
    let installed = f.home.join(".config").join("nvim");
    assert_eq!(std::fs::read(installed.join("init.lua")).unwrap(), init.as_bytes());
    // contents land in the target itself, not in a nested nvim/ directory
    assert!(!installed.join("nvim").exists());

    std::fs::remove_dir_all(f.root.join("nvim")).unwrap();
    sync(&f, "nvim", Direction::Upstream);
    assert_eq!(
        std::fs::read(f.root.join("nvim").join("lua").join("keys.lua")).unwrap(),
        keys.as_bytes()
    );
}

#[test]
fn upstream_copies_local_edits_back() {
    let Some(f) = fixture() else { return };
    write_file(&f.root.join("nvim").join("init.lua"), "old\n");
    sync(&f, "nvim", Direction::Downstream);

    write_file(&f.home.join(".config").join("nvim").join("init.lua"), "new\n");
    sync(&f, "nvim", Direction::Upstream);
    assert_eq!(
        std::fs::read_to_string(f.root.join("nvim").join("init.lua")).unwrap(),
        "new\n"
    );
}

#[test]
fn git_metadata_is_excluded() {
    let Some(f) = fixture() else { return };
    write_file(&f.root.join("nvim").join("init.lua"), "x\n");
    write_file(&f.root.join("nvim").join(".git").join("HEAD"), "ref: refs/heads/main\n");
    sync(&f, "nvim", Direction::Downstream);
    let installed = f.home.join(".config").join("nvim");
    assert!(installed.join("init.lua").exists());
    assert!(!installed.join(".git").exists());
}

#[test]
fn single_file_gets_missing_parent_created() {
    let Some(f) = fixture() else { return };
    write_file(&f.root.join("vim").join(".vimrc"), "set number\n");
    sync(&f, "vim", Direction::Downstream);
    let installed = f.home.join("deep").join("nested").join(".vimrc");
    assert_eq!(std::fs::read_to_string(installed).unwrap(), "set number\n");
}

#[test]
fn missing_source_fails_without_touching_destination() {
    let Some(f) = fixture() else { return };
    let entry = f.manifest.get("nvim").unwrap();
    let plan = MirrorPlan::new(entry, Platform::Linux, Direction::Upstream);
    assert!(mirror(&SystemExecutor, &plan).is_err());
    assert!(!f.root.join("nvim").exists());
}
