//! Config sync engine.
//!
//! Moves a fixed set of tool configurations (alacritty, ghostty, nvim, vim,
//! zellij) between a git-tracked dotfiles repository and their installed
//! locations. Copying is delegated to `rsync` and repository sync to `git`.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: the table of managed entries, optionally read from `dotsync.toml`
//! - **[`git`]** and **[`mirror`]**: subprocess wrappers over `git` and `rsync`
//! - **[`tasks`]**: named steps run for each direction
//! - **[`commands`]**: setup and the downstream/upstream driver
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod git;
pub mod logging;
pub mod mirror;
pub mod paths;
/// Host platform detection.
pub mod platform;
pub mod tasks;
