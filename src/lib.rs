//! # Branch Killer
//!
//! Interactively delete stale local and remote git branches while keeping the
//! default branch and the branch you are on safe.
//!
//! ## Features
//!
//! - **Safe by default** - `main`, `origin/main` and the checked-out branch are never offered
//! - **Checkbox selection** - every candidate starts checked; uncheck what you want to keep
//! - **Two independent phases** - local branches first, then remote ones, each with its own confirmation
//! - **Failure isolation** - one branch that cannot be deleted never blocks the rest of the batch
//! - **Configurable** - protected branches, extra exclusions and pruning via `.branch-killer.toml`
//!
//! ## Quick Start
//!
//! ```bash
//! # Pick local and remote branches to delete
//! branch-killer
//!
//! # Only local branches, keep develop too
//! branch-killer --no-remote -e develop
//!
//! # Delete everything that is not protected, without prompts
//! branch-killer --no-interactive
//! ```
//!
//! ## Module Structure
//!
//! - [`commands`] - The cleanup run and shell completions
//! - [`git`] - Git operations wrapper using git2 and the git binary
//! - [`traits`] - Defines the GitOperations trait for testability
//! - [`selection`] - Branch filtering and interactive prompts
//! - [`executor`] - Sequential branch deletion with per-branch outcomes
//! - [`config`] - Config files and the per-run configuration
//! - [`branch`], [`error`], [`logger`], [`interrupt`] - Shared types and plumbing

pub mod branch;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod git;
pub mod interrupt;
pub mod logger;
pub mod selection;
pub mod traits;

pub use anyhow::Result;
