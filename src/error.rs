//! Error taxonomy for a cleanup run.
//!
//! Only [`RepositoryError`] is fatal to a run. Everything else is reported and
//! the run moves on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::branch::BranchClass;

/// The working copy or its checked-out branch could not be resolved
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not a git repository (or any parent directory): {}", path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
    #[error("Failed to resolve the current branch: {0}")]
    CurrentBranch(#[source] git2::Error),
    #[error("Failed to list {class} branches: {source}")]
    ListBranches {
        class: BranchClass,
        #[source]
        source: git2::Error,
    },
}

/// Synchronising remote-tracking refs failed
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("failed to run git: {0}")]
    Spawn(#[source] io::Error),
    #[error("git fetch failed: {0}")]
    Fetch(String),
}

/// A single branch could not be deleted
#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("branch '{0}' is not fully merged (use --force to delete it anyway)")]
    Unmerged(String),
    #[error("branch '{0}' not found")]
    NotFound(String),
    #[error("'{0}' is not a remote-tracking branch name")]
    InvalidRemoteName(String),
    #[error(transparent)]
    Git(#[from] git2::Error),
    #[error("failed to run git: {0}")]
    Spawn(#[source] io::Error),
    #[error("{0}")]
    Transport(String),
}

/// An interactive prompt did not produce an answer
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("interrupted")]
    Interrupted,
    #[error("prompt unavailable: {0}")]
    Unavailable(String),
}

impl From<inquire::InquireError> for PromptError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationInterrupted => PromptError::Interrupted,
            other => PromptError::Unavailable(other.to_string()),
        }
    }
}
