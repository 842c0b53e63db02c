//! Core branch types shared by the gateway, selector and executor.

use std::collections::HashSet;
use std::fmt;

/// Which kind of branch a phase operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchClass {
    Local,
    Remote,
}

impl BranchClass {
    /// Lowercase label used in prompts and log lines ("local", "remote")
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BranchClass::Local => "local",
            BranchClass::Remote => "remote",
        }
    }

    /// Capitalised label for the start of a sentence
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            BranchClass::Local => "Local",
            BranchClass::Remote => "Remote",
        }
    }
}

impl fmt::Display for BranchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Splits a remote-tracking name such as `team/fork/feature/login` into the
/// remote alias and the branch name as known on that remote.
///
/// Remote names may contain `/`, so the longest entry of `remotes` that
/// prefixes `name` wins. Returns `None` when no remote matches or the branch
/// part would be empty.
#[must_use]
pub fn split_tracking_name<'a>(
    name: &'a str,
    remotes: &[String],
) -> Option<(&'a str, &'a str)> {
    remotes
        .iter()
        .filter_map(|remote| {
            let branch = name.strip_prefix(remote.as_str())?.strip_prefix('/')?;
            (!remote.is_empty() && !branch.is_empty()).then(|| (&name[..remote.len()], branch))
        })
        .max_by_key(|(remote, _)| remote.len())
}

/// Branch names that must never be offered for deletion.
///
/// Matching is exact: no globbing, no prefix handling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Sorted copy of the names, for display
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for ExclusionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

/// Result of attempting to delete a single branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    Deleted(String),
    Failed { branch: String, reason: String },
}

impl DeletionOutcome {
    #[must_use]
    pub fn branch(&self) -> &str {
        match self {
            DeletionOutcome::Deleted(branch) | DeletionOutcome::Failed { branch, .. } => branch,
        }
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeletionOutcome::Deleted(_))
    }
}
