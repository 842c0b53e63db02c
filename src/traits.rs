use crate::branch::BranchClass;
use crate::error::{DeleteError, RefreshError, RepositoryError};

/// Trait for Git operations to enable mocking in tests
pub trait GitOperations {
    /// Name of the checked-out branch, or `None` on a detached HEAD
    ///
    /// # Errors
    /// Returns an error if HEAD cannot be read
    fn current_branch(&self) -> Result<Option<String>, RepositoryError>;

    /// All branches of `class` known to the local repository, without network access
    ///
    /// # Errors
    /// Returns an error if the references cannot be enumerated
    fn list_branches(&self, class: BranchClass) -> Result<Vec<String>, RepositoryError>;

    /// Fetches from every remote and prunes stale remote-tracking refs
    ///
    /// # Errors
    /// Returns an error if the fetch cannot be run or fails
    fn refresh(&self) -> Result<(), RefreshError>;

    /// Deletes one branch, locally or on its remote
    ///
    /// # Errors
    /// Returns an error if the branch is unmerged (local, without `force`),
    /// missing, or the remote rejects the push
    fn delete_branch(&self, class: BranchClass, name: &str, force: bool)
    -> Result<(), DeleteError>;
}
