use git2::{BranchType, ErrorCode, Oid, Repository};
use std::path::Path;
use std::process::Command;

use crate::branch::{BranchClass, split_tracking_name};
use crate::error::{DeleteError, RefreshError, RepositoryError};
use crate::traits::GitOperations;

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Opens the git repository containing `path`
    ///
    /// # Errors
    /// Returns an error if `path` is not inside a git working copy
    pub fn open(path: &Path) -> Result<Self, RepositoryError> {
        let repo = Repository::discover(path).map_err(|source| RepositoryError::NotARepository {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { repo })
    }

    #[must_use]
    pub fn get_repo_path(&self) -> &Path {
        self.repo.workdir().unwrap_or_else(|| self.repo.path())
    }

    /// Resolves the checked-out branch name
    ///
    /// # Errors
    /// Returns an error if HEAD cannot be read
    pub fn current_branch(&self) -> Result<Option<String>, RepositoryError> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(str::to_string)),
            // Detached HEAD: no branch to protect
            Ok(_) => Ok(None),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // Fresh repository: HEAD names a branch that has no commits yet
                let head = self
                    .repo
                    .find_reference("HEAD")
                    .map_err(RepositoryError::CurrentBranch)?;
                Ok(head
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string))
            }
            Err(e) => Err(RepositoryError::CurrentBranch(e)),
        }
    }

    /// Lists all local branches in the repository
    ///
    /// # Errors
    /// Returns an error if git operations fail
    pub fn list_local_branches(&self) -> Result<Vec<String>, git2::Error> {
        self.branch_names(BranchType::Local)
    }

    /// Lists all remote-tracking branches, skipping symbolic refs like `origin/HEAD`
    ///
    /// # Errors
    /// Returns an error if git operations fail
    pub fn list_remote_branches(&self) -> Result<Vec<String>, git2::Error> {
        self.branch_names(BranchType::Remote)
    }

    /// Names of the configured remotes, e.g. `origin`, `upstream`
    ///
    /// # Errors
    /// Returns an error if the remote list cannot be read
    pub fn remote_names(&self) -> Result<Vec<String>, git2::Error> {
        let remotes = self.repo.remotes()?;
        Ok(remotes.iter().flatten().map(str::to_string).collect())
    }

    fn branch_names(&self, branch_type: BranchType) -> Result<Vec<String>, git2::Error> {
        let branches = self.repo.branches(Some(branch_type))?;
        let mut branch_names = Vec::new();

        for branch_result in branches {
            let (branch, _) = branch_result?;
            if branch.get().symbolic_target().is_some() {
                continue;
            }
            if let Some(name) = branch.name()? {
                branch_names.push(name.to_string());
            }
        }

        branch_names.sort();
        Ok(branch_names)
    }

    /// Deletes a local branch, refusing unmerged ones unless `force` is set
    ///
    /// # Errors
    /// Returns an error if:
    /// - Branch doesn't exist
    /// - Branch is not merged into HEAD or its upstream and `force` is false
    /// - Git operations fail
    pub fn delete_local_branch(&self, branch_name: &str, force: bool) -> Result<(), DeleteError> {
        let mut branch = match self.repo.find_branch(branch_name, BranchType::Local) {
            Ok(branch) => branch,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(DeleteError::NotFound(branch_name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        if !force {
            let tip = branch.get().peel_to_commit()?.id();
            let upstream_tip = branch
                .upstream()
                .ok()
                .and_then(|upstream| upstream.get().peel_to_commit().ok())
                .map(|commit| commit.id());

            if !self.is_merged(tip, upstream_tip)? {
                return Err(DeleteError::Unmerged(branch_name.to_string()));
            }
        }

        branch.delete()?;
        Ok(())
    }

    /// A tip counts as merged when HEAD or the branch's upstream contains it
    fn is_merged(&self, tip: Oid, upstream_tip: Option<Oid>) -> Result<bool, git2::Error> {
        let head_tip = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?.id()),
            Err(e) if e.code() == ErrorCode::UnbornBranch => None,
            Err(e) => return Err(e),
        };

        for base in [head_tip, upstream_tip].into_iter().flatten() {
            if base == tip || self.repo.graph_descendant_of(base, tip)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Deletes `<remote>/<branch>` on the remote via `git push --delete`
    ///
    /// The remote is the longest configured remote name prefixing
    /// `tracking_name`, so `team/fork/feat` goes to remote `team/fork`.
    ///
    /// # Errors
    /// Returns an error if no configured remote prefixes the name, git cannot
    /// be started, or the push is rejected
    pub fn delete_remote_branch(&self, tracking_name: &str) -> Result<(), DeleteError> {
        let remotes = self.remote_names()?;
        let (remote, branch) = split_tracking_name(tracking_name, &remotes)
            .ok_or_else(|| DeleteError::InvalidRemoteName(tracking_name.to_string()))?;

        let output = Command::new("git")
            .args(["push", remote, "--delete", branch])
            .current_dir(self.get_repo_path())
            .output()
            .map_err(DeleteError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DeleteError::Transport(stderr.trim().to_string()));
        }

        Ok(())
    }

    /// Runs `git fetch --all --prune` in the working copy
    ///
    /// # Errors
    /// Returns an error if git cannot be started or the fetch fails
    pub fn fetch_prune(&self) -> Result<(), RefreshError> {
        let output = Command::new("git")
            .args(["fetch", "--all", "--prune"])
            .current_dir(self.get_repo_path())
            .output()
            .map_err(RefreshError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RefreshError::Fetch(stderr.trim().to_string()));
        }

        Ok(())
    }
}

impl GitOperations for GitRepo {
    fn current_branch(&self) -> Result<Option<String>, RepositoryError> {
        self.current_branch()
    }

    fn list_branches(&self, class: BranchClass) -> Result<Vec<String>, RepositoryError> {
        let listed = match class {
            BranchClass::Local => self.list_local_branches(),
            BranchClass::Remote => self.list_remote_branches(),
        };
        listed.map_err(|source| RepositoryError::ListBranches { class, source })
    }

    fn refresh(&self) -> Result<(), RefreshError> {
        self.fetch_prune()
    }

    fn delete_branch(&self, class: BranchClass, name: &str, force: bool) -> Result<(), DeleteError> {
        match class {
            BranchClass::Local => self.delete_local_branch(name, force),
            BranchClass::Remote => self.delete_remote_branch(name),
        }
    }
}
