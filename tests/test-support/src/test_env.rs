#![allow(clippy::unwrap_used)] // Tests use unwrap for simplicity

use anyhow::{Context, Result};
use assert_fs::TempDir;
use assert_fs::prelude::*;

use std::process::Command;

/// A working copy on `main` with a bare `origin` remote, both in a temp dir
pub struct CliTestEnvironment {
    pub repo_dir: assert_fs::fixture::ChildPath,
    pub remote_dir: assert_fs::fixture::ChildPath,
    pub temp_dir: TempDir,
}

impl CliTestEnvironment {
    /// Creates a repository with one commit on `main`, pushed to a bare `origin`
    ///
    /// # Errors
    /// Returns an error if:
    /// - Failed to create temporary directory
    /// - Failed to initialize either repository
    /// - Failed to configure git settings
    /// - Failed to create or push the initial commit
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
        let repo_dir = temp_dir.child("test_repo");
        let remote_dir = temp_dir.child("origin.git");

        repo_dir.create_dir_all()?;
        remote_dir.create_dir_all()?;

        Self::run_git_command(&remote_dir, &["init", "--bare"])?;

        Self::run_git_command(&repo_dir, &["init"])?;
        Self::run_git_command(&repo_dir, &["config", "user.name", "Test User"])?;
        Self::run_git_command(&repo_dir, &["config", "user.email", "test@example.com"])?;

        repo_dir.child("README.md").write_str("# Test Repo")?;
        Self::run_git_command(&repo_dir, &["add", "."])?;
        Self::run_git_command(&repo_dir, &["commit", "-m", "Initial commit"])?;

        // Some git versions default to 'master'
        Self::run_git_command(&repo_dir, &["branch", "-M", "main"])?;

        let remote_path = remote_dir.path().to_string_lossy().to_string();
        Self::run_git_command(&repo_dir, &["remote", "add", "origin", &remote_path])?;
        Self::run_git_command(&repo_dir, &["push", "-u", "origin", "main"])?;

        Ok(Self {
            repo_dir,
            remote_dir,
            temp_dir,
        })
    }

    /// Run a git command in the given directory
    fn run_git_command(dir: &assert_fs::fixture::ChildPath, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir.path())
            .output()
            .context("Failed to execute git command")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Git command failed: {}", stderr);
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run a git command in the working copy and return its stdout
    ///
    /// # Errors
    /// Returns an error if git fails
    pub fn git(&self, args: &[&str]) -> Result<String> {
        Self::run_git_command(&self.repo_dir, args)
    }

    /// Creates a branch at HEAD without switching to it
    ///
    /// # Errors
    /// Returns an error if git fails
    pub fn create_branch(&self, name: &str) -> Result<()> {
        self.git(&["branch", name])?;
        Ok(())
    }

    /// Creates a branch with a commit that `main` does not contain
    ///
    /// # Errors
    /// Returns an error if git fails
    pub fn create_unmerged_branch(&self, name: &str) -> Result<()> {
        self.git(&["checkout", "-b", name])?;
        let file = format!("{}.txt", name.replace('/', "-"));
        self.repo_dir.child(&file).write_str(name)?;
        self.git(&["add", "."])?;
        self.git(&["commit", "-m", &format!("Work on {}", name)])?;
        self.git(&["checkout", "main"])?;
        Ok(())
    }

    /// Creates a branch at HEAD and pushes it to origin
    ///
    /// # Errors
    /// Returns an error if git fails
    pub fn create_remote_branch(&self, name: &str) -> Result<()> {
        self.create_branch(name)?;
        self.git(&["push", "origin", name])?;
        Ok(())
    }

    /// Local branch names, as `git branch` prints them
    ///
    /// # Errors
    /// Returns an error if git fails
    pub fn local_branches(&self) -> Result<Vec<String>> {
        let output = self.git(&["branch", "--format=%(refname:short)"])?;
        Ok(output.lines().map(str::to_string).collect())
    }

    /// Branch names present on the bare origin
    ///
    /// # Errors
    /// Returns an error if git fails
    pub fn origin_branches(&self) -> Result<Vec<String>> {
        let output =
            Self::run_git_command(&self.remote_dir, &["branch", "--format=%(refname:short)"])?;
        Ok(output.lines().map(str::to_string).collect())
    }

    /// Execute a CLI command in the working copy with an isolated user config
    ///
    /// # Errors
    /// Returns an error if the command setup fails
    pub fn run_command(&self, args: &[&str]) -> Result<assert_cmd::Command> {
        let mut cmd = assert_cmd::Command::cargo_bin("branch-killer")
            .context("Failed to find branch-killer binary")?;

        cmd.current_dir(self.repo_dir.path())
            .env(
                "BRANCH_KILLER_CONFIG",
                self.temp_dir.child("user-config.toml").path(),
            )
            .env("NO_COLOR", "1");

        cmd.args(args);
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use predicates::prelude::*;

    #[test]
    fn test_cli_test_environment_creation() -> Result<()> {
        let env = CliTestEnvironment::new()?;

        env.repo_dir.assert(predicate::path::is_dir());
        env.repo_dir.child(".git").assert(predicate::path::exists());
        env.remote_dir.child("HEAD").assert(predicate::path::exists());

        assert_eq!(env.local_branches()?, vec!["main"]);
        assert_eq!(env.origin_branches()?, vec!["main"]);

        Ok(())
    }

    #[test]
    fn test_branch_helpers() -> Result<()> {
        let env = CliTestEnvironment::new()?;

        env.create_branch("feature/a")?;
        env.create_unmerged_branch("feature/b")?;
        env.create_remote_branch("old")?;

        assert_eq!(env.local_branches()?, vec!["feature/a", "feature/b", "main", "old"]);
        assert_eq!(env.origin_branches()?, vec!["main", "old"]);

        Ok(())
    }
}
