#![allow(clippy::unwrap_used)] // Tests use unwrap for simplicity

//! End-to-end tests for the branch-killer binary
//!
//! These run the real CLI against temporary repositories with a bare origin.
//! Prompts need a terminal, so every deleting run uses `--no-interactive`.

use anyhow::Result;
use assert_fs::TempDir;
use predicates::prelude::*;

use test_support::CliTestEnvironment;

#[test]
fn test_deletes_local_and_remote_branches_except_protected() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.create_branch("feature-a")?;
    env.create_remote_branch("old")?;

    env.run_command(&["--no-interactive"])?
        .assert()
        .success()
        .stdout(predicate::str::contains("Local branch feature-a deleted."))
        .stdout(predicate::str::contains("Remote branch origin/old deleted."));

    assert_eq!(env.local_branches()?, vec!["main"]);
    assert_eq!(env.origin_branches()?, vec!["main"]);

    Ok(())
}

#[test]
fn test_current_branch_is_kept() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.create_branch("stale")?;
    env.git(&["checkout", "-b", "in-progress"])?;

    env.run_command(&["--no-interactive", "--no-remote"])?
        .assert()
        .success();

    assert_eq!(env.local_branches()?, vec!["in-progress", "main"]);

    Ok(())
}

#[test]
fn test_exclude_extends_defaults() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.create_branch("develop")?;
    env.create_branch("release")?;
    env.create_branch("stale")?;

    env.run_command(&["--no-interactive", "--no-remote", "-e", "develop", "release"])?
        .assert()
        .success();

    assert_eq!(env.local_branches()?, vec!["develop", "main", "release"]);

    Ok(())
}

#[test]
fn test_unmerged_branch_fails_and_batch_continues() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.create_branch("a-merged")?;
    env.create_unmerged_branch("b-wip")?;
    env.create_branch("c-merged")?;

    env.run_command(&["--no-interactive", "--no-remote"])?
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Failed to delete local branch b-wip: branch 'b-wip' is not fully merged",
        ))
        .stderr(predicate::str::contains(
            "Deleted 2 of 3 local branch(es), 1 failed.",
        ));

    assert_eq!(env.local_branches()?, vec!["b-wip", "main"]);

    Ok(())
}

#[test]
fn test_force_deletes_unmerged_branch() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.create_unmerged_branch("wip")?;

    env.run_command(&["--no-interactive", "--no-remote", "--force"])?
        .assert()
        .success();

    assert_eq!(env.local_branches()?, vec!["main"]);

    Ok(())
}

#[test]
fn test_nothing_to_delete() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    env.run_command(&[])?
        .assert()
        .success()
        .stdout(predicate::str::contains("No local branches to delete."))
        .stdout(predicate::str::contains("No remote branches to delete."));

    Ok(())
}

#[test]
fn test_no_verbose_hides_progress_but_keeps_summary() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.create_branch("feature-a")?;

    env.run_command(&["--no-interactive", "--no-remote", "--no-verbose"])?
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleting local branch").not())
        .stdout(predicate::str::contains("Deleted 1 local branch(es)."));

    Ok(())
}

#[test]
fn test_remote_only_leaves_local_branches() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.create_remote_branch("shared")?;

    env.run_command(&["--no-interactive", "--no-local"])?
        .assert()
        .success();

    assert_eq!(env.local_branches()?, vec!["main", "shared"]);
    assert_eq!(env.origin_branches()?, vec!["main"]);

    Ok(())
}

#[test]
fn test_prune_drops_branches_deleted_upstream() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    env.create_remote_branch("gone")?;
    env.create_remote_branch("alive")?;
    std::process::Command::new("git")
        .args(["branch", "-D", "gone"])
        .current_dir(env.remote_dir.path())
        .output()?;

    env.run_command(&["--no-interactive", "--no-local", "--prune"])?
        .assert()
        .success()
        .stdout(predicate::str::contains("Remote branch origin/alive deleted."))
        .stdout(predicate::str::contains("origin/gone").not());

    assert_eq!(env.origin_branches()?, vec!["main"]);

    Ok(())
}

#[test]
fn test_outside_repository_exits_non_zero() -> Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = assert_cmd::Command::cargo_bin("branch-killer")?;
    cmd.current_dir(temp.path())
        .env("GIT_CEILING_DIRECTORIES", temp.path())
        .arg("--no-interactive")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a git repository"));

    Ok(())
}

#[test]
fn test_version_flag() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    env.run_command(&["-v"])?
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    Ok(())
}

#[test]
fn test_completions_flag() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    env.run_command(&["--completions", "bash"])?
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-interactive"));

    Ok(())
}
