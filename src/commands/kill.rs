use anyhow::Result;

use crate::branch::{BranchClass, DeletionOutcome, ExclusionSet};
use crate::config::{CliOptions, KillerConfig, RunConfig};
use crate::error::{PromptError, RepositoryError};
use crate::executor::execute_all;
use crate::git::GitRepo;
use crate::interrupt::Interrupt;
use crate::logger::Logger;
use crate::selection::{
    RealSelectionProvider, SelectionProvider, confirm_deletion, filter_branches,
    select_interactive,
};
use crate::traits::GitOperations;

/// What happened during one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub local: Vec<DeletionOutcome>,
    pub remote: Vec<DeletionOutcome>,
    /// Set when Ctrl-C stopped the run early
    pub interrupted: bool,
}

impl RunReport {
    #[must_use]
    pub fn outcomes(&self, class: BranchClass) -> &[DeletionOutcome] {
        match class {
            BranchClass::Local => &self.local,
            BranchClass::Remote => &self.remote,
        }
    }

    fn outcomes_mut(&mut self, class: BranchClass) -> &mut Vec<DeletionOutcome> {
        match class {
            BranchClass::Local => &mut self.local,
            BranchClass::Remote => &mut self.remote,
        }
    }
}

/// Cleans up branches of the repository in the current directory
///
/// # Errors
/// Returns an error if:
/// - The current directory is not inside a git repository
/// - The current branch cannot be resolved
/// - The repository's remotes cannot be read
/// - The Ctrl-C handler cannot be installed
pub fn kill_branches(cli: CliOptions) -> Result<RunReport> {
    let current_dir = std::env::current_dir()?;
    let git_repo = GitRepo::open(&current_dir)?;

    let file_config = KillerConfig::load(git_repo.get_repo_path());
    let remotes = git_repo.remote_names()?;
    let config = RunConfig::resolve(&file_config, cli, &remotes);
    let logger = Logger::new(config.verbose);
    let interrupt = Interrupt::install()?;

    logger.banner();

    let report = run(
        &git_repo,
        &RealSelectionProvider,
        &config,
        &logger,
        &interrupt,
    )?;
    Ok(report)
}

/// Configured exclusions plus the branch currently checked out
#[must_use]
pub fn build_exclusion_set(config: &RunConfig, current_branch: Option<&str>) -> ExclusionSet {
    let mut exclusions: ExclusionSet = config.exclude.iter().cloned().collect();
    if let Some(current) = current_branch {
        exclusions.insert(current);
    }
    exclusions
}

/// Runs the local phase, then the remote phase, against `git`
///
/// Per-branch failures, declined prompts and a failed refresh are reported
/// through `logger` and never end the run.
///
/// # Errors
/// Returns an error only if the current branch cannot be resolved
pub fn run<G: GitOperations, P: SelectionProvider>(
    git: &G,
    provider: &P,
    config: &RunConfig,
    logger: &Logger,
    interrupt: &Interrupt,
) -> Result<RunReport, RepositoryError> {
    let current_branch = git.current_branch()?;
    let exclusions = build_exclusion_set(config, current_branch.as_deref());
    logger.progress(&format!("Keeping: {}", exclusions.sorted().join(", ")));

    let mut report = RunReport::default();

    if config.prune {
        logger.progress("Fetching and pruning remote branches...");
        if let Err(e) = git.refresh() {
            logger.warn(&format!(
                "Could not refresh remote branches, listing may be stale: {}",
                e
            ));
        }
    }

    let phases = [
        (BranchClass::Local, config.local),
        (BranchClass::Remote, config.remote),
    ];

    for (class, enabled) in phases {
        if !enabled {
            continue;
        }
        if interrupt.is_triggered() {
            report.interrupted = true;
            break;
        }

        match run_phase(git, provider, class, &exclusions, config, logger, interrupt) {
            Ok(outcomes) => *report.outcomes_mut(class) = outcomes,
            Err(PromptError::Interrupted) => {
                report.interrupted = true;
                break;
            }
            Err(PromptError::Unavailable(reason)) => {
                logger.error(&format!(
                    "Skipping {} branches, prompt failed: {}",
                    class, reason
                ));
            }
        }
    }

    if interrupt.is_triggered() {
        report.interrupted = true;
    }
    if report.interrupted {
        logger.error("Process aborted.");
    }

    Ok(report)
}

fn run_phase<G: GitOperations, P: SelectionProvider>(
    git: &G,
    provider: &P,
    class: BranchClass,
    exclusions: &ExclusionSet,
    config: &RunConfig,
    logger: &Logger,
    interrupt: &Interrupt,
) -> Result<Vec<DeletionOutcome>, PromptError> {
    let branches = match git.list_branches(class) {
        Ok(branches) => branches,
        Err(e) => {
            logger.error(&e.to_string());
            return Ok(Vec::new());
        }
    };

    let candidates = filter_branches(&branches, exclusions);
    if candidates.is_empty() {
        logger.info(&format!("No {} branches to delete.", class));
        return Ok(Vec::new());
    }

    let selected = if config.interactive {
        let selected = select_interactive(provider, class, candidates)?;
        if selected.is_empty() {
            logger.info(&format!("No {} branches were selected.", class));
            return Ok(Vec::new());
        }
        if !confirm_deletion(provider)? {
            logger.info(&format!("No {} branches were deleted.", class));
            return Ok(Vec::new());
        }
        selected
    } else {
        candidates
    };

    let outcomes = execute_all(git, class, &selected, config.force, logger, interrupt);
    log_summary(logger, class, selected.len(), &outcomes);
    Ok(outcomes)
}

fn log_summary(logger: &Logger, class: BranchClass, selected: usize, outcomes: &[DeletionOutcome]) {
    let deleted = outcomes.iter().filter(|o| o.is_deleted()).count();
    let failed = outcomes.len() - deleted;

    if failed == 0 && deleted == selected {
        logger.success(&format!("Deleted {} {} branch(es).", deleted, class));
    } else {
        logger.warn(&format!(
            "Deleted {} of {} {} branch(es), {} failed.",
            deleted, selected, class, failed
        ));
    }
}
