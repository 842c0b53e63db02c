use crate::branch::{BranchClass, DeletionOutcome};
use crate::interrupt::Interrupt;
use crate::logger::Logger;
use crate::traits::GitOperations;

/// Deletes `selected` one at a time, in order, reporting each result as it happens
///
/// A failed deletion is logged and the loop moves on to the next branch.
/// Returns one outcome per attempted branch; that is every branch unless
/// `interrupt` is raised, in which case no further deletion is started.
pub fn execute_all<G: GitOperations>(
    git: &G,
    class: BranchClass,
    selected: &[String],
    force: bool,
    logger: &Logger,
    interrupt: &Interrupt,
) -> Vec<DeletionOutcome> {
    let mut outcomes = Vec::with_capacity(selected.len());

    for branch in selected {
        if interrupt.is_triggered() {
            break;
        }

        logger.progress(&format!("Deleting {} branch {}...", class, branch));

        let outcome = match git.delete_branch(class, branch, force) {
            Ok(()) => {
                logger.progress_success(&format!("{} branch {} deleted.", class.title(), branch));
                DeletionOutcome::Deleted(branch.clone())
            }
            Err(e) => {
                logger.error(&format!(
                    "Failed to delete {} branch {}: {}",
                    class, branch, e
                ));
                DeletionOutcome::Failed {
                    branch: branch.clone(),
                    reason: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}
