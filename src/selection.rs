use inquire::{Confirm, InquireError, MultiSelect};
use std::cell::RefCell;

use crate::branch::{BranchClass, ExclusionSet};
use crate::error::PromptError;

/// Trait for providing interactive selection functionality
/// This allows us to abstract away the interactive prompts for testing
pub trait SelectionProvider {
    /// Present a checkbox list with every option pre-checked and return the
    /// options left checked, in their original order
    ///
    /// # Errors
    /// Returns an error if the prompt cannot be shown or is interrupted
    fn select_many(&self, prompt: &str, options: Vec<String>) -> Result<Vec<String>, PromptError>;

    /// Ask a yes/no question
    ///
    /// # Errors
    /// Returns an error if the prompt cannot be shown or is interrupted
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError>;
}

/// Real implementation using inquire for production use
pub struct RealSelectionProvider;

impl SelectionProvider for RealSelectionProvider {
    fn select_many(&self, prompt: &str, options: Vec<String>) -> Result<Vec<String>, PromptError> {
        let all: Vec<usize> = (0..options.len()).collect();
        let selection = MultiSelect::new(prompt, options)
            .with_default(&all)
            .with_page_size(10)
            .with_vim_mode(true)
            .prompt();

        match selection {
            Ok(selected) => Ok(selected),
            // Esc backs out of the prompt without picking anything
            Err(InquireError::OperationCanceled) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        match Confirm::new(prompt).with_default(default).prompt() {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Mock implementation for testing that answers prompts from a script
///
/// Every option is kept except the ones listed in `deselect`, and every
/// confirmation is answered with `confirm`. Prompts are recorded so tests can
/// check whether they were shown at all.
pub struct MockSelectionProvider {
    pub deselect: Vec<String>,
    pub confirm: bool,
    prompts: RefCell<Vec<String>>,
}

impl MockSelectionProvider {
    #[must_use]
    pub fn new(confirm: bool) -> Self {
        Self {
            deselect: Vec::new(),
            confirm,
            prompts: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn deselecting(mut self, branches: &[&str]) -> Self {
        self.deselect = branches.iter().map(|b| (*b).to_string()).collect();
        self
    }

    /// Every prompt message shown so far
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl SelectionProvider for MockSelectionProvider {
    fn select_many(&self, prompt: &str, options: Vec<String>) -> Result<Vec<String>, PromptError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(options
            .into_iter()
            .filter(|option| !self.deselect.contains(option))
            .collect())
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool, PromptError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.confirm)
    }
}

/// Keeps the branches not named in `exclude`, in their original order
#[must_use]
pub fn filter_branches(all: &[String], exclude: &ExclusionSet) -> Vec<String> {
    all.iter()
        .filter(|branch| !exclude.contains(branch))
        .cloned()
        .collect()
}

/// Lets the user uncheck branches they want to keep
///
/// # Errors
/// Returns an error if the prompt cannot be shown or is interrupted
pub fn select_interactive<P: SelectionProvider>(
    provider: &P,
    class: BranchClass,
    candidates: Vec<String>,
) -> Result<Vec<String>, PromptError> {
    provider.select_many(
        &format!("Which {} branches do you want to delete?", class),
        candidates,
    )
}

/// Final yes/no gate before deleting, defaulting to no
///
/// # Errors
/// Returns an error if the prompt cannot be shown or is interrupted
pub fn confirm_deletion<P: SelectionProvider>(provider: &P) -> Result<bool, PromptError> {
    provider.confirm("Are you sure?", false)
}
