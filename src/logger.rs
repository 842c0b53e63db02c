//! Console output for a cleanup run.
//!
//! The verbosity flag lives on the [`Logger`] value itself, so whoever builds
//! the logger decides once, before the first line is printed, whether
//! per-branch progress is shown. Summary, warning and error lines always print.

use std::cell::RefCell;

use colored::Colorize;

const BANNER: &str = r"
 ___                  _      _  ___ _ _
| _ )_ _ __ _ _ _  __| |_   | |/ (_) | |___ _ _
| _ \ '_/ _` | ' \/ _| ' \  | ' <| | | / -_) '_|
|___/_| \__,_|_||_\__|_||_| |_|\_\_|_|_\___|_|
";

enum Sink {
    Terminal,
    Memory(RefCell<Vec<String>>),
}

/// Logger with consistent formatting for branch cleanup output
pub struct Logger {
    verbose: bool,
    sink: Sink,
}

impl Logger {
    /// Logger writing to stdout/stderr
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            sink: Sink::Terminal,
        }
    }

    /// Logger that keeps plain, uncoloured lines in memory
    #[must_use]
    pub fn capturing(verbose: bool) -> Self {
        Self {
            verbose,
            sink: Sink::Memory(RefCell::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Lines captured so far; always empty for a terminal logger
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match &self.sink {
            Sink::Terminal => Vec::new(),
            Sink::Memory(lines) => lines.borrow().clone(),
        }
    }

    pub fn banner(&self) {
        if !self.verbose {
            return;
        }
        match &self.sink {
            Sink::Terminal => println!("{}", BANNER.red().bold()),
            Sink::Memory(lines) => lines.borrow_mut().push(BANNER.to_string()),
        }
    }

    /// Per-branch progress, suppressed unless verbose
    pub fn progress(&self, msg: &str) {
        if !self.verbose {
            return;
        }
        self.out(msg, msg.normal());
    }

    /// Per-branch success, suppressed unless verbose
    pub fn progress_success(&self, msg: &str) {
        if !self.verbose {
            return;
        }
        self.out(msg, msg.green());
    }

    pub fn info(&self, msg: &str) {
        self.out(msg, msg.blue());
    }

    pub fn success(&self, msg: &str) {
        self.out(msg, msg.green().bold());
    }

    pub fn warn(&self, msg: &str) {
        self.err(msg, msg.yellow());
    }

    pub fn error(&self, msg: &str) {
        self.err(msg, msg.red());
    }

    fn out(&self, plain: &str, styled: colored::ColoredString) {
        match &self.sink {
            Sink::Terminal => println!("{}", styled),
            Sink::Memory(lines) => lines.borrow_mut().push(plain.to_string()),
        }
    }

    fn err(&self, plain: &str, styled: colored::ColoredString) {
        match &self.sink {
            Sink::Terminal => eprintln!("{}", styled),
            Sink::Memory(lines) => lines.borrow_mut().push(plain.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_logger_drops_progress_only() {
        let logger = Logger::capturing(false);

        logger.banner();
        logger.progress("Deleting local branch feature-a...");
        logger.progress_success("Local branch feature-a deleted.");
        logger.info("No remote branches to delete.");
        logger.error("Failed to delete local branch wip: not fully merged");

        assert_eq!(
            logger.lines(),
            vec![
                "No remote branches to delete.",
                "Failed to delete local branch wip: not fully merged",
            ]
        );
    }

    #[test]
    fn test_verbose_logger_keeps_everything() {
        let logger = Logger::capturing(true);

        logger.banner();
        logger.progress("Deleting local branch feature-a...");
        logger.warn("Could not refresh remote branches");

        let lines = logger.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("___"));
        assert_eq!(lines[1], "Deleting local branch feature-a...");
    }

    #[test]
    fn test_terminal_logger_has_no_captured_lines() {
        let logger = Logger::new(true);
        assert!(logger.is_verbose());
        assert!(logger.lines().is_empty());
    }
}
