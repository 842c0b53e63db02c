use clap::{ArgAction, CommandFactory, Parser};
use std::process::ExitCode;

use branch_killer::commands::completions::{self, Shell};
use branch_killer::commands::kill;
use branch_killer::config::CliOptions;

/// Exit code used when Ctrl-C ends the run
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser)]
#[command(name = "branch-killer")]
#[command(about = "Interactively delete local and remote git branches")]
#[command(version, disable_version_flag = true)]
pub struct Cli {
    /// Extra branch names to keep, matched exactly (adds to main, origin/main and the current branch)
    #[arg(short, long, num_args = 1.., value_name = "BRANCHES")]
    exclude: Vec<String>,

    /// Process local branches (default)
    #[arg(short, long, overrides_with = "no_local")]
    local: bool,
    /// Skip local branches
    #[arg(long, overrides_with = "local")]
    no_local: bool,

    /// Process remote branches (default)
    #[arg(short, long, overrides_with = "no_remote")]
    remote: bool,
    /// Skip remote branches
    #[arg(long, overrides_with = "remote")]
    no_remote: bool,

    /// Ask which branches to delete and confirm before deleting (default)
    #[arg(short, long, overrides_with = "no_interactive")]
    interactive: bool,
    /// Delete every branch that is not excluded, without asking
    #[arg(long, overrides_with = "interactive")]
    no_interactive: bool,

    /// Print a line for every branch (default)
    #[arg(short = 'V', long, overrides_with = "no_verbose")]
    verbose: bool,
    /// Only print summaries and errors
    #[arg(long, overrides_with = "verbose")]
    no_verbose: bool,

    /// Fetch and prune remote-tracking branches before listing
    #[arg(short, long, overrides_with = "no_prune")]
    prune: bool,
    /// Do not fetch before listing, even if the config enables it
    #[arg(long, overrides_with = "prune")]
    no_prune: bool,

    /// Delete local branches even if they are not fully merged
    #[arg(short, long)]
    force: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: (),
}

impl Cli {
    fn options(&self) -> CliOptions {
        let prune = if self.prune {
            Some(true)
        } else if self.no_prune {
            Some(false)
        } else {
            None
        };

        // Each pair overrides itself, so at most one side is set
        CliOptions {
            exclude: self.exclude.clone(),
            local: self.local || !self.no_local,
            remote: self.remote || !self.no_remote,
            interactive: self.interactive || !self.no_interactive,
            verbose: self.verbose || !self.no_verbose,
            prune,
            force: self.force,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        completions::generate_completions(shell, &mut cmd);
        return ExitCode::SUCCESS;
    }

    match kill::kill_branches(cli.options()) {
        Ok(report) if report.interrupted => ExitCode::from(EXIT_INTERRUPTED),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
