//! Configuration for a cleanup run.
//!
//! Defaults come from an optional `.branch-killer.toml` at the repository root,
//! layered over an optional user-level file. Command-line flags are applied on
//! top to build the immutable [`RunConfig`].
//!
//! ```toml
//! remote = "origin"
//! protected = ["main", "develop"]
//! exclude = ["release/current"]
//! prune = true
//! ```
//!
//! Every protected branch is excluded along with its remote-tracking
//! equivalent on every remote (`origin/main`, `upstream/main`). Entries in
//! `exclude` are matched exactly.
//!
//! A config file that cannot be read or parsed prints a warning and counts as
//! empty; it never stops a run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up at the repository root
pub const REPO_CONFIG_FILE: &str = ".branch-killer.toml";

/// Environment variable pointing at the user-level config file
pub const CONFIG_ENV_VAR: &str = "BRANCH_KILLER_CONFIG";

const DEFAULT_REMOTE: &str = "origin";

/// Settings read from a config file; every field is optional so partial
/// files merge with the layer below
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KillerConfig {
    /// Remote whose tracking refs of protected branches are also protected
    #[serde(default)]
    pub remote: Option<String>,

    /// Default branches that are never deleted, locally or remotely
    #[serde(default)]
    pub protected: Option<Vec<String>>,

    /// Extra branch names never offered for deletion
    #[serde(default)]
    pub exclude: Option<Vec<String>>,

    /// Fetch with prune before listing remote branches
    #[serde(default)]
    pub prune: Option<bool>,
}

impl KillerConfig {
    fn default_protected() -> Vec<String> {
        vec!["main".to_string()]
    }

    /// Loads the user-level config and the repository config and layers them
    #[must_use]
    pub fn load(repo_path: &Path) -> Self {
        let user = match Self::user_config_path() {
            Some(path) => Self::load_file(&path),
            None => Self::default(),
        };
        let repo = Self::load_from_repo(repo_path);
        user.overridden_by(repo)
    }

    /// Loads `.branch-killer.toml` from the repository root
    #[must_use]
    pub fn load_from_repo(repo_path: &Path) -> Self {
        Self::load_file(&repo_path.join(REPO_CONFIG_FILE))
    }

    /// `$BRANCH_KILLER_CONFIG`, else `<config dir>/branch-killer/config.toml`
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => dirs::config_dir().map(|dir| dir.join("branch-killer").join("config.toml")),
        }
    }

    fn load_file(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Self::default();
        }

        let content = match fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Warning: Could not read {}:", config_path.display());
                eprintln!("  {}", e);
                eprintln!("  Using default configuration.");
                return Self::default();
            }
        };

        if content.trim().is_empty() {
            return Self::default();
        }

        match toml::from_str::<KillerConfig>(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Invalid TOML in {}:", config_path.display());
                eprintln!("  {}", e);
                eprintln!("  Using default configuration. Please fix the syntax and try again.");
                Self::default()
            }
        }
    }

    /// Field-by-field merge where values set in `other` win
    #[must_use]
    pub fn overridden_by(self, other: Self) -> Self {
        Self {
            remote: other.remote.or(self.remote),
            protected: other.protected.or(self.protected),
            exclude: other.exclude.or(self.exclude),
            prune: other.prune.or(self.prune),
        }
    }

    #[must_use]
    pub fn remote(&self) -> &str {
        self.remote.as_deref().unwrap_or(DEFAULT_REMOTE)
    }

    /// Protected branches, their remote-tracking names and the configured
    /// excludes, without duplicates, in that order.
    ///
    /// Tracking names are produced for the configured remote first, then for
    /// each of `remotes`.
    #[must_use]
    pub fn exclusions(&self, remotes: &[String]) -> Vec<String> {
        let protected = self
            .protected
            .clone()
            .unwrap_or_else(Self::default_protected);

        let mut names = Vec::new();
        for branch in protected {
            let tracking: Vec<String> = std::iter::once(self.remote())
                .chain(remotes.iter().map(String::as_str))
                .map(|remote| format!("{remote}/{branch}"))
                .collect();
            push_unique(&mut names, branch);
            for name in tracking {
                push_unique(&mut names, name);
            }
        }
        for branch in self.exclude.iter().flatten() {
            push_unique(&mut names, branch.clone());
        }
        names
    }
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}

/// Flags collected from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub exclude: Vec<String>,
    pub local: bool,
    pub remote: bool,
    pub interactive: bool,
    pub verbose: bool,
    /// `None` when neither `--prune` nor `--no-prune` was given
    pub prune: Option<bool>,
    pub force: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            local: true,
            remote: true,
            interactive: true,
            verbose: true,
            prune: None,
            force: false,
        }
    }
}

/// Everything one invocation needs, fixed before the first branch is listed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Names excluded up front; the current branch is added at startup
    pub exclude: Vec<String>,
    pub local: bool,
    pub remote: bool,
    pub verbose: bool,
    pub interactive: bool,
    pub prune: bool,
    pub force: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::resolve(&KillerConfig::default(), CliOptions::default(), &[])
    }
}

impl RunConfig {
    /// Applies command-line flags on top of file configuration.
    ///
    /// `--exclude` extends the configured exclusions rather than replacing
    /// them, so protected branches stay protected. `remotes` are the remotes
    /// of the repository, whose tracking refs of protected branches are kept.
    #[must_use]
    pub fn resolve(file: &KillerConfig, cli: CliOptions, remotes: &[String]) -> Self {
        let mut exclude = file.exclusions(remotes);
        for name in cli.exclude {
            push_unique(&mut exclude, name);
        }

        Self {
            exclude,
            local: cli.local,
            remote: cli.remote,
            verbose: cli.verbose,
            interactive: cli.interactive,
            prune: cli.prune.or(file.prune).unwrap_or(false),
            force: cli.force,
        }
    }
}
