//! Command-line interface definitions and parsing
//!
//! The `changeview` binary drives a [`PaneCoordinator`](crate::PaneCoordinator)
//! against a repository on disk.
//!
//! # Commands
//!
//! - **list**: print the entries of a changeset, by path or grouped by status
//! - **show**: select one entry and preview it in the terminal
//!
//! Without a manifest the working directory is listed as-is; `--manifest`
//! reads changesets (and their change kinds) from a TOML file instead.

use crate::entry::Changeset;
use crate::listing::ListView;
use clap::{Parser, Subcommand};
use std::path::{Component, Path, PathBuf};

/// Shared arguments for commands that read a repository
#[derive(Parser, Debug, Clone)]
pub struct RepoArgs {
    /// Repository root (defaults to the current directory)
    #[arg(value_name = "REPO")]
    pub repo: Option<PathBuf>,

    /// TOML manifest describing changesets (relative paths resolve against REPO)
    #[arg(short = 'm', long = "manifest", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Changeset to browse: `workdir` or a commit id
    #[arg(short = 'c', long = "changeset", value_name = "ID", default_value = "workdir")]
    pub changeset: String,
}

impl RepoArgs {
    /// Repository root to bind
    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.repo.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    #[must_use]
    pub fn changeset(&self) -> Changeset {
        Changeset::from_id(&self.changeset)
    }
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "changeview")]
#[command(about = "Browse the files of a repository changeset", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log coordinator decisions to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Disable colored output and syntax highlighting
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the entries of a changeset
    #[command(visible_alias = "l")]
    List {
        #[command(flatten)]
        repo_args: RepoArgs,

        /// Layout of the list (overrides config)
        #[arg(short = 'b', long = "by", value_name = "VIEW")]
        by: Option<ListView>,
    },

    /// Preview one entry of a changeset
    #[command(visible_alias = "s")]
    Show {
        /// Entry to preview, relative to the repository root
        #[arg(value_name = "PATH")]
        path: PathBuf,

        #[command(flatten)]
        repo_args: RepoArgs,

        /// Hand non-text documents to the system opener
        #[arg(short = 'o', long = "open")]
        open: bool,
    },
}

impl Commands {
    #[must_use]
    pub const fn repo_args(&self) -> &RepoArgs {
        match self {
            Self::List { repo_args, .. } | Self::Show { repo_args, .. } => repo_args,
        }
    }
}

/// Entry path as listed by a provider, with `.` components removed
///
/// `./src/main.rs` and `src/./main.rs` both select `src/main.rs`.
#[must_use]
pub fn entry_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
