//! Changeview CLI application entry point
//!
//! Binds a repository on disk into a [`PaneCoordinator`] and drives it from the
//! command line.
//!
//! # Usage
//!
//! ```bash
//! # List the working directory, flat or grouped by change kind
//! changeview list
//! changeview list ~/src/project --by status
//!
//! # Take changesets from a manifest
//! changeview list --manifest changes.toml --changeset abc123
//!
//! # Preview one entry; non-text documents can go to the system opener
//! changeview show README.md
//! changeview show assets/logo.png --open
//! ```
//!
//! # Configuration
//!
//! Preview limits, extra text extensions and list defaults are read from the
//! user's config directory (`~/.config/changeview/config.toml` on Linux).
//! Set `RUST_LOG` or pass `--verbose` to see coordinator decisions on stderr.

use changeview::{
    ChangeviewError, FileListProvider, FsContentResolver, ListStatus, ListView,
    ManifestListProvider, PaneCoordinator, PreviewStatus, RepositoryHandle, WorkdirListProvider,
    cli::{Cli, Commands, RepoArgs, entry_path},
    config::PaneConfig,
    terminal::{OpenerSurface, TerminalTextSurface},
};
use colored::Colorize;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type Result<T> = std::result::Result<T, ChangeviewError>;

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the
/// default is `warn`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "changeview=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Build the file list provider for `args`
///
/// # Errors
///
/// Returns `ChangeviewError` if an ignore pattern fails to parse.
fn build_provider(args: &RepoArgs, config: &PaneConfig) -> Result<Box<dyn FileListProvider>> {
    Ok(match &args.manifest {
        Some(manifest) => Box::new(ManifestListProvider::new(manifest)),
        None => Box::new(WorkdirListProvider::new(&config.list.ignore)?),
    })
}

/// Build a coordinator bound to the repository in `args`
///
/// # Errors
///
/// Returns `ChangeviewError` if the repository root does not exist or the
/// provider cannot be built.
fn bind_pane(
    args: &RepoArgs,
    config: &PaneConfig,
    text: TerminalTextSurface,
    generic: OpenerSurface,
) -> Result<PaneCoordinator> {
    let root = args.root().canonicalize().map_err(|e| {
        ChangeviewError::InvalidInput(format!(
            "Cannot access repository '{}': {e}",
            args.root().display()
        ))
    })?;

    let mut pane = PaneCoordinator::new(
        build_provider(args, config)?,
        Box::new(text),
        Box::new(generic),
        Box::new(FsContentResolver::new(config.preview.clone())),
    )
    .with_classifier(config.classifier())
    .with_list_view(config.list.default_view)
    .with_changeset(args.changeset());

    pane.bind(RepositoryHandle::new(root));
    Ok(pane)
}

/// Handle the list command - print the changeset's entries
///
/// # Errors
///
/// Returns `ChangeviewError` if the pane cannot be bound.
fn handle_list_command(
    args: &RepoArgs,
    view: Option<ListView>,
    config: &PaneConfig,
) -> Result<()> {
    let text = TerminalTextSurface::new(&config.preview);
    let mut pane = bind_pane(args, config, text, OpenerSurface::new(false))?;
    if let Some(view) = view {
        pane.set_list_view(view);
    }

    let name = pane
        .repository()
        .map(|r| r.name().to_string())
        .unwrap_or_default();
    println!(
        "{} {} ({})",
        "==>".blue().bold(),
        name.bold(),
        pane.changeset()
    );

    if pane.list_status() == ListStatus::Empty {
        println!("No entries in changeset '{}'.", pane.changeset());
        return Ok(());
    }

    let styles = pane.style_map();
    for group in pane.groups() {
        if let Some(change) = group.change {
            let badge = styles.change(change);
            println!("\n{} ({})", badge.label.yellow().bold(), group.entries.len());
        }
        for entry in group.entries {
            let change = styles.change(entry.change);
            let kind = styles.classification(pane.classifier().classify(&entry.name()));
            println!(
                "  {} {} {}",
                change.icon.green(),
                kind.icon.dimmed(),
                entry.path.display()
            );
        }
    }
    Ok(())
}

/// Handle the show command - preview one entry
///
/// # Errors
///
/// Returns `ChangeviewError` if the entry is not part of the changeset or its
/// content is unavailable.
fn handle_show_command(
    args: &RepoArgs,
    path: &Path,
    open: bool,
    config: &PaneConfig,
    no_color: bool,
) -> Result<()> {
    let path = entry_path(path);
    let mut text = TerminalTextSurface::new(&config.preview).with_file_name(&path);
    if no_color {
        text = text.plain();
    }
    let mut pane = bind_pane(args, config, text, OpenerSurface::new(open))?;

    if pane.select(Some(&path)).is_none() {
        return Err(ChangeviewError::InvalidInput(format!(
            "'{}' is not part of changeset '{}'",
            path.display(),
            pane.changeset()
        )));
    }

    match pane.preview_status() {
        PreviewStatus::Unavailable(e) => Err(e.clone().into()),
        _ => Ok(()),
    }
}

/// Main entry point for the changeview application
///
/// # Errors
///
/// Returns `ChangeviewError` if configuration loading fails or the command
/// handler returns an error.
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = PaneConfig::load()?;

    match &cli.command {
        Commands::List { repo_args, by } => {
            handle_list_command(repo_args, *by, &config)?;
        }
        Commands::Show {
            path,
            repo_args,
            open,
        } => {
            handle_show_command(repo_args, path, *open, &config, cli.no_color)?;
        }
    }

    Ok(())
}
