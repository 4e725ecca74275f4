//! Changeview - file list and preview coordination for repository browsers
//!
//! This library keeps a repository file list, its selection and a two-surface
//! preview pane consistent while the user browses a changeset: text files go
//! to a text surface, everything else to a generic document surface, and
//! refreshes preserve the selection by path.

use thiserror::Error;

pub mod classify;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod entry;
pub mod listing;
pub mod preview;
pub mod provider;
pub mod style;
pub mod terminal;

#[cfg(test)]
pub mod testing;

pub use classify::{Classification, Classifier, classify};
pub use coordinator::{ListStatus, PaneCoordinator};
pub use entry::{ChangeKind, Changeset, FileEntry, RepositoryHandle};
pub use listing::{EntryGroup, ListView, group_entries};
pub use preview::{
    ContentReference, ContentResolver, ContentSource, FsContentResolver, GenericSurface,
    PreviewError, PreviewMode, PreviewStatus, Resolution, TextSurface, Ticket,
};
pub use provider::{FileListProvider, ManifestListProvider, ProviderError, WorkdirListProvider};

/// Error enum, contains all failure states of the command-line host
#[derive(Debug, Error)]
pub enum ChangeviewError {
    /// File list could not be built
    #[error("Provider error: {0}")]
    ProviderError(#[from] provider::ProviderError),
    /// Selected entry has no previewable content
    #[error("Preview error: {0}")]
    PreviewError(#[from] preview::PreviewError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
