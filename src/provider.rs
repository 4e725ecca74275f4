//! File list providers
//!
//! The pane never reads repository state itself; it asks a
//! [`FileListProvider`] for the entries of a changeset. Two providers are
//! included for hosts without a repository layer of their own:
//!
//! - **`WorkdirListProvider`**: every file under the repository root
//! - **`ManifestListProvider`**: changesets described in a TOML manifest

use crate::entry::{ChangeKind, Changeset, FileEntry, RepositoryHandle};
use glob::Pattern as GlobPattern;
use ignore::{DirEntry, WalkBuilder};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors a provider can report while listing entries
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider cannot list this changeset
    #[error("Unknown changeset: {0}")]
    UnknownChangeset(String),

    /// Glob pattern failed to parse
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Manifest could not be parsed
    #[error("Invalid manifest {path}: {reason}")]
    InvalidManifest { path: String, reason: String },

    /// Directory walk failed
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Supplies the ordered file entries of a changeset
pub trait FileListProvider {
    /// List the entries of `changeset` in `repository`
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` if the entries cannot be listed.
    fn list_entries(
        &self,
        repository: &RepositoryHandle,
        changeset: &Changeset,
    ) -> Result<Vec<FileEntry>>;
}

/// Lists every file in the working directory as unmodified
///
/// `.git` is always skipped; further patterns can be ignored. Symbolic links
/// are neither followed nor listed. Only [`Changeset::Workdir`] can be listed.
#[derive(Debug, Clone, Default)]
pub struct WorkdirListProvider {
    ignore: Vec<GlobPattern>,
}

impl WorkdirListProvider {
    /// Create a provider ignoring the given glob patterns
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidPattern` if a pattern fails to parse.
    pub fn new<I, S>(ignore: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ignore = ignore
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                GlobPattern::new(p).map_err(|e| ProviderError::InvalidPattern {
                    pattern: p.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { ignore })
    }

    fn walk(&self, root: &Path) -> Result<Vec<FileEntry>> {
        let ignore = self.ignore.clone();
        let base = root.to_path_buf();
        let keep = move |entry: &DirEntry| {
            let Ok(relative) = entry.path().strip_prefix(&base) else {
                return true;
            };
            relative != Path::new(".git") && !ignore.iter().any(|p| p.matches_path(relative))
        };

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(keep)
            .build();

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(root) {
                entries.push(FileEntry::new(relative, ChangeKind::Unmodified));
            }
        }
        Ok(entries)
    }
}

impl FileListProvider for WorkdirListProvider {
    fn list_entries(
        &self,
        repository: &RepositoryHandle,
        changeset: &Changeset,
    ) -> Result<Vec<FileEntry>> {
        if *changeset != Changeset::Workdir {
            return Err(ProviderError::UnknownChangeset(changeset.id().to_string()));
        }
        self.walk(repository.root())
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default, rename = "changeset")]
    changesets: Vec<ManifestChangeset>,
}

#[derive(Debug, Deserialize)]
struct ManifestChangeset {
    id: String,
    #[serde(default)]
    entries: Vec<FileEntry>,
}

/// Lists changesets described in a TOML manifest
///
/// ```toml
/// [[changeset]]
/// id = "workdir"
///
/// [[changeset.entries]]
/// path = "README.md"
/// change = "modified"
/// ```
///
/// The manifest is re-read on every call so edits show up on the next refresh.
/// A manifest path given relative is resolved against the repository root.
/// Entry paths must stay inside the repository: absolute paths and `..`
/// components make the whole manifest invalid.
#[derive(Debug, Clone)]
pub struct ManifestListProvider {
    path: PathBuf,
}

impl ManifestListProvider {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self, repository: &RepositoryHandle) -> Result<Manifest> {
        let path = if self.path.is_absolute() {
            self.path.clone()
        } else {
            repository.root().join(&self.path)
        };
        let raw = fs::read_to_string(&path)?;
        let invalid = |reason: String| ProviderError::InvalidManifest {
            path: path.display().to_string(),
            reason,
        };

        let manifest: Manifest = toml::from_str(&raw).map_err(|e| invalid(e.to_string()))?;
        if let Some(entry) = manifest
            .changesets
            .iter()
            .flat_map(|c| &c.entries)
            .find(|e| !e.is_contained())
        {
            return Err(invalid(format!(
                "entry '{}' lies outside the repository",
                entry.path.display()
            )));
        }
        Ok(manifest)
    }
}

impl FileListProvider for ManifestListProvider {
    fn list_entries(
        &self,
        repository: &RepositoryHandle,
        changeset: &Changeset,
    ) -> Result<Vec<FileEntry>> {
        self.load(repository)?
            .changesets
            .into_iter()
            .find(|c| c.id == changeset.id())
            .map(|c| c.entries)
            .ok_or_else(|| ProviderError::UnknownChangeset(changeset.id().to_string()))
    }
}
