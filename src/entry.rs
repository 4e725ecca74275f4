//! Repository-side data model
//!
//! File entries, change kinds, changesets and the repository handle the
//! hosting application binds into the pane.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// How a file differs in the changeset being browsed
///
/// Declaration order is the order used when grouping entries by status.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Staged and unstaged edits on the same file
    Mixed,
    /// Unresolved merge conflict
    Conflicted,
    Added,
    Modified,
    Renamed,
    Deleted,
    /// Present on disk but unknown to the repository
    Untracked,
    /// Tracked and unchanged
    #[default]
    Unmodified,
}

impl ChangeKind {
    /// Every change kind, in grouping order
    pub const ALL: [Self; 8] = [
        Self::Mixed,
        Self::Conflicted,
        Self::Added,
        Self::Modified,
        Self::Renamed,
        Self::Deleted,
        Self::Untracked,
        Self::Unmodified,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mixed => "mixed",
            Self::Conflicted => "conflicted",
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Renamed => "renamed",
            Self::Deleted => "deleted",
            Self::Untracked => "untracked",
            Self::Unmodified => "unmodified",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single changed or tracked file within a changeset
///
/// Entries are identified by their repository-relative path; the change kind
/// is carried along for display and grouping only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the repository root
    pub path: PathBuf,
    /// Change status of the file
    #[serde(default)]
    pub change: ChangeKind,
}

impl FileEntry {
    /// Create a new entry
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, change: ChangeKind) -> Self {
        Self {
            path: path.into(),
            change,
        }
    }

    /// Whether the path stays inside the repository root
    ///
    /// Absolute paths, drive prefixes and `..` components are rejected.
    #[must_use]
    pub fn is_contained(&self) -> bool {
        self.path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    }

    /// File name component of the entry's path
    ///
    /// Falls back to the whole path when there is no final component.
    #[must_use]
    pub fn name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.to_string_lossy().into_owned(),
            |n| n.to_string_lossy().into_owned(),
        )
    }
}

/// Which state of the repository the file list represents
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Changeset {
    /// The working directory
    #[default]
    Workdir,
    /// A commit, identified by SHA or symbolic name
    Commit(String),
}

impl Changeset {
    /// Identifier used by manifests and the CLI
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Workdir => "workdir",
            Self::Commit(id) => id,
        }
    }

    /// Parse an identifier; `"workdir"` (any case) selects the working directory
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        if id.eq_ignore_ascii_case("workdir") {
            Self::Workdir
        } else {
            Self::Commit(id.to_string())
        }
    }
}

impl fmt::Display for Changeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, PartialEq, Eq)]
struct RepositoryInner {
    root: PathBuf,
    name: String,
}

/// Opaque reference to the backing repository
///
/// Cheap to clone; two handles compare equal when they point at the same root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    inner: Arc<RepositoryInner>,
}

impl RepositoryHandle {
    /// Create a handle for the repository rooted at `root`
    ///
    /// The display name is the root's final component.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root.file_name().map_or_else(
            || root.to_string_lossy().into_owned(),
            |n| n.to_string_lossy().into_owned(),
        );
        Self {
            inner: Arc::new(RepositoryInner { root, name }),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Absolute location of an entry inside this repository's working directory
    ///
    /// Returns `None` for entries whose path would leave the root.
    #[must_use]
    pub fn resolve(&self, entry: &FileEntry) -> Option<PathBuf> {
        entry
            .is_contained()
            .then(|| self.inner.root.join(&entry.path))
    }
}
