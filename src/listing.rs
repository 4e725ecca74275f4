//! Display grouping for the file list
//!
//! Toggling the list view regroups the entries the pane already holds. It
//! never refetches and never touches the selection.

use crate::entry::{ChangeKind, FileEntry};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the file list is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ListView {
    /// Flat list ordered by path
    #[default]
    #[serde(alias = "bypath")]
    Path,
    /// Grouped by change kind
    #[serde(alias = "bystatus")]
    Status,
}

impl ListView {
    /// The other view
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Path => Self::Status,
            Self::Status => Self::Path,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A run of entries shown under one heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryGroup<'a> {
    /// Heading change kind; `None` for the flat path view
    pub change: Option<ChangeKind>,
    pub entries: Vec<&'a FileEntry>,
}

/// Group `entries` for display under `view`
///
/// The path view yields a single group (empty when there are no entries).
/// The status view yields one group per change kind present, in
/// [`ChangeKind::ALL`] order. Entries are sorted by path within each group.
#[must_use]
pub fn group_entries(entries: &[FileEntry], view: ListView) -> Vec<EntryGroup<'_>> {
    let mut sorted: Vec<&FileEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    match view {
        ListView::Path => vec![EntryGroup {
            change: None,
            entries: sorted,
        }],
        ListView::Status => ChangeKind::ALL
            .iter()
            .filter_map(|kind| {
                let members: Vec<&FileEntry> = sorted
                    .iter()
                    .copied()
                    .filter(|e| e.change == *kind)
                    .collect();
                (!members.is_empty()).then_some(EntryGroup {
                    change: Some(*kind),
                    entries: members,
                })
            })
            .collect(),
    }
}
