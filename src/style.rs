//! Read-only badges for decorating list rows
//!
//! Hosts look up an icon and label for an entry's classification and for its
//! change kind. The map is built once and shared for the life of the process.

use crate::classify::Classification;
use crate::entry::ChangeKind;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Icon and short label for a list row decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub icon: &'static str,
    pub label: &'static str,
}

impl Badge {
    const fn new(icon: &'static str, label: &'static str) -> Self {
        Self { icon, label }
    }
}

/// Badges keyed by classification and by change kind
#[derive(Debug)]
pub struct StyleMap {
    classifications: BTreeMap<Classification, Badge>,
    changes: BTreeMap<ChangeKind, Badge>,
}

impl StyleMap {
    fn build() -> Self {
        let classifications = BTreeMap::from([
            (Classification::Text, Badge::new("≡", "text")),
            (Classification::Other, Badge::new("◆", "document")),
        ]);

        let changes = BTreeMap::from([
            (ChangeKind::Mixed, Badge::new("±", "mixed")),
            (ChangeKind::Conflicted, Badge::new("!", "conflict")),
            (ChangeKind::Added, Badge::new("A", "added")),
            (ChangeKind::Modified, Badge::new("M", "modified")),
            (ChangeKind::Renamed, Badge::new("R", "renamed")),
            (ChangeKind::Deleted, Badge::new("D", "deleted")),
            (ChangeKind::Untracked, Badge::new("?", "untracked")),
            (ChangeKind::Unmodified, Badge::new(" ", "unmodified")),
        ]);

        Self {
            classifications,
            changes,
        }
    }

    /// Badge for a classification result
    #[must_use]
    pub fn classification(&self, classification: Classification) -> Badge {
        self.classifications[&classification]
    }

    /// Badge for a change kind
    #[must_use]
    pub fn change(&self, change: ChangeKind) -> Badge {
        self.changes[&change]
    }

    /// All classification badges, in key order
    pub fn classifications(&self) -> impl Iterator<Item = (&Classification, &Badge)> {
        self.classifications.iter()
    }

    /// All change badges, in grouping order
    pub fn changes(&self) -> impl Iterator<Item = (&ChangeKind, &Badge)> {
        self.changes.iter()
    }
}

static STYLE_MAP: LazyLock<StyleMap> = LazyLock::new(StyleMap::build);

/// The shared style map
#[must_use]
pub fn style_map() -> &'static StyleMap {
    &STYLE_MAP
}
