//! File list and preview coordination
//!
//! [`PaneCoordinator`] ties a file list provider to a [`PreviewSelector`]. It
//! keeps the list, the selection and the preview consistent across user
//! selections, repository swaps and changeset changes.
//!
//! All methods run on the thread that owns the pane and none of them fail:
//! listing errors leave an empty list, unknown selections fall back to no
//! selection, and unavailable content clears the preview.

use crate::classify::Classifier;
use crate::entry::{Changeset, FileEntry, RepositoryHandle};
use crate::listing::{EntryGroup, ListView, group_entries};
use crate::preview::{
    ContentResolver, ContentSource, GenericSurface, PreviewMode, PreviewSelector, PreviewStatus,
    Result as PreviewResult, TextSurface, Ticket,
};
use crate::provider::FileListProvider;
use crate::style::{StyleMap, style_map};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// State of the file list itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStatus {
    /// No repository bound yet
    #[default]
    Unbound,
    /// The changeset has no entries, or they could not be listed
    Empty,
    /// The list holds this many entries
    Populated(usize),
}

/// Coordinates the file list, the selection and the preview pane
pub struct PaneCoordinator {
    provider: Box<dyn FileListProvider>,
    selector: PreviewSelector,
    repository: Option<RepositoryHandle>,
    changeset: Changeset,
    entries: Vec<FileEntry>,
    selection: Option<PathBuf>,
    list_view: ListView,
    list_status: ListStatus,
}

impl PaneCoordinator {
    /// Create a coordinator from its collaborators
    ///
    /// Nothing is listed until a repository is bound.
    #[must_use]
    pub fn new(
        provider: Box<dyn FileListProvider>,
        text: Box<dyn TextSurface>,
        generic: Box<dyn GenericSurface>,
        resolver: Box<dyn ContentResolver>,
    ) -> Self {
        Self {
            provider,
            selector: PreviewSelector::new(text, generic, resolver),
            repository: None,
            changeset: Changeset::Workdir,
            entries: Vec::new(),
            selection: None,
            list_view: ListView::default(),
            list_status: ListStatus::Unbound,
        }
    }

    /// Classify entries with `classifier`
    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.selector = self.selector.with_classifier(classifier);
        self
    }

    /// Start in `view` instead of the path view
    #[must_use]
    pub const fn with_list_view(mut self, view: ListView) -> Self {
        self.list_view = view;
        self
    }

    /// Show `changeset` once a repository is bound
    #[must_use]
    pub fn with_changeset(mut self, changeset: Changeset) -> Self {
        self.changeset = changeset;
        self
    }

    /// Bind the pane to `repository` and refresh
    ///
    /// Switching to a different repository drops the selection; rebinding the
    /// same one behaves like a plain refresh.
    pub fn bind(&mut self, repository: RepositoryHandle) {
        if self.repository.as_ref() != Some(&repository) {
            info!(repository = %repository.root().display(), "binding repository");
            self.selection = None;
        }
        self.repository = Some(repository);
        self.refresh();
    }

    /// Show a different changeset of the bound repository
    ///
    /// The selection survives if its path is still listed.
    pub fn set_changeset(&mut self, changeset: Changeset) {
        debug!(%changeset, "changeset changed");
        self.changeset = changeset;
        self.refresh();
    }

    /// Re-list entries, reconcile the selection and re-run the preview
    ///
    /// Refreshing twice with unchanged backing data leaves the selection and
    /// preview mode as they were.
    pub fn refresh(&mut self) {
        self.selector.invalidate();

        let Some(repository) = self.repository.as_ref() else {
            self.entries.clear();
            self.selection = None;
            self.list_status = ListStatus::Unbound;
            self.selector.select_preview(None);
            return;
        };

        self.entries = match self.provider.list_entries(repository, &self.changeset) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, changeset = %self.changeset, "failed to list entries");
                Vec::new()
            }
        };
        self.list_status = if self.entries.is_empty() {
            ListStatus::Empty
        } else {
            ListStatus::Populated(self.entries.len())
        };

        if let Some(selected) = &self.selection {
            if !self.entries.iter().any(|e| &e.path == selected) {
                debug!(path = %selected.display(), "selection no longer listed");
                self.selection = None;
            }
        }

        info!(
            entries = self.entries.len(),
            changeset = %self.changeset,
            selected = self.selection.is_some(),
            "refreshed file list"
        );
        self.update_preview();
    }

    /// Select the entry at `path`, or clear the selection with `None`
    ///
    /// A path that is not in the current list clears the selection.
    /// Returns the preview mode now in effect.
    pub fn select(&mut self, path: Option<&Path>) -> Option<PreviewMode> {
        self.selection = match path {
            Some(p) if self.entries.iter().any(|e| e.path == p) => Some(p.to_path_buf()),
            Some(p) => {
                warn!(path = %p.display(), "ignoring selection of unlisted entry");
                None
            }
            None => None,
        };
        self.update_preview()
    }

    /// Deliver an asynchronous content result
    ///
    /// Returns `false` when the result belongs to a superseded request and was
    /// dropped.
    pub fn content_resolved(&mut self, ticket: Ticket, result: PreviewResult<String>) -> bool {
        self.selector.complete(ticket, result)
    }

    /// Switch the list layout; entries, selection and preview are untouched
    pub fn set_list_view(&mut self, view: ListView) {
        self.list_view = view;
    }

    /// Flip between the path and status layouts
    pub fn toggle_list_view(&mut self) {
        self.list_view = self.list_view.toggle();
    }

    /// Entries grouped for the current layout
    #[must_use]
    pub fn groups(&self) -> Vec<EntryGroup<'_>> {
        group_entries(&self.entries, self.list_view)
    }

    #[must_use]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Path> {
        self.selection.as_deref()
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        let selected = self.selection.as_ref()?;
        self.entries.iter().find(|e| &e.path == selected)
    }

    #[must_use]
    pub const fn preview_mode(&self) -> Option<PreviewMode> {
        self.selector.mode()
    }

    #[must_use]
    pub const fn preview_status(&self) -> &PreviewStatus {
        self.selector.status()
    }

    /// Ticket of the content request still outstanding, if any
    #[must_use]
    pub const fn pending_ticket(&self) -> Option<Ticket> {
        self.selector.pending()
    }

    #[must_use]
    pub const fn list_status(&self) -> ListStatus {
        self.list_status
    }

    #[must_use]
    pub const fn list_view(&self) -> ListView {
        self.list_view
    }

    #[must_use]
    pub const fn repository(&self) -> Option<&RepositoryHandle> {
        self.repository.as_ref()
    }

    #[must_use]
    pub const fn changeset(&self) -> &Changeset {
        &self.changeset
    }

    #[must_use]
    pub const fn classifier(&self) -> &Classifier {
        self.selector.classifier()
    }

    /// Badges for decorating list rows
    #[must_use]
    pub fn style_map(&self) -> &'static StyleMap {
        style_map()
    }

    fn update_preview(&mut self) -> Option<PreviewMode> {
        let entry = self
            .selection
            .as_ref()
            .and_then(|selected| self.entries.iter().find(|e| &e.path == selected));

        match (self.repository.as_ref(), entry) {
            (Some(repository), Some(entry)) => {
                let source = ContentSource {
                    repository,
                    changeset: &self.changeset,
                    entry,
                };
                self.selector.select_preview(Some(&source))
            }
            _ => self.selector.select_preview(None),
        }
    }
}
