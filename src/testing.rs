//! Testing utilities for changeview
//!
//! Recording surfaces, a scriptable file list provider and resolver, and a
//! scratch repository on disk.
//!
//! Only available when compiled with `cfg(test)`.

use crate::entry::{Changeset, FileEntry, RepositoryHandle};
use crate::preview::{
    ContentReference, ContentResolver, ContentSource, GenericSurface, PreviewError, Resolution,
    TextSurface, Ticket,
};
use crate::provider::{FileListProvider, ProviderError};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// Something a recording surface was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    TextShown(String),
    TextCleared,
    /// Path of the reference handed to the generic surface
    GenericShown(PathBuf),
    GenericCleared,
}

/// Event log shared by a pair of recording surfaces
pub type SurfaceLog = Rc<RefCell<Vec<SurfaceEvent>>>;

struct RecordingTextSurface {
    log: SurfaceLog,
}

impl TextSurface for RecordingTextSurface {
    fn show_text(&mut self, content: &str) {
        self.log
            .borrow_mut()
            .push(SurfaceEvent::TextShown(content.to_string()));
    }

    fn clear(&mut self) {
        self.log.borrow_mut().push(SurfaceEvent::TextCleared);
    }
}

struct RecordingGenericSurface {
    log: SurfaceLog,
}

impl GenericSurface for RecordingGenericSurface {
    fn show_reference(&mut self, reference: &ContentReference) {
        self.log
            .borrow_mut()
            .push(SurfaceEvent::GenericShown(reference.path().to_path_buf()));
    }

    fn clear(&mut self) {
        self.log.borrow_mut().push(SurfaceEvent::GenericCleared);
    }
}

/// A text and a generic surface writing to one shared log
pub fn recording_surfaces() -> (SurfaceLog, Box<dyn TextSurface>, Box<dyn GenericSurface>) {
    let log = SurfaceLog::default();
    let text = Box::new(RecordingTextSurface { log: log.clone() });
    let generic = Box::new(RecordingGenericSurface { log: log.clone() });
    (log, text, generic)
}

/// Number of surfaces holding content after replaying `events`
#[must_use]
pub fn active_surfaces(events: &[SurfaceEvent]) -> usize {
    let (mut text, mut generic) = (false, false);
    for event in events {
        match event {
            SurfaceEvent::TextShown(_) => text = true,
            SurfaceEvent::TextCleared => text = false,
            SurfaceEvent::GenericShown(_) => generic = true,
            SurfaceEvent::GenericCleared => generic = false,
        }
    }
    usize::from(text) + usize::from(generic)
}

#[derive(Default)]
struct ResolverState {
    texts: RefCell<HashMap<PathBuf, String>>,
    missing: RefCell<HashSet<PathBuf>>,
    deferred: bool,
    requests: RefCell<Vec<(Ticket, PathBuf)>>,
    invalidations: Cell<usize>,
}

/// Scriptable content resolver
///
/// Text comes from an in-memory map keyed by entry path; unknown paths are
/// `NotFound`. A deferred resolver answers every text request with
/// `Pending` and only records it. Clones share state.
#[derive(Clone, Default)]
pub struct FakeResolver {
    state: Rc<ResolverState>,
}

impl FakeResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver that never completes text requests on its own
    #[must_use]
    pub fn deferred() -> Self {
        Self {
            state: Rc::new(ResolverState {
                deferred: true,
                ..ResolverState::default()
            }),
        }
    }

    #[must_use]
    pub fn with_text(self, path: impl Into<PathBuf>, text: &str) -> Self {
        self.set_text(path, text);
        self
    }

    /// Make references for `path` unresolvable
    #[must_use]
    pub fn with_missing(self, path: impl Into<PathBuf>) -> Self {
        self.state.missing.borrow_mut().insert(path.into());
        self
    }

    pub fn set_text(&self, path: impl Into<PathBuf>, text: &str) {
        self.state
            .texts
            .borrow_mut()
            .insert(path.into(), text.to_string());
    }

    /// Text requests received so far
    #[must_use]
    pub fn requests(&self) -> Vec<(Ticket, PathBuf)> {
        self.state.requests.borrow().clone()
    }

    #[must_use]
    pub fn invalidations(&self) -> usize {
        self.state.invalidations.get()
    }
}

impl ContentResolver for FakeResolver {
    fn resolve_text(&self, ticket: Ticket, source: &ContentSource<'_>) -> Resolution {
        let path = source.entry.path.clone();
        self.state.requests.borrow_mut().push((ticket, path.clone()));
        if self.state.deferred {
            return Resolution::Pending;
        }
        Resolution::Ready(
            self.state
                .texts
                .borrow()
                .get(&path)
                .cloned()
                .ok_or_else(|| PreviewError::NotFound(path.display().to_string())),
        )
    }

    fn resolve_reference(&self, source: &ContentSource<'_>) -> crate::preview::Result<ContentReference> {
        let path = &source.entry.path;
        if self.state.missing.borrow().contains(path) {
            return Err(PreviewError::NotFound(path.display().to_string()));
        }
        Ok(ContentReference::new(path.clone()))
    }

    fn invalidate(&self) {
        self.state.invalidations.set(self.state.invalidations.get() + 1);
    }
}

#[derive(Default)]
struct ProviderState {
    entries: RefCell<Vec<FileEntry>>,
    failing: Cell<bool>,
    calls: Cell<usize>,
}

/// File list provider backed by an in-memory entry list
///
/// Clones share state, so a test can keep one handle and change the backing
/// data after giving the other to a coordinator.
#[derive(Clone, Default)]
pub struct StaticListProvider {
    state: Rc<ProviderState>,
}

impl StaticListProvider {
    #[must_use]
    pub fn new(entries: Vec<FileEntry>) -> Self {
        let provider = Self::default();
        provider.set_entries(entries);
        provider
    }

    pub fn set_entries(&self, entries: Vec<FileEntry>) {
        *self.state.entries.borrow_mut() = entries;
    }

    /// Drop the entry at `path` from the backing list
    pub fn remove(&self, path: impl AsRef<Path>) {
        self.state
            .entries
            .borrow_mut()
            .retain(|e| e.path != path.as_ref());
    }

    /// Make subsequent listings fail
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.set(failing);
    }

    /// Number of times the entries were listed
    #[must_use]
    pub fn calls(&self) -> usize {
        self.state.calls.get()
    }
}

impl FileListProvider for StaticListProvider {
    fn list_entries(
        &self,
        _repository: &RepositoryHandle,
        changeset: &Changeset,
    ) -> crate::provider::Result<Vec<FileEntry>> {
        self.state.calls.set(self.state.calls.get() + 1);
        if self.state.failing.get() {
            return Err(ProviderError::UnknownChangeset(changeset.id().to_string()));
        }
        Ok(self.state.entries.borrow().clone())
    }
}

/// Scratch repository directory that is removed on drop
pub struct TempRepo {
    dir: TempDir,
}

impl TempRepo {
    /// Create an empty scratch repository
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp repository"),
        }
    }

    /// Write `content` to `relative`, creating parent directories
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&self, relative: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write test file");
    }

    /// Remove `relative` from the scratch repository
    ///
    /// # Panics
    /// Panics if the file cannot be removed.
    pub fn delete(&self, relative: impl AsRef<Path>) {
        fs::remove_file(self.dir.path().join(relative)).expect("Failed to remove test file");
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn handle(&self) -> RepositoryHandle {
        RepositoryHandle::new(self.dir.path())
    }
}

impl Default for TempRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ChangeKind;

    #[test]
    fn test_active_surfaces_replay() {
        use SurfaceEvent::*;
        assert_eq!(active_surfaces(&[]), 0);
        assert_eq!(active_surfaces(&[TextShown("a".into())]), 1);
        assert_eq!(
            active_surfaces(&[TextShown("a".into()), TextCleared, GenericShown("b".into())]),
            1
        );
        assert_eq!(
            active_surfaces(&[TextShown("a".into()), GenericShown("b".into())]),
            2
        );
    }

    #[test]
    fn test_static_provider_shares_state() {
        let provider = StaticListProvider::new(vec![
            FileEntry::new("a.txt", ChangeKind::Added),
            FileEntry::new("b.txt", ChangeKind::Modified),
        ]);
        let handle = provider.clone();
        handle.remove("a.txt");

        let repo = RepositoryHandle::new("/repo");
        let entries = provider.list_entries(&repo, &Changeset::Workdir).unwrap();
        assert_eq!(entries, vec![FileEntry::new("b.txt", ChangeKind::Modified)]);
        assert_eq!(handle.calls(), 1);
    }

    #[test]
    fn test_temp_repo_cleanup() {
        let path;
        {
            let repo = TempRepo::new();
            repo.write("dir/file.txt", "content");
            path = repo.path().to_path_buf();
            assert!(path.join("dir/file.txt").exists());
        }
        assert!(!path.exists());
    }
}
