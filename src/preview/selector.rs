//! Selection-to-preview decision logic

use super::error::{PreviewError, Result};
use super::resolver::{ContentResolver, ContentSource, Resolution};
use super::surface::{GenericSurface, TextSurface};
use super::types::{PreviewMode, PreviewStatus, Ticket};
use crate::classify::Classifier;
use tracing::{debug, warn};

/// Routes the selected entry to exactly one preview surface
///
/// The selector owns both surfaces and the content resolver. At most one
/// surface holds content at any time: the active one is cleared before the
/// other is filled, and every new request supersedes any result still
/// outstanding from an earlier one.
pub struct PreviewSelector {
    text: Box<dyn TextSurface>,
    generic: Box<dyn GenericSurface>,
    resolver: Box<dyn ContentResolver>,
    classifier: Classifier,
    mode: Option<PreviewMode>,
    status: PreviewStatus,
    pending: Option<Ticket>,
    last_ticket: u64,
}

impl PreviewSelector {
    #[must_use]
    pub fn new(
        text: Box<dyn TextSurface>,
        generic: Box<dyn GenericSurface>,
        resolver: Box<dyn ContentResolver>,
    ) -> Self {
        Self {
            text,
            generic,
            resolver,
            classifier: Classifier::default(),
            mode: None,
            status: PreviewStatus::Idle,
            pending: None,
            last_ticket: 0,
        }
    }

    /// Use `classifier` instead of the built-in allow-list
    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Show `source`'s entry on the surface its classification calls for
    ///
    /// With no source both surfaces are cleared and `None` is returned.
    /// Otherwise the returned mode is the one the entry's classification
    /// selects, even if its content turns out to be unavailable.
    pub fn select_preview(&mut self, source: Option<&ContentSource<'_>>) -> Option<PreviewMode> {
        let ticket = self.next_ticket();
        if let Some(stale) = self.pending.take() {
            debug!(ticket = stale.id(), "superseding pending content request");
        }

        let Some(source) = source else {
            self.text.clear();
            self.generic.clear();
            self.mode = None;
            self.status = PreviewStatus::Idle;
            return None;
        };

        self.deactivate();

        let mode = PreviewMode::from(self.classifier.classify(&source.entry.name()));
        self.mode = Some(mode);
        debug!(path = %source.entry.path.display(), %mode, "selecting preview");

        match mode {
            PreviewMode::Text => match self.resolver.resolve_text(ticket, source) {
                Resolution::Ready(result) => self.apply_text(result),
                Resolution::Pending => {
                    self.pending = Some(ticket);
                    self.status = PreviewStatus::Loading(PreviewMode::Text);
                }
            },
            PreviewMode::Generic => match self.resolver.resolve_reference(source) {
                Ok(reference) => {
                    self.generic.show_reference(&reference);
                    self.status = PreviewStatus::Showing(PreviewMode::Generic);
                }
                Err(e) => self.unavailable(e),
            },
        }

        Some(mode)
    }

    /// Deliver the result of an asynchronous text request
    ///
    /// Returns `false` and leaves the preview untouched when `ticket` is not
    /// the outstanding request.
    pub fn complete(&mut self, ticket: Ticket, result: Result<String>) -> bool {
        if self.pending != Some(ticket) {
            debug!(ticket = ticket.id(), "discarding stale content result");
            return false;
        }
        self.pending = None;
        self.apply_text(result);
        true
    }

    /// Drop any content the resolver has cached
    pub fn invalidate(&self) {
        self.resolver.invalidate();
    }

    /// Mode selected by the current entry's classification
    #[must_use]
    pub const fn mode(&self) -> Option<PreviewMode> {
        self.mode
    }

    #[must_use]
    pub const fn status(&self) -> &PreviewStatus {
        &self.status
    }

    /// Ticket of the text request still awaiting completion
    #[must_use]
    pub const fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    #[must_use]
    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    fn next_ticket(&mut self) -> Ticket {
        self.last_ticket += 1;
        Ticket(self.last_ticket)
    }

    fn deactivate(&mut self) {
        match self.status.active_surface() {
            Some(PreviewMode::Text) => self.text.clear(),
            Some(PreviewMode::Generic) => self.generic.clear(),
            None => return,
        }
        self.status = PreviewStatus::Idle;
    }

    fn apply_text(&mut self, result: Result<String>) {
        match result {
            Ok(content) => {
                self.text.show_text(&content);
                self.status = PreviewStatus::Showing(PreviewMode::Text);
            }
            Err(e) => self.unavailable(e),
        }
    }

    fn unavailable(&mut self, error: PreviewError) {
        warn!(%error, "preview content unavailable");
        self.deactivate();
        self.status = PreviewStatus::Unavailable(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{ChangeKind, Changeset, FileEntry, RepositoryHandle};
    use crate::testing::{
        FakeResolver, SurfaceEvent, SurfaceLog, active_surfaces, recording_surfaces,
    };

    struct Fixture {
        repo: RepositoryHandle,
        log: SurfaceLog,
        resolver: FakeResolver,
        selector: PreviewSelector,
    }

    fn fixture(resolver: FakeResolver) -> Fixture {
        let (log, text, generic) = recording_surfaces();
        let selector = PreviewSelector::new(text, generic, Box::new(resolver.clone()));
        Fixture {
            repo: RepositoryHandle::new("/repo"),
            log,
            resolver,
            selector,
        }
    }

    impl Fixture {
        fn select(&mut self, entry: Option<&FileEntry>) -> Option<PreviewMode> {
            let changeset = Changeset::Workdir;
            let source = entry.map(|entry| ContentSource {
                repository: &self.repo,
                changeset: &changeset,
                entry,
            });
            self.selector.select_preview(source.as_ref())
        }
    }

    fn readme() -> FileEntry {
        FileEntry::new("README.md", ChangeKind::Modified)
    }

    fn image() -> FileEntry {
        FileEntry::new("image.png", ChangeKind::Added)
    }

    #[test]
    fn test_no_selection_clears_both_surfaces() {
        let mut fx = fixture(FakeResolver::new().with_text("README.md", "hello"));
        fx.select(Some(&readme()));
        fx.log.borrow_mut().clear();

        assert_eq!(fx.select(None), None);
        assert_eq!(
            *fx.log.borrow(),
            vec![SurfaceEvent::TextCleared, SurfaceEvent::GenericCleared]
        );
        assert_eq!(*fx.selector.status(), PreviewStatus::Idle);
        assert_eq!(fx.selector.mode(), None);
    }

    #[test]
    fn test_text_entry_goes_to_text_surface() {
        let mut fx = fixture(FakeResolver::new().with_text("README.md", "# Title"));

        assert_eq!(fx.select(Some(&readme())), Some(PreviewMode::Text));
        assert_eq!(
            *fx.log.borrow(),
            vec![SurfaceEvent::TextShown("# Title".into())]
        );
        assert_eq!(
            *fx.selector.status(),
            PreviewStatus::Showing(PreviewMode::Text)
        );
    }

    #[test]
    fn test_other_entry_goes_to_generic_surface() {
        let mut fx = fixture(FakeResolver::new());

        assert_eq!(fx.select(Some(&image())), Some(PreviewMode::Generic));
        assert_eq!(
            *fx.log.borrow(),
            vec![SurfaceEvent::GenericShown("image.png".into())]
        );
    }

    #[test]
    fn test_switching_clears_text_before_activating_generic() {
        let mut fx = fixture(FakeResolver::new().with_text("README.md", "docs"));
        fx.select(Some(&readme()));
        fx.select(Some(&image()));

        let log = fx.log.borrow();
        let cleared = log
            .iter()
            .position(|e| *e == SurfaceEvent::TextCleared)
            .expect("text surface was never cleared");
        let shown = log
            .iter()
            .position(|e| matches!(e, SurfaceEvent::GenericShown(_)))
            .expect("generic surface was never shown");
        assert!(cleared < shown, "{log:?}");
        assert_eq!(
            *fx.selector.status(),
            PreviewStatus::Showing(PreviewMode::Generic)
        );
    }

    #[test]
    fn test_never_both_surfaces_active() {
        let mut fx = fixture(
            FakeResolver::new()
                .with_text("README.md", "a")
                .with_text("main.rs", "b"),
        );
        let entries = [
            readme(),
            image(),
            FileEntry::new("main.rs", ChangeKind::Modified),
            FileEntry::new("doc.pdf", ChangeKind::Added),
            readme(),
            FileEntry::new("missing.txt", ChangeKind::Deleted),
            image(),
        ];

        for entry in &entries {
            fx.select(Some(entry));
            let log = fx.log.borrow();
            let expected = usize::from(fx.selector.status().active_surface().is_some());
            assert_eq!(active_surfaces(&log), expected, "{log:?}");
        }
        fx.select(None);
        assert_eq!(active_surfaces(&fx.log.borrow()), 0);
    }

    #[test]
    fn test_unavailable_content_clears_and_reports() {
        let mut fx = fixture(FakeResolver::new().with_text("README.md", "docs"));
        fx.select(Some(&readme()));

        let gone = FileEntry::new("gone.txt", ChangeKind::Deleted);
        assert_eq!(fx.select(Some(&gone)), Some(PreviewMode::Text));

        assert!(matches!(
            fx.selector.status(),
            PreviewStatus::Unavailable(PreviewError::NotFound(_))
        ));
        assert_eq!(active_surfaces(&fx.log.borrow()), 0);
        assert_eq!(
            fx.log
                .borrow()
                .iter()
                .filter(|e| **e == SurfaceEvent::TextCleared)
                .count(),
            1
        );
    }

    #[test]
    fn test_unavailable_reference_for_generic_entry() {
        let mut fx = fixture(FakeResolver::new().with_missing("image.png"));

        assert_eq!(fx.select(Some(&image())), Some(PreviewMode::Generic));
        assert!(matches!(
            fx.selector.status(),
            PreviewStatus::Unavailable(PreviewError::NotFound(_))
        ));
        assert!(fx.log.borrow().is_empty());
    }

    #[test]
    fn test_deferred_result_applies_when_current() {
        let mut fx = fixture(FakeResolver::deferred());
        fx.select(Some(&readme()));

        assert_eq!(
            *fx.selector.status(),
            PreviewStatus::Loading(PreviewMode::Text)
        );
        let ticket = fx.selector.pending().unwrap();
        assert!(fx.selector.complete(ticket, Ok("late".into())));
        assert_eq!(
            fx.log.borrow().last(),
            Some(&SurfaceEvent::TextShown("late".into()))
        );
        assert_eq!(fx.selector.pending(), None);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut fx = fixture(FakeResolver::deferred());
        fx.select(Some(&readme()));
        let stale = fx.resolver.requests()[0].0;

        fx.select(Some(&image()));
        assert!(!fx.selector.complete(stale, Ok("old readme".into())));

        assert!(
            !fx.log
                .borrow()
                .iter()
                .any(|e| matches!(e, SurfaceEvent::TextShown(_)))
        );
        assert_eq!(
            *fx.selector.status(),
            PreviewStatus::Showing(PreviewMode::Generic)
        );
    }

    #[test]
    fn test_stale_result_for_same_mode_is_discarded() {
        let mut fx = fixture(FakeResolver::deferred());
        fx.select(Some(&readme()));
        fx.select(Some(&FileEntry::new("main.rs", ChangeKind::Modified)));

        let requests = fx.resolver.requests();
        let (first, second) = (requests[0].0, requests[1].0);
        assert!(first < second);

        assert!(fx.selector.complete(second, Ok("fn main() {}".into())));
        assert!(!fx.selector.complete(first, Ok("# readme".into())));
        assert_eq!(
            fx.log.borrow().last(),
            Some(&SurfaceEvent::TextShown("fn main() {}".into()))
        );
    }

    #[test]
    fn test_custom_classifier_routes_to_text() {
        let (log, text, generic) = recording_surfaces();
        let resolver = FakeResolver::new().with_text("Brewfile", "brew \"git\"");
        let mut selector = PreviewSelector::new(text, generic, Box::new(resolver))
            .with_classifier(Classifier::new().with_names(["Brewfile"]));
        let repo = RepositoryHandle::new("/repo");
        let entry = FileEntry::new("Brewfile", ChangeKind::Added);
        let source = ContentSource {
            repository: &repo,
            changeset: &Changeset::Workdir,
            entry: &entry,
        };

        assert_eq!(selector.select_preview(Some(&source)), Some(PreviewMode::Text));
        assert_eq!(
            *log.borrow(),
            vec![SurfaceEvent::TextShown("brew \"git\"".into())]
        );
    }
}
