//! Content resolution for the preview surfaces

use super::error::{PreviewError, Result};
use super::types::{ContentReference, Ticket};
use crate::config::PreviewSettings;
use crate::entry::{Changeset, FileEntry, RepositoryHandle};
use moka::sync::Cache;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything a resolver needs to locate an entry's content
#[derive(Debug, Clone, Copy)]
pub struct ContentSource<'a> {
    pub repository: &'a RepositoryHandle,
    pub changeset: &'a Changeset,
    pub entry: &'a FileEntry,
}

/// Outcome of a text content request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Content (or the reason there is none) is available now
    Ready(Result<String>),
    /// The resolver will report back later with the request's ticket
    Pending,
}

/// Resolves entry content for the preview surfaces
///
/// Implementations that work asynchronously return [`Resolution::Pending`]
/// and later deliver the result, tagged with the same ticket, on the thread
/// that owns the pane.
pub trait ContentResolver {
    /// Request the textual content of a text-classified entry
    fn resolve_text(&self, ticket: Ticket, source: &ContentSource<'_>) -> Resolution;

    /// Produce a reference the generic preview renderer can open
    ///
    /// # Errors
    ///
    /// Returns a `PreviewError` if the entry's content cannot be located.
    fn resolve_reference(&self, source: &ContentSource<'_>) -> Result<ContentReference>;

    /// Drop any cached content
    fn invalidate(&self) {}
}

/// Resolves content from the repository's working directory
///
/// Text reads are cached briefly so that moving the selection back and forth
/// does not hit the disk each time; the cache is dropped on every refresh.
pub struct FsContentResolver {
    settings: PreviewSettings,
    cache: Cache<PathBuf, String>,
}

impl FsContentResolver {
    #[must_use]
    pub fn new(settings: PreviewSettings) -> Self {
        Self::with_cache_config(settings, Duration::from_secs(300), 256)
    }

    /// Create a resolver with custom cache configuration
    ///
    /// # Arguments
    ///
    /// * `settings` - Preview limits
    /// * `ttl` - Time-to-live for cache entries
    /// * `max_capacity` - Maximum number of cached files
    #[must_use]
    pub fn with_cache_config(settings: PreviewSettings, ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(max_capacity)
            .build();
        Self { settings, cache }
    }

    fn locate(source: &ContentSource<'_>) -> Result<PathBuf> {
        if *source.changeset != Changeset::Workdir {
            return Err(PreviewError::Unsupported(source.changeset.id().to_string()));
        }
        let path = source
            .repository
            .resolve(source.entry)
            .ok_or_else(|| PreviewError::NotFound(source.entry.path.display().to_string()))?;
        if !path.is_file() {
            return Err(PreviewError::NotFound(path.display().to_string()));
        }
        Ok(path)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let metadata = fs::metadata(path).map_err(|e| PreviewError::unreadable(path, &e))?;
        if metadata.len() > self.settings.max_file_size {
            return Err(PreviewError::TooLarge(
                metadata.len(),
                self.settings.max_file_size,
            ));
        }

        let bytes = fs::read(path).map_err(|e| PreviewError::unreadable(path, &e))?;
        let content = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        Ok(truncate_lines(content, self.settings.max_lines))
    }
}

impl ContentResolver for FsContentResolver {
    fn resolve_text(&self, _ticket: Ticket, source: &ContentSource<'_>) -> Resolution {
        let path = match Self::locate(source) {
            Ok(p) => p,
            Err(e) => return Resolution::Ready(Err(e)),
        };

        if let Some(content) = self.cache.get(&path) {
            return Resolution::Ready(Ok(content));
        }

        let result = self.read_text(&path);
        if let Ok(content) = &result {
            self.cache.insert(path, content.clone());
        }
        Resolution::Ready(result)
    }

    fn resolve_reference(&self, source: &ContentSource<'_>) -> Result<ContentReference> {
        Self::locate(source).map(ContentReference::new)
    }

    fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}

/// Keep at most `max_lines` lines, appending a marker when lines were dropped
fn truncate_lines(content: String, max_lines: usize) -> String {
    let total_lines = content.lines().count();
    if total_lines <= max_lines {
        return content;
    }

    let mut kept = content.lines().take(max_lines).collect::<Vec<_>>().join("\n");
    kept.push_str(&format!(
        "\n\n[... truncated, showing {max_lines} of {total_lines} lines ...]"
    ));
    kept
}
