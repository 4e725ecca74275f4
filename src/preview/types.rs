//! Preview modes, status and content references

use super::error::PreviewError;
use crate::classify::Classification;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which of the two preview surfaces shows the selected entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewMode {
    /// Syntax-highlighted text view
    Text,
    /// Generic document preview
    Generic,
}

impl From<Classification> for PreviewMode {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Text => Self::Text,
            Classification::Other => Self::Generic,
        }
    }
}

impl fmt::Display for PreviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

/// What the preview pane is currently doing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewStatus {
    /// Nothing selected; both surfaces cleared
    #[default]
    Idle,
    /// Waiting on the content resolver; both surfaces cleared
    Loading(PreviewMode),
    /// The surface for this mode holds the selected entry's content
    Showing(PreviewMode),
    /// Content could not be produced; both surfaces cleared
    Unavailable(PreviewError),
}

impl PreviewStatus {
    /// The surface currently holding content, if any
    #[must_use]
    pub const fn active_surface(&self) -> Option<PreviewMode> {
        match self {
            Self::Showing(mode) => Some(*mode),
            _ => None,
        }
    }
}

/// Identifies one content request
///
/// Tickets increase monotonically; only the most recent one is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub(crate) u64);

impl Ticket {
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Location of content for the generic preview renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentReference {
    path: PathBuf,
}

impl ContentReference {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file://` URI for the referenced content
    ///
    /// Bytes outside the unreserved set (and `/`) are percent-encoded.
    #[must_use]
    pub fn uri(&self) -> String {
        let raw = self.path.to_string_lossy();
        let mut uri = String::with_capacity(raw.len() + 8);
        uri.push_str("file://");
        if !raw.starts_with('/') {
            uri.push('/');
        }
        for byte in raw.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                    uri.push(byte as char);
                }
                b'\\' => uri.push('/'),
                _ => uri.push_str(&format!("%{byte:02X}")),
            }
        }
        uri
    }
}

impl fmt::Display for ContentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri())
    }
}
