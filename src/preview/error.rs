//! Preview error types

use byte_unit::{Byte, UnitType};
use thiserror::Error;

/// Reasons content for a preview could not be produced
///
/// None of these are fatal: the selector clears the preview and reports the
/// error through its status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    /// The entry no longer exists where it was expected
    #[error("File not found: {0}")]
    NotFound(String),

    /// The file exists but could not be read
    #[error("Could not read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    /// File is too large to preview
    #[error("File too large: {} (max: {})", format_size(.0), format_size(.1))]
    TooLarge(u64, u64),

    /// The changeset cannot be resolved by this resolver
    #[error("Preview not available for changeset {0}")]
    Unsupported(String),
}

impl PreviewError {
    pub(crate) fn unreadable(path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::Unreadable {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

fn format_size(bytes: &u64) -> String {
    Byte::from_u64(*bytes)
        .get_appropriate_unit(UnitType::Binary)
        .to_string()
}

/// Result type for preview operations
pub type Result<T> = std::result::Result<T, PreviewError>;
