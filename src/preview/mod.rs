//! Preview pane
//!
//! This module decides which of two mutually exclusive surfaces shows the
//! selected entry:
//! - Text entries go to a text surface, with content from a resolver
//! - Everything else goes to a generic document surface as a `file://` reference
//!
//! Content resolution may finish later than the selection that asked for it;
//! tickets make sure only the latest request ever reaches a surface.

mod error;
mod resolver;
mod selector;
mod surface;
mod types;

pub use error::{PreviewError, Result};
pub use resolver::{ContentResolver, ContentSource, FsContentResolver, Resolution};
pub use selector::PreviewSelector;
pub use surface::{GenericSurface, TextSurface};
pub use types::{ContentReference, PreviewMode, PreviewStatus, Ticket};
