//! Output surfaces the selector drives
//!
//! Rendering itself happens elsewhere; these traits are the seam between the
//! selection logic and whatever draws the preview (a text view, a terminal, a
//! document viewer).

use super::types::ContentReference;

/// Receives text content for the text preview
pub trait TextSurface {
    /// Replace whatever is shown with `content`
    fn show_text(&mut self, content: &str);

    /// Remove any displayed content
    fn clear(&mut self);
}

/// Receives a content reference for the generic document preview
pub trait GenericSurface {
    /// Display the document at `reference`
    fn show_reference(&mut self, reference: &ContentReference);

    /// Remove any displayed document
    fn clear(&mut self);
}
