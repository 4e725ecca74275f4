//! Terminal preview surfaces
//!
//! Stdout implementations of the preview surfaces for the command-line
//! front end. Text is printed, optionally syntax highlighted; other documents
//! are announced by their `file://` reference or handed to the system opener.

use crate::config::PreviewSettings;
use crate::preview::{ContentReference, GenericSurface, TextSurface};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::warn;

#[cfg(feature = "syntax-highlighting")]
use syntect::easy::HighlightLines;
#[cfg(feature = "syntax-highlighting")]
use syntect::highlighting::ThemeSet;
#[cfg(feature = "syntax-highlighting")]
use syntect::parsing::SyntaxSet;
#[cfg(feature = "syntax-highlighting")]
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};

/// Prints text previews to stdout
pub struct TerminalTextSurface {
    highlight: bool,
    theme: String,
    file_name: Option<PathBuf>,
    #[cfg(feature = "syntax-highlighting")]
    syntax_set: SyntaxSet,
    #[cfg(feature = "syntax-highlighting")]
    theme_set: ThemeSet,
}

impl TerminalTextSurface {
    #[must_use]
    pub fn new(settings: &PreviewSettings) -> Self {
        Self {
            highlight: settings.syntax_highlighting,
            theme: settings.theme.clone(),
            file_name: None,
            #[cfg(feature = "syntax-highlighting")]
            syntax_set: SyntaxSet::load_defaults_newlines(),
            #[cfg(feature = "syntax-highlighting")]
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Pick the highlighting syntax from `name` instead of the first line
    #[must_use]
    pub fn with_file_name(mut self, name: impl AsRef<Path>) -> Self {
        self.file_name = Some(name.as_ref().to_path_buf());
        self
    }

    /// Never emit escape sequences
    #[must_use]
    pub const fn plain(mut self) -> Self {
        self.highlight = false;
        self
    }

    /// Text as it will be printed
    #[must_use]
    pub fn render(&self, content: &str) -> String {
        self.highlight
            .then(|| self.highlighted(content))
            .flatten()
            .unwrap_or_else(|| content.to_string())
    }

    #[cfg(not(feature = "syntax-highlighting"))]
    fn highlighted(&self, _content: &str) -> Option<String> {
        warn!(theme = %self.theme, file = ?self.file_name, "built without syntax highlighting");
        None
    }

    #[cfg(feature = "syntax-highlighting")]
    fn highlighted(&self, content: &str) -> Option<String> {
        let Some(theme) = self.theme_set.themes.get(&self.theme) else {
            warn!(theme = %self.theme, "unknown highlighting theme");
            return None;
        };

        let by_name = self
            .file_name
            .as_deref()
            .and_then(|name| self.syntax_set.find_syntax_for_file(name).ok().flatten());
        let syntax = by_name
            .or_else(|| {
                content
                    .lines()
                    .next()
                    .and_then(|first| self.syntax_set.find_syntax_by_first_line(first))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut out = String::with_capacity(content.len());
        for line in LinesWithEndings::from(content) {
            let ranges = highlighter.highlight_line(line, &self.syntax_set).ok()?;
            out.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        out.push_str("\x1b[0m");
        Some(out)
    }
}

impl TextSurface for TerminalTextSurface {
    fn show_text(&mut self, content: &str) {
        let rendered = self.render(content);
        if rendered.ends_with('\n') {
            print!("{rendered}");
        } else {
            println!("{rendered}");
        }
    }

    fn clear(&mut self) {}
}

/// Announces non-text documents, optionally opening them
pub struct OpenerSurface {
    open: bool,
}

impl OpenerSurface {
    /// Create a surface; with `open` set documents go to the system opener
    #[must_use]
    pub const fn new(open: bool) -> Self {
        Self { open }
    }

    /// Line printed for `reference`
    #[must_use]
    pub fn describe(reference: &ContentReference) -> String {
        format!("{} {}", "document:".cyan().bold(), reference.uri())
    }
}

impl GenericSurface for OpenerSurface {
    fn show_reference(&mut self, reference: &ContentReference) {
        println!("{}", Self::describe(reference));
        if self.open {
            if let Err(e) = open::that(reference.path()) {
                warn!(path = %reference.path().display(), error = %e, "failed to open document");
                eprintln!("{} Failed to open {}: {e}", "❌".red(), reference);
            }
        }
    }

    fn clear(&mut self) {}
}
