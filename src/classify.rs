//! Text/other classification of file names
//!
//! Decides which preview surface a file goes to. The decision is made from the
//! name alone using a fixed, case-insensitive allow-list; file contents are
//! never inspected.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Whether a file's content is treated as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classification {
    /// Human-readable text, shown in the text preview
    Text,
    /// Anything else, handed to the generic document preview
    Other,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Extensions (lowercase, without the dot) known to hold text
pub const TEXT_EXTENSIONS: &[&str] = &[
    // prose and markup
    "txt", "text", "md", "markdown", "mdown", "rst", "adoc", "asciidoc", "org", "tex", "bib",
    "html", "htm", "xhtml", "xml", "xsl", "xslt", "svg", "plist", "strings", "rtf",
    // data and config
    "json", "jsonc", "json5", "yaml", "yml", "toml", "ini", "cfg", "conf", "config",
    "properties", "env", "csv", "tsv", "lock", "gitignore", "gitattributes", "gitmodules",
    "editorconfig", "pbxproj", "xcconfig", "entitlements", "storyboard", "xib",
    // source code
    "c", "h", "cc", "cpp", "cxx", "hpp", "hh", "hxx", "m", "mm", "swift", "rs", "go",
    "java", "kt", "kts", "scala", "groovy", "gradle", "cs", "fs", "vb", "py", "pyi", "rb",
    "pl", "pm", "php", "lua", "r", "jl", "dart", "ex", "exs", "erl", "hrl", "hs", "elm",
    "clj", "cljs", "lisp", "el", "ml", "mli", "nim", "zig", "d", "v", "sv", "vhd", "vhdl",
    "js", "mjs", "cjs", "jsx", "ts", "tsx", "vue", "svelte", "css", "scss", "sass", "less",
    "sql", "graphql", "gql", "proto", "thrift",
    // scripts and build files
    "sh", "bash", "zsh", "fish", "ps1", "bat", "cmd", "mk", "make", "cmake", "ninja",
    "bazel", "bzl", "nix", "dockerfile", "patch", "diff", "log",
];

/// Extension-less file names (compared case-insensitively) known to hold text
pub const TEXT_FILENAMES: &[&str] = &[
    "AUTHORS",
    "CHANGELOG",
    "CONTRIBUTING",
    "COPYING",
    "Dockerfile",
    "Gemfile",
    "INSTALL",
    "LICENSE",
    "Makefile",
    "NEWS",
    "Podfile",
    "Rakefile",
    "README",
    "TODO",
];

/// Classify a file name using the built-in allow-list
///
/// If `name` contains directories only the final component is considered.
/// Always returns a definite answer.
#[must_use]
pub fn classify(name: &str) -> Classification {
    if is_builtin_text(file_name(name)) {
        Classification::Text
    } else {
        Classification::Other
    }
}

fn file_name(name: &str) -> &str {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name)
}

fn extension(name: &str) -> Option<&str> {
    // ".gitignore" style names count as their own extension
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

fn is_builtin_text(name: &str) -> bool {
    if TEXT_FILENAMES.iter().any(|n| n.eq_ignore_ascii_case(name)) {
        return true;
    }
    extension(name).is_some_and(|ext| {
        TEXT_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    })
}

/// Classifier with the built-in allow-list plus configured additions
///
/// The default value classifies exactly like [`classify`].
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    extra_extensions: HashSet<String>,
    extra_names: HashSet<String>,
}

impl Classifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also treat these extensions as text (leading dots are ignored)
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_extensions.extend(
            extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase()),
        );
        self
    }

    /// Also treat these exact file names as text
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_names
            .extend(names.into_iter().map(|n| n.as_ref().to_ascii_lowercase()));
        self
    }

    #[must_use]
    pub fn classify(&self, name: &str) -> Classification {
        let name = file_name(name);
        if is_builtin_text(name) {
            return Classification::Text;
        }

        let lowered = name.to_ascii_lowercase();
        let extra_ext = extension(&lowered).is_some_and(|ext| self.extra_extensions.contains(ext));
        if extra_ext || self.extra_names.contains(&lowered) {
            Classification::Text
        } else {
            Classification::Other
        }
    }
}
