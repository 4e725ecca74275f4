//! Configuration module for changeview
//!
//! Preview limits, classification additions and list defaults. The file lives
//! in the user's config directory (`~/.config/changeview/config.toml` on
//! Linux); every value can be overridden from the environment with
//! `CHANGEVIEW_<SECTION>__<KEY>`, e.g. `CHANGEVIEW_PREVIEW__MAX_LINES=200`.

use crate::classify::Classifier;
use crate::listing::ListView;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "CHANGEVIEW";

/// Limits and options for the preview surfaces
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PreviewSettings {
    /// Maximum file size to load as text (bytes)
    pub max_file_size: u64,
    /// Maximum lines handed to the text surface
    pub max_lines: usize,
    /// Highlight text previews in the terminal
    pub syntax_highlighting: bool,
    /// Highlighting theme name
    pub theme: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            max_file_size: 5_242_880, // 5MB
            max_lines: 5_000,
            syntax_highlighting: true,
            theme: String::from("base16-ocean.dark"),
        }
    }
}

/// Additions to the built-in text allow-list
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ClassifySettings {
    /// Extra extensions treated as text (with or without the leading dot)
    pub extra_text_extensions: Vec<String>,
    /// Extra exact file names treated as text
    pub extra_text_names: Vec<String>,
}

/// File list defaults
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ListSettings {
    /// View used when the pane opens
    pub default_view: ListView,
    /// Glob patterns (relative to the repository root) left out of workdir listings
    pub ignore: Vec<String>,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            default_view: ListView::Path,
            ignore: vec![String::from("target/**")],
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PaneConfig {
    #[serde(default)]
    pub preview: PreviewSettings,

    #[serde(default)]
    pub classify: ClassifySettings,

    #[serde(default)]
    pub list: ListSettings,
}

impl PaneConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("changeview").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file is not an error; defaults and environment overrides
    /// still apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file or environment cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, layered with environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Classifier with this configuration's additions
    #[must_use]
    pub fn classifier(&self) -> Classifier {
        Classifier::new()
            .with_extensions(&self.classify.extra_text_extensions)
            .with_names(&self.classify.extra_text_names)
    }
}
