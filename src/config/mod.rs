//! Widget configuration
//!
//! Recognized options for a tag-select widget. Values are validated once,
//! when the controller is built, and never re-checked afterwards.
//!
//! Settings can be stored as TOML in the user's config directory
//! (`~/.config/tagselect/config.toml` on Linux) or any file passed on the
//! command line.

use crate::error::{Result, TagSelectError};
use crate::selection::Bounds;
use crate::suggest::{SuggestionPolicy, TAG_PLACEHOLDER};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tag-select widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSelectConfig {
    /// Hint shown in the empty input
    pub placeholder: String,
    /// Allow creating tags that are not in the catalog
    pub allow_new: bool,
    /// Selection ceiling
    pub max_tags: Option<usize>,
    /// Removal floor
    pub min_tags: usize,
    /// Create prompt; must contain `{tag}`
    pub create_prompt: String,
    /// Text shown when nothing matches
    pub no_results_text: String,
    /// Text shown when the ceiling is reached; `{max}` is substituted
    pub max_reached_text: String,
    /// Populate from the host immediately on construction
    pub auto_initialize: bool,
}

impl Default for TagSelectConfig {
    fn default() -> Self {
        let policy = SuggestionPolicy::default();
        Self {
            placeholder: "Type to search or add new tags...".to_string(),
            allow_new: policy.allow_new,
            max_tags: policy.max_tags,
            min_tags: 0,
            create_prompt: policy.create_prompt,
            no_results_text: policy.no_results_text,
            max_reached_text: policy.max_reached_text,
            auto_initialize: true,
        }
    }
}

impl TagSelectConfig {
    /// Check option values
    ///
    /// # Errors
    ///
    /// Returns `TagSelectError::InvalidConfig` if the create prompt lacks a
    /// `{tag}` placeholder, `max_tags` is zero, or `min_tags` exceeds
    /// `max_tags`.
    pub fn validate(&self) -> Result<()> {
        if !self.create_prompt.contains(TAG_PLACEHOLDER) {
            return Err(TagSelectError::InvalidConfig(format!(
                "create_prompt must contain {TAG_PLACEHOLDER}: {:?}",
                self.create_prompt
            )));
        }
        if let Some(max) = self.max_tags {
            if max == 0 {
                return Err(TagSelectError::InvalidConfig(
                    "max_tags must be at least 1".to_string(),
                ));
            }
            if self.min_tags > max {
                return Err(TagSelectError::InvalidConfig(format!(
                    "min_tags ({}) exceeds max_tags ({max})",
                    self.min_tags
                )));
            }
        }
        Ok(())
    }

    /// Suggestion policy derived from this configuration
    #[must_use]
    pub fn policy(&self) -> SuggestionPolicy {
        SuggestionPolicy {
            allow_new: self.allow_new,
            max_tags: self.max_tags,
            create_prompt: self.create_prompt.clone(),
            no_results_text: self.no_results_text.clone(),
            max_reached_text: self.max_reached_text.clone(),
        }
    }

    /// Selection bounds derived from this configuration
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.max_tags, self.min_tags)
    }

    /// Get the path to the default config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> std::result::Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                ConfigError::Message("Could not determine config directory".to_string())
            })?;

        Ok(config_dir.join("tagselect").join("config.toml"))
    }

    /// Load configuration from a TOML file
    ///
    /// A missing file yields the defaults; keys absent from the file keep
    /// their default values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> std::result::Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory is unknown or the file
    /// cannot be parsed.
    pub fn load() -> std::result::Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save configuration to a TOML file, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the
    /// configuration cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> std::result::Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| {
                    ConfigError::Message(format!("Failed to create config directory: {e}"))
                })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}
