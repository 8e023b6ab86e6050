//! Embed configuration.
//!
//! Settings are read from the optional `[youtube]` section of an `rw.toml`
//! file. Every key has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! [youtube]
//! embed_url = "https://www.youtube.com/embed/"
//! control_height = 30
//! default_width = 560
//! default_aspect = "16:9"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::AspectRatio;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "rw.toml";

/// Default player URL prefix; the video id is appended verbatim.
pub const DEFAULT_EMBED_URL: &str = "https://www.youtube.com/embed/";

/// Extra height reserved for the player's control bar.
pub const CONTROL_HEIGHT: u32 = 30;

/// Width used when neither width nor height is given.
pub const DEFAULT_WIDTH: u32 = 560;

/// Resolved settings used when rendering embeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSettings {
    /// URL prefix for the iframe `src`.
    pub embed_url: String,
    /// Control-bar allowance added to the frame height.
    pub control_height: u32,
    /// Fallback width in pixels.
    pub default_width: u32,
    /// Fallback aspect ratio.
    pub default_aspect: AspectRatio,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            embed_url: DEFAULT_EMBED_URL.to_owned(),
            control_height: CONTROL_HEIGHT,
            default_width: DEFAULT_WIDTH,
            default_aspect: AspectRatio::WIDESCREEN,
        }
    }
}

impl EmbedSettings {
    /// Player URL for a video id.
    #[must_use]
    pub fn embed_src(&self, video_id: &str) -> String {
        format!("{}{video_id}", self.embed_url)
    }
}

/// Configuration file contents relevant to embeds.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[youtube]` section.
    pub youtube: YoutubeConfig,
}

/// Raw `[youtube]` section as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct YoutubeConfig {
    /// Player URL prefix.
    pub embed_url: Option<String>,
    /// Control-bar allowance in pixels.
    pub control_height: Option<u32>,
    /// Fallback width in pixels.
    pub default_width: Option<u32>,
    /// Fallback aspect ratio as `width:height`.
    pub default_aspect: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, or a
    /// parse/validation error for bad contents.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded embed configuration");
        Ok(config)
    }

    /// Load from an explicit path, or discover `rw.toml` in the current
    /// directory and its parents. Falls back to defaults when nothing is found.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist or parsing fails.
    pub fn load_or_discover(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load(path);
        }
        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd));
        match discovered {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using default embed settings");
                Ok(Self::default())
            }
        }
    }

    /// Search for `rw.toml` in `start` and its parents.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.exists())
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let section = &self.youtube;
        if let Some(url) = &section.embed_url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "youtube.embed_url must start with http:// or https://".into(),
            ));
        }
        if section.default_width == Some(0) {
            return Err(ConfigError::Validation(
                "youtube.default_width must be greater than 0".into(),
            ));
        }
        if let Some(aspect) = &section.default_aspect {
            aspect.parse::<AspectRatio>().map_err(|e| {
                ConfigError::Validation(format!("youtube.default_aspect: {e}"))
            })?;
        }
        Ok(())
    }

    /// Resolve settings, filling in defaults for missing keys.
    ///
    /// Assumes [`validate`](Self::validate) has passed; an unparsable aspect
    /// falls back to 16:9.
    #[must_use]
    pub fn settings(&self) -> EmbedSettings {
        let section = &self.youtube;
        let defaults = EmbedSettings::default();
        EmbedSettings {
            embed_url: section.embed_url.clone().unwrap_or(defaults.embed_url),
            control_height: section.control_height.unwrap_or(defaults.control_height),
            default_width: section.default_width.unwrap_or(defaults.default_width),
            default_aspect: section
                .default_aspect
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_aspect),
        }
    }
}
