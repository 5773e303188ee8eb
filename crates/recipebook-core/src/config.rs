//! Notebook configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[serde(default)]` on every struct means a config file only needs the
//! keys it wants to change. Anything missing falls back to `Default`.

use recipebook_geometry::SpreadGeometry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main notebook configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page dimensions
    pub layout: LayoutConfig,

    /// Notebook behavior
    pub notebook: NotebookConfig,

    /// Keyboard settings
    pub keyboard: KeyboardConfig,
}

impl Config {
    /// Loads config from the default location.
    pub fn load() -> Self {
        Self::load_from_default_path().unwrap_or_default()
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("recipebook").join("config.toml"))
    }

    /// Writes the config to a file, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Page dimensions, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of a single page
    pub page_width: f64,

    /// Height of a page
    pub page_height: f64,

    /// Margin around each page's sticker area
    pub inset: f64,
}

impl LayoutConfig {
    /// The two-page spread these dimensions describe.
    pub fn spread(&self) -> SpreadGeometry {
        SpreadGeometry::from_page(self.page_width, self.page_height, self.inset)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 700.0,
            page_height: 800.0,
            inset: 40.0,
        }
    }
}

/// Notebook behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotebookConfig {
    /// Start with the sample recipe
    pub seed_example: bool,

    /// Title prefix for recipes saved without a title
    pub default_title_prefix: String,

    /// List label for recipes with no title
    pub untitled_label: String,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            seed_example: true,
            default_title_prefix: "New Recipe".to_string(),
            untitled_label: "Recipe".to_string(),
        }
    }
}

/// Keyboard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Extra bindings, key string to intent name (`"ctrl+n" = "start_new"`)
    pub bindings: HashMap<String, String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
