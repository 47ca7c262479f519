use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::canvas::PageSetup;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub links: LinksConfig,
    pub font: FontConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    /// Footer showing "current / total"
    pub numbers: bool,
    /// Running header, empty for none
    pub header: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            numbers: true,
            header: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinksConfig {
    pub color: String,
    pub underline: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            color: "#1a4f8b".to_string(),
            underline: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// Text font family, empty for the Typst default.
    /// Setting one also enables system font discovery.
    pub family: String,
    /// Body text size in points
    pub body_size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: String::new(),
            body_size: 11,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of one indent unit, in em
    pub indent: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { indent: 1.2 }
    }
}

impl Config {
    /// The configuration shipped with the crate (`src/default_config.toml`).
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::warn!("bundled default config is invalid, using built-in values: {e}");
            Self::default()
        })
    }

    /// Load config from a TOML file. Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Page chrome handed to the canvas once per document.
    pub fn page_setup(&self) -> PageSetup {
        let header = self.page.header.trim();
        PageSetup {
            header: (!header.is_empty()).then(|| header.to_string()),
            page_numbers: self.page.numbers,
        }
    }

    pub fn font_family(&self) -> Option<&str> {
        let family = self.font.family.trim();
        (!family.is_empty()).then_some(family)
    }
}
