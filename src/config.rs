use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ExportFormat;

/// Persistent configuration for sidedoc
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extract: ExtractOptions,
    pub output: OutputOptions,
}

/// Options controlling section extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Paragraph styles starting with this prefix are section headings
    pub heading_style_prefix: String,
    /// Keep paragraphs whose text is empty after trimming
    pub keep_empty_paragraphs: bool,
    pub figure_order: FigureOrder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureOrder {
    /// Order of the package's relationship part
    #[default]
    Relationship,
    /// Natural sort on relationship ID (rId2 before rId10)
    Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    pub format: ExportFormat,
    /// Maximum display width of a table cell in text output
    pub table_cell_width: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            heading_style_prefix: "Heading".to_string(),
            keep_empty_paragraphs: true,
            figure_order: FigureOrder::Relationship,
        }
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Text,
            table_cell_width: 24,
        }
    }
}

impl Config {
    /// Load config from the config directory, falling back to defaults
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Config::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the config directory
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(config_path) = Self::get_config_path() else {
            return Ok(None);
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(Some(config_path))
    }

    /// Get the path to the config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sidedoc").join("config.toml"))
    }

    /// Write the default config file, returning where it went
    pub fn init_default() -> Result<Option<PathBuf>> {
        Config::default().save()
    }
}
