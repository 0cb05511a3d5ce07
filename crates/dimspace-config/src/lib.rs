//! Configuration and file boundary for dimspace.
//!
//! Load dimension maps from JSON or YAML, dump them back, and load table
//! rendering options from TOML or YAML without code changes.
//!
//! # Examples
//!
//! Load dimensions from a YAML document:
//!
//! ```
//! use dimspace_config::{load_dimensions, DataFormat};
//!
//! let space = load_dimensions(b"size: [s, m, l]\ncolor: [red, blue]\n", DataFormat::Yaml).unwrap();
//! assert_eq!(space.raw_size(), 6);
//! ```
//!
//! Load render options, falling back to defaults when the file is missing:
//!
//! ```
//! use dimspace_config::{RenderConfig, TableFormat};
//!
//! let config = RenderConfig::load("render.toml").unwrap_or_default();
//! assert_eq!(config.format, TableFormat::Plain);
//! ```

mod io;


use std::fmt;
use std::path::Path;
use std::str::FromStr;

use dimspace_core::DimspaceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use io::{dump_dimensions, dump_dimensions_file, load_dimensions, load_dimensions_file};

/// Configuration and boundary I/O error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Unexpected document shape: {0}")]
    Shape(String),

    #[error(transparent)]
    Dimspace(#[from] DimspaceError),
}

impl ConfigError {
    /// True for malformed input text in any supported format.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            ConfigError::Json(_) | ConfigError::Yaml(_) | ConfigError::Toml(_)
        )
    }
}

/// Serialization format of a dimension file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    pub fn name(self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Yaml => "yaml",
        }
    }

    /// Infers the format from a file extension.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` when the extension is missing or unknown.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DimspaceError> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            DimspaceError::UnsupportedFormat(format!("no extension on {}", path.display()))
        })?;
        ext.parse()
    }
}

impl FromStr for DataFormat {
    type Err = DimspaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "yaml" | "yml" => Ok(DataFormat::Yaml),
            _ => Err(DimspaceError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text layout of a rendered table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    /// Separator-joined cells, optionally colored.
    #[default]
    Plain,

    /// Pipe-delimited with a dashed header separator row.
    Markdown,

    /// Comma-joined cells.
    Csv,
}

impl TableFormat {
    pub fn name(self) -> &'static str {
        match self {
            TableFormat::Plain => "plain",
            TableFormat::Markdown => "markdown",
            TableFormat::Csv => "csv",
        }
    }
}

impl FromStr for TableFormat {
    type Err = DimspaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(TableFormat::Plain),
            "markdown" | "md" => Ok(TableFormat::Markdown),
            "csv" => Ok(TableFormat::Csv),
            _ => Err(DimspaceError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Table rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RenderConfig {
    /// Output layout.
    pub format: TableFormat,

    /// Pad every cell to its column width.
    pub align: bool,

    /// Cell separator for the plain layout.
    pub separator: String,

    /// Color markup per cell (plain layout only).
    pub color: bool,

    /// Maximum number of data rows.
    pub limit: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: TableFormat::Plain,
            align: false,
            separator: "\t".to_string(),
            color: false,
            limit: None,
        }
    }
}

impl RenderConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn with_format(mut self, format: TableFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_align(mut self, align: bool) -> Self {
        self.align = align;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
