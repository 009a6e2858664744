//! Configuration for the translator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (atrium.toml)
//! - Environment variables (ATRIUM_*)
//!
//! ## Example config file (atrium.toml):
//! ```toml
//! [schemas]
//! dir = "./schemas"
//!
//! [output]
//! format = "pretty"
//! precision = 6
//! header = true
//!
//! [translate]
//! fail_on_invalid = false
//! annotate_sources = true
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::sim::idf::{DeckFormat, DeckOptions};

/// Main configuration for the translator
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TranslatorConfig {
    /// Schema store settings
    #[serde(default)]
    pub schemas: SchemasConfig,

    /// Input-deck output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Translation settings
    #[serde(default)]
    pub translate: TranslateConfig,
}

/// Schema store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SchemasConfig {
    /// Directory of schema documents overriding the embedded set
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Input-deck output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Deck layout (pretty or compact)
    #[serde(default)]
    pub format: DeckFormat,

    /// Decimal places for numeric fields
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Emit the generator header comment
    #[serde(default = "default_true")]
    pub header: bool,
}

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TranslateConfig {
    /// Treat validation issues as errors before translating
    #[serde(default)]
    pub fail_on_invalid: bool,

    /// Note the source document path in the deck header
    #[serde(default)]
    pub annotate_sources: bool,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_precision() -> usize {
    6
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: DeckFormat::Pretty,
            precision: default_precision(),
            header: true,
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["atrium.toml", ".atrium.toml", "config/atrium.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("org", "atrium-bem", "atrium") {
            let xdg_config = config_dir.config_dir().join("atrium.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (ATRIUM_*)
        builder = builder.add_source(
            Environment::with_prefix("ATRIUM")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the schema override directory (resolves relative paths)
    pub fn schemas_dir(&self) -> Option<PathBuf> {
        self.schemas.dir.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                std::env::current_dir().unwrap_or_default().join(p)
            }
        })
    }

    /// Deck rendering options derived from the output section
    pub fn deck_options(&self) -> DeckOptions {
        DeckOptions {
            format: self.output.format,
            precision: self.output.precision,
            header: self.output.header,
            note: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TranslatorConfig::default();
        assert!(config.schemas.dir.is_none());
        assert_eq!(config.output.precision, 6);
        assert!(config.output.header);
        assert!(!config.translate.fail_on_invalid);
    }

    #[test]
    fn test_serialize_config() {
        let config = TranslatorConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[schemas]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("format = \"pretty\""));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atrium.toml");
        std::fs::write(
            &path,
            "[output]\nformat = \"compact\"\nprecision = 3\n",
        )
        .unwrap();

        let config = TranslatorConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.output.format, DeckFormat::Compact);
        assert_eq!(config.output.precision, 3);
        assert!(config.output.header);
    }
}
