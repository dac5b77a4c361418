//! Configuration system for confquill.
//!
//! This module provides the configuration structure for confquill with sensible
//! defaults and support for serialization/deserialization via serde.
//! Configuration is loaded from a TOML file and merged with command-line
//! arguments.
//!
//! # Example
//!
//! ```
//! use confquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.indent, "  ");
//! assert!(config.show_header);
//!
//! // Create custom configuration
//! let custom = Config {
//!     indent: "    ".to_string(),
//!     use_original_text: true,
//!     ..Config::default()
//! };
//! assert_eq!(custom.dump_options().indent.as_deref(), Some("    "));
//! ```

use crate::document::dump::DumpOptions;
use serde::{Deserialize, Serialize};

/// Configuration for the confquill command.
///
/// # Fields
///
/// * `indent` - Indentation unit for dumped subtrees (default: two spaces)
/// * `no_indent` - Write lines as stored instead of re-indenting (default: false)
/// * `show_header` - Print the `[trace]` header above dumped subtrees (default: true)
/// * `use_original_text` - Dump original source lines (default: false)
/// * `json_output` - Print expansions as JSON (default: false)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Indentation unit for dumped subtrees
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Write lines as stored instead of re-indenting
    #[serde(default)]
    pub no_indent: bool,

    /// Print the `[trace]` header above dumped subtrees
    #[serde(default = "default_show_header")]
    pub show_header: bool,

    /// Dump original source lines rather than matched remainders
    #[serde(default)]
    pub use_original_text: bool,

    /// Print expansions as JSON
    #[serde(default)]
    pub json_output: bool,
}

/// Returns the default indentation unit.
fn default_indent() -> String {
    "  ".to_string()
}

/// Returns the default for showing headers.
fn default_show_header() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            no_indent: false,
            show_header: default_show_header(),
            use_original_text: false,
            json_output: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/confquill/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("confquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from a specific file, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "ignoring invalid config file");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Dump layout described by this configuration.
    pub fn dump_options(&self) -> DumpOptions {
        DumpOptions {
            indent: (!self.no_indent).then(|| self.indent.clone()),
            show_header: self.show_header,
            use_original_text: self.use_original_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_dump_defaults() {
        assert_eq!(Config::default().dump_options(), DumpOptions::default());
    }

    #[test]
    fn test_no_indent_maps_to_sentinel() {
        let config = Config {
            no_indent: true,
            ..Default::default()
        };
        assert_eq!(config.dump_options().indent, None);
    }
}
