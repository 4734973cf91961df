//! Optional `tscodec.toml` defaults for the CLI.
//!
//! ```toml
//! strict = true
//! language = "hu_HU"
//! full = false
//! ```
//!
//! Command-line flags always win over the file.

use serde::Deserialize;
use std::path::Path;

/// File name looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "tscodec.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Read catalogues in strict mode.
    pub strict: bool,
    /// Language used when a catalogue does not declare one.
    pub language: Option<String>,
    /// Print untruncated text in `view`.
    pub full: bool,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid configuration: {}", e))
    }

    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, `tscodec.toml` in the working
    /// directory is used when present, otherwise the defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => {
                if !Path::new(path).is_file() {
                    return Err(format!("Config file does not exist: {}", path));
                }
                path.to_string()
            }
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => DEFAULT_CONFIG_FILE.to_string(),
            None => return Ok(Config::default()),
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Cannot read config file {}: {}", path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path, ?config, "loaded configuration");
        Ok(config)
    }

    /// A `--lang` flag takes precedence over the configured language.
    pub fn language_hint(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.language.clone())
    }
}
