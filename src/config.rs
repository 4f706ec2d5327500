//! Optional user configuration.
//!
//! Read from `$XDG_CONFIG_HOME/zcalc/config.toml` (or a path given on the
//! command line). Every field has a default and a missing file is not an
//! error; the file is never written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculator::ERROR_TOKEN;
use crate::keypad::{Keypad, Limits};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text shown when an expression cannot be evaluated.
    pub error_token: String,
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            error_token: ERROR_TOKEN.to_string(),
            limits: Limits::default(),
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zcalc")
            .join("config.toml")
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a config from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Build the keypad this configuration describes.
    pub fn keypad(&self) -> Keypad {
        Keypad::new(self.limits, self.error_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypad::{InputState, Key};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.error_token, "Error");
        assert_eq!(config.limits.max_digits_before_operator, 10);
        assert_eq!(config.limits.max_digits_after_operator, 11);
        assert_eq!(config.limits.max_result_length, 22);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml(
            r#"
            error_token = "E"

            [limits]
            max_result_length = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.error_token, "E");
        assert_eq!(config.limits.max_result_length, 8);
        assert_eq!(config.limits.max_digits_after_operator, 11);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml("limits = 3").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = Path::new("/nonexistent/zcalc/config.toml");
        assert_eq!(Config::load_from(path).unwrap(), Config::default());
    }

    #[test]
    fn test_keypad_from_config() {
        let config = Config::from_toml("error_token = \"Oops\"").unwrap();
        let keypad = config.keypad();
        let state = keypad.apply_all(
            InputState::new(),
            [Key::Digit(1), "+".parse().unwrap(), Key::Equals],
        );
        assert_eq!(state.display(), "Oops");
    }
}
