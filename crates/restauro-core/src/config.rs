//! User configuration for the help-desk assistant.
//!
//! Stored as JSON at `$XDG_CONFIG_HOME/restauro/config.json`. Environment
//! variables take precedence over the file:
//!
//! - `GEMINI_API_KEY` (or `API_KEY`) supplies the credential
//! - `RESTAURO_MODEL` selects the model
//!
//! `stream` (default `true`) chooses incremental answers from the hosted
//! model; when `false` each answer arrives whole.
//!
//! Without a credential the assistant runs offline.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{RestauroError, Result};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential for the hosted model
    pub api_key: Option<String>,
    pub model: String,
    /// Force the offline guide even when a key is present
    pub offline: bool,
    /// Stream answers from the hosted model as they are generated
    pub stream: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            offline: false,
            stream: true,
        }
    }
}

impl Config {
    /// Loads the file at the default location, then applies the process
    /// environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let config = Self::load_from(&path)?;
        Ok(config.with_env(|name| std::env::var(name).ok()))
    }

    /// Reads `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| RestauroError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| RestauroError::Configuration {
            message: format!("Invalid config at {}: {e}", path.display()),
        })
    }

    /// Applies overrides from `lookup`, typically the process environment.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(model) = non_empty("RESTAURO_MODEL") {
            self.model = model;
        }
        self
    }

    /// The credential, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Default location of the config file.
    pub fn config_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("restauro")
            .get_config_home()
            .map(|dir| dir.join(CONFIG_FILE))
            .ok_or_else(|| RestauroError::XdgDirectory("no config home directory".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let config = Config::load_from(&dir.path().join("absent.json")).expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_full_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"api_key": "abc", "model": "gemini-custom", "offline": true, "stream": false}"#,
        )
        .expect("write");

        let config = Config::load_from(&path).expect("load");
        assert_eq!(
            config,
            Config {
                api_key: Some("abc".to_string()),
                model: "gemini-custom".to_string(),
                offline: true,
                stream: false,
            }
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"offline": true}"#).expect("write");

        let config = Config::load_from(&path).expect("load");
        assert!(config.offline);
        assert!(config.stream);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").expect("write");

        let err = Config::load_from(&path).expect_err("should fail");
        assert!(matches!(err, RestauroError::Configuration { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().with_env(env(&[
            ("API_KEY", "fallback"),
            ("GEMINI_API_KEY", "primary"),
            ("RESTAURO_MODEL", "gemini-pro"),
        ]));
        assert_eq!(config.api_key(), Some("primary"));
        assert_eq!(config.model, "gemini-pro");

        let config = Config::default().with_env(env(&[("API_KEY", "fallback")]));
        assert_eq!(config.api_key(), Some("fallback"));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = Config {
            api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_key(), None);

        let config = Config::default().with_env(env(&[("GEMINI_API_KEY", "")]));
        assert_eq!(config.api_key(), None);
    }
}
