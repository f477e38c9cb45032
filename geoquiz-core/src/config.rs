//! YAML configuration
//!
//! ```yaml
//! data_dir: geoquiz-core/data
//! snapshot_path: .geoquiz/session.json
//! default_language: en
//! default_mode: classic
//! timed_limit_secs: 900
//! ```
//!
//! Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::ConfigError;
use crate::language::Language;
use crate::session::{SessionSettings, DEFAULT_TIMED_LIMIT_SECS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Directory holding the entity tables; the bundled tables when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Where the resumable session is kept
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
    #[serde(default)]
    pub default_language: Language,
    /// Mode slug used when there is nothing to resume
    #[serde(default = "default_mode")]
    pub default_mode: String,
    /// Countdown length of timed games
    #[serde(default = "default_timed_limit_secs")]
    pub timed_limit_secs: u32,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(".geoquiz/session.json")
}

fn default_mode() -> String {
    "classic".to_string()
}

fn default_timed_limit_secs() -> u32 {
    DEFAULT_TIMED_LIMIT_SECS
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            snapshot_path: default_snapshot_path(),
            default_language: Language::default(),
            default_mode: default_mode(),
            timed_limit_secs: default_timed_limit_secs(),
        }
    }
}

impl QuizConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: QuizConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timed_limit_secs == 0 {
            return Err(ConfigError::Invalid(
                "timed_limit_secs must be greater than zero".to_string(),
            ));
        }
        if self.default_mode.trim().is_empty() {
            return Err(ConfigError::Invalid("default_mode is empty".to_string()));
        }
        Ok(())
    }

    /// Table directory to load, falling back to the bundled tables.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(Catalog::bundled_data_dir)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            language: self.default_language,
            timed_limit_secs: self.timed_limit_secs,
        }
    }
}
