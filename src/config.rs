use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_LOG_FILTER, WIKI_PREFIX};
use crate::error::{NormalizeError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub normalize: NormalizeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Prefix stripped from reference links
    pub wiki_prefix: String,
    /// Abort the whole batch on the first per-record error
    pub strict: bool,
    /// Decode `%XX` escapes when building record keys
    pub decode_percent_escapes: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            wiki_prefix: WIKI_PREFIX.to_string(),
            strict: false,
            decode_percent_escapes: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
    /// Directory for the daily JSON log file; console only when unset
    pub json_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            json_dir: None,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            NormalizeError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let prefix = &self.normalize.wiki_prefix;
        if prefix.trim().is_empty() {
            return Err(NormalizeError::Config(
                "normalize.wiki_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
