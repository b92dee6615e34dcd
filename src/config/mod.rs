//! Engine configuration and its on-disk persistence.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::period::Period;
use crate::utils::persistence::{tmp_path, write_atomic};

const APP_DIR: &str = "goal_balance";
const CONFIG_FILE: &str = "config.json";
const CACHE_FILE: &str = "balances.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tunables for the balance engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on balance computations running at once in a batch.
    #[serde(default = "EngineConfig::default_max_concurrency")]
    pub max_concurrency: usize,
    /// Billing period of goals built with `Goal::from_config`, e.g. `"2 weeks"`.
    #[serde(default = "EngineConfig::default_period_value")]
    pub default_period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional cache file location. Defaults to the platform data directory.
    pub cache_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Tracing directive such as `goal_balance=debug`.
    pub log_filter: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: Self::default_max_concurrency(),
            default_period: Self::default_period_value(),
            cache_file: None,
            log_filter: None,
        }
    }
}

impl EngineConfig {
    pub fn default_max_concurrency() -> usize {
        8
    }

    pub fn default_period_value() -> String {
        "1 month".into()
    }

    /// Parses [`EngineConfig::default_period`].
    pub fn default_period(&self) -> Result<Period, ConfigError> {
        self.default_period
            .parse()
            .map_err(|err| ConfigError::Invalid(format!("default_period: {err}")))
    }

    pub fn resolve_cache_file(&self) -> PathBuf {
        if let Some(path) = &self.cache_file {
            return path.clone();
        }
        data_root().join(CACHE_FILE)
    }

    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "max_concurrency must be at least 1".into(),
            ));
        }
        self.default_period().map(|_| ())
    }
}

fn data_root() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Handles loading and saving [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager rooted at the platform configuration directory.
    pub fn new_default() -> Self {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::new(base.join(CONFIG_FILE))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads and validates the configuration, falling back to defaults when no file exists.
    pub fn load(&self) -> Result<EngineConfig, ConfigError> {
        let config = if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))?
        } else {
            EngineConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &EngineConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}
