//! Application configuration loaded from an optional TOML file.
//!
//! Every key is optional; a missing file means defaults. Lookup order:
//! an explicit path, then `./marketperf.toml`, then
//! `{config_dir}/marketperf/config.toml`.

use crate::catalog::REFERENCE_TICKER;
use crate::inflation::cache::{default_macro_start, DEFAULT_FRESHNESS_DAY, DEFAULT_SERIES_ID};
use crate::inflation::InflationCache;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const LOCAL_CONFIG_FILE: &str = "marketperf.toml";
pub const DEFAULT_CACHE_PATH: &str = "cpi_cache.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub cache_path: PathBuf,
    /// Day of month after which the current month's index is expected.
    pub freshness_day: u32,
    /// Ticker whose trading calendar the inflation series is reindexed onto.
    pub reference_ticker: String,
    pub macro_series: String,
    pub macro_start: NaiveDate,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            freshness_day: DEFAULT_FRESHNESS_DAY,
            reference_ticker: REFERENCE_TICKER.to_string(),
            macro_series: DEFAULT_SERIES_ID.to_string(),
            macro_start: default_macro_start(),
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve and load the config.
    ///
    /// An explicit path must exist. Implicit locations are skipped when
    /// absent. Returns the defaults and `None` when nothing is found.
    pub fn discover(
        explicit: Option<&Path>,
        user_config_dir: Option<&Path>,
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }
        let candidates = [
            Some(PathBuf::from(LOCAL_CONFIG_FILE)),
            user_config_dir.map(|dir| dir.join("marketperf").join("config.toml")),
        ];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                let config = Self::from_file(&path)?;
                return Ok((config, Some(path)));
            }
        }
        Ok((Self::default(), None))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=31).contains(&self.freshness_day) {
            return Err(ConfigError::Invalid(format!(
                "freshness_day must be between 1 and 31, got {}",
                self.freshness_day
            )));
        }
        if self.reference_ticker.trim().is_empty() {
            return Err(ConfigError::Invalid("reference_ticker is empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn inflation_cache(&self) -> InflationCache {
        InflationCache::new(&self.cache_path, self.freshness_day)
            .with_series(&self.macro_series, self.macro_start)
    }
}
