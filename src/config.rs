//! Application-level configuration loading.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    client::opentdb::OpenTdbConfig,
    dao::progress::DEFAULT_STORAGE_KEY,
    services::{RoundSettings, round_service::DEFAULT_ROUND_AMOUNT},
};

/// Default location on disk where the client looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/trivia.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "TRIVIA_ROUND_CONFIG_PATH";
/// Directory holding the best-score file when none is configured.
const DEFAULT_PROGRESS_DIR: &str = ".trivia-round";
/// Largest batch the trivia service hands out in one request.
const MAX_ROUND_AMOUNT: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Base URL of the trivia service.
    pub api_base_url: String,
    /// Questions per round.
    pub amount: u32,
    /// Per-request timeout for trivia calls.
    pub request_timeout: Duration,
    /// Directory of the file-backed progress store.
    pub progress_dir: PathBuf,
    /// Slot name of the best record.
    pub storage_key: String,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        amount = app_config.amount,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON configuration document; absent keys keep their defaults.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Trivia client settings, honouring the `TRIVIA_API_BASE_URL` override.
    pub fn trivia_config(&self) -> OpenTdbConfig {
        OpenTdbConfig::new(self.api_base_url.clone())
            .with_timeout(self.request_timeout)
            .with_env_overrides()
    }

    /// Round controller settings.
    pub fn round_settings(&self) -> RoundSettings {
        RoundSettings {
            amount: self.amount,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let trivia = OpenTdbConfig::default();
        Self {
            api_base_url: trivia.base_url,
            amount: DEFAULT_ROUND_AMOUNT,
            request_timeout: trivia.request_timeout,
            progress_dir: PathBuf::from(DEFAULT_PROGRESS_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    api_base_url: Option<String>,
    amount: Option<u32>,
    request_timeout_secs: Option<u64>,
    progress_dir: Option<PathBuf>,
    storage_key: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();

        let amount = match value.amount {
            Some(amount) if (1..=MAX_ROUND_AMOUNT).contains(&amount) => amount,
            Some(amount) => {
                warn!(amount, "round amount out of range; using default");
                defaults.amount
            }
            None => defaults.amount,
        };

        Self {
            api_base_url: value
                .api_base_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            amount,
            request_timeout: value
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            progress_dir: value.progress_dir.unwrap_or(defaults.progress_dir),
            storage_key: value
                .storage_key
                .filter(|key| !key.trim().is_empty())
                .unwrap_or(defaults.storage_key),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::parse("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url, "https://opentdb.com");
        assert_eq!(config.amount, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.storage_key, "trivia_best");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = AppConfig::parse(
            r#"{
                "api_base_url": "http://localhost:8080",
                "amount": 5,
                "request_timeout_secs": 3,
                "progress_dir": "/tmp/trivia",
                "storage_key": "best"
            }"#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.round_settings(), RoundSettings { amount: 5 });
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.progress_dir, PathBuf::from("/tmp/trivia"));
        assert_eq!(config.storage_key, "best");
    }

    #[test]
    fn out_of_range_amount_falls_back() {
        assert_eq!(AppConfig::parse(r#"{"amount": 0}"#).unwrap().amount, 10);
        assert_eq!(AppConfig::parse(r#"{"amount": 51}"#).unwrap().amount, 10);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(AppConfig::parse("amount = 5").is_err());
    }
}
