//! Client configuration.
//!
//! Loadable from JSON (camelCase keys) or from environment variables:
//!
//! | Key | Env var | Default |
//! |---|---|---|
//! | `baseUrl` | `RATE_HISTORY_BASE_URL` | `http://localhost:8000` |
//! | `requestTimeoutSecs` | `RATE_HISTORY_REQUEST_TIMEOUT_SECS` | none |
//! | `refreshTimeoutSecs` | `RATE_HISTORY_REFRESH_TIMEOUT_SECS` | none |
//! | `seriesLabel` | `RATE_HISTORY_SERIES_LABEL` | `EUR-USD` |
//! | `initialPeriod` | `RATE_HISTORY_PERIOD` | `1m` |

use crate::domain::rates::SERIES_ID;
use crate::error::ConfigError;
use crate::network::DEFAULT_BASE_URL;
use crate::shared::Period;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_BASE_URL: &str = "RATE_HISTORY_BASE_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "RATE_HISTORY_REQUEST_TIMEOUT_SECS";
pub const ENV_REFRESH_TIMEOUT: &str = "RATE_HISTORY_REFRESH_TIMEOUT_SECS";
pub const ENV_SERIES_LABEL: &str = "RATE_HISTORY_SERIES_LABEL";
pub const ENV_PERIOD: &str = "RATE_HISTORY_PERIOD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatesConfig {
    /// Target endpoint for both collaborator operations.
    pub base_url: String,
    /// Per-HTTP-call bound, applied by the transport.
    pub request_timeout_secs: Option<u64>,
    /// Bound on a whole refresh-then-retrieve cycle.
    pub refresh_timeout_secs: Option<u64>,
    pub series_label: String,
    pub initial_period: Period,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            refresh_timeout_secs: None,
            series_label: SERIES_ID.to_string(),
            initial_period: Period::default(),
        }
    }
}

impl RatesConfig {
    pub fn from_json(json: &str) -> Result<Self, crate::error::RateHistoryError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated()?)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT) {
            config.request_timeout_secs = Some(parse_secs(ENV_REQUEST_TIMEOUT, &raw)?);
        }
        if let Some(raw) = lookup(ENV_REFRESH_TIMEOUT) {
            config.refresh_timeout_secs = Some(parse_secs(ENV_REFRESH_TIMEOUT, &raw)?);
        }
        if let Some(label) = lookup(ENV_SERIES_LABEL) {
            config.series_label = label;
        }
        if let Some(raw) = lookup(ENV_PERIOD) {
            config.initial_period = raw.parse()?;
        }
        config.validated()
    }

    /// Normalize the base URL, check it is an absolute http(s) URL, and
    /// check that any configured timeout is positive.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        check_positive(ENV_REQUEST_TIMEOUT, self.request_timeout_secs)?;
        check_positive(ENV_REFRESH_TIMEOUT, self.refresh_timeout_secs)?;

        let trimmed = self.base_url.trim().trim_end_matches('/');
        let host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"));
        match host {
            Some(h) if !h.is_empty() && !h.starts_with('/') => {
                self.base_url = trimmed.to_string();
                Ok(self)
            }
            _ => Err(ConfigError::InvalidBaseUrl(self.base_url)),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn refresh_timeout(&self) -> Option<Duration> {
        self.refresh_timeout_secs.map(Duration::from_secs)
    }
}

fn check_positive(key: &str, secs: Option<u64>) -> Result<(), ConfigError> {
    match secs {
        Some(0) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: "0".to_string(),
        }),
        _ => Ok(()),
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}
