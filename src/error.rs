//! Unified error types.

use crate::shared::{ParsePeriodError, Period};
use thiserror::Error;

/// Top-level crate error.
#[derive(Error, Debug)]
pub enum RateHistoryError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Collaborator transport errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Failure of one refresh-then-retrieve cycle.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Step 1 (`fetch_data`) failed; retrieval was never attempted.
    #[error("Refresh for {period} failed: {source}")]
    Trigger {
        period: Period,
        #[source]
        source: HttpError,
    },

    /// Step 2 (`exchange_rates`) failed.
    #[error("Retrieving rates failed: {source}")]
    Retrieval {
        #[source]
        source: HttpError,
    },

    /// Retrieval succeeded but returned zero records.
    #[error("No rates available")]
    EmptySeries,

    /// The collaborator sent a record that cannot be charted.
    #[error("Invalid rate record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: RecordError },

    #[error("Refresh cancelled")]
    Cancelled,

    #[error("Refresh timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

/// Data-quality problems in a single collaborator record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("unparseable date '{0}'")]
    InvalidDate(String),

    #[error("missing rate")]
    MissingRate,

    #[error("rate {0} is not a finite positive number")]
    InvalidRate(f64),
}

/// Series computations that need at least one point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("series is empty")]
    Empty,
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base URL '{0}': expected an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error(transparent)]
    Period(#[from] ParsePeriodError),
}
