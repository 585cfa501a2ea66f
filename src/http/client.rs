//! Low-level HTTP client — `RatesHttp`.
//!
//! One method per collaborator endpoint, returning wire types. Conversion to
//! domain types happens in the orchestrator. No retries: a failed call is
//! reported to the caller as-is.

use crate::domain::rates::wire::{RateEntry, RefreshAck};
use crate::error::HttpError;
use crate::network::{RATES_PATH, REFRESH_PATH};
use crate::shared::Period;
use crate::source::RateSource;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the rate ingestion service.
#[derive(Debug, Clone)]
pub struct RatesHttp {
    base_url: String,
    client: Client,
}

impl RatesHttp {
    /// Build a client for `base_url`. A `request_timeout` bounds each call
    /// individually; `None` leaves calls unbounded.
    pub fn new(base_url: &str, request_timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = Client::builder().pool_max_idle_per_host(4);
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────────

    pub async fn fetch_data(&self, period: Period) -> Result<RefreshAck, HttpError> {
        let url = format!("{}{}?period={}", self.base_url, REFRESH_PATH, period.as_str());
        let body = self.get_text(&url).await?;
        Ok(RefreshAck::from_body(&body))
    }

    pub async fn exchange_rates(&self) -> Result<Vec<RateEntry>, HttpError> {
        let url = format!("{}{}", self.base_url, RATES_PATH);
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| HttpError::Decode(e.to_string()))
    }

    /// Body of a 2xx response; any other status becomes an `HttpError`.
    async fn get_text(&self, url: &str) -> Result<String, HttpError> {
        tracing::debug!(url, "GET");
        let resp = self.client.get(url).send().await.map_err(map_transport)?;
        let status = resp.status();

        if status.is_success() {
            return resp.text().await.map_err(map_transport);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            408 => Err(HttpError::Timeout),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

fn map_transport(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(e)
    }
}

#[async_trait]
impl RateSource for RatesHttp {
    async fn trigger_refresh(&self, period: Period) -> Result<RefreshAck, HttpError> {
        self.fetch_data(period).await
    }

    async fn list_rates(&self) -> Result<Vec<RateEntry>, HttpError> {
        self.exchange_rates().await
    }
}
