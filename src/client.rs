//! High-level client — `RateHistoryClient`.
//!
//! Owns the single shared `ViewState`. The orchestration flow is its only
//! writer (through `dispatch`); any number of views read snapshots of the
//! published `ViewModel` through `view`.

use crate::config::RatesConfig;
use crate::domain::rates::{ChartSeries, SeriesTransformer};
use crate::domain::view::{reduce, RefreshTicket, ViewEvent, ViewModel, ViewState};
use crate::error::{FetchError, RateHistoryError};
use crate::orchestrator::FetchOrchestrator;
use crate::shared::Period;
use crate::source::RateSource;

use async_lock::RwLock;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "http")]
use crate::http::RatesHttp;

/// The primary entry point: select a period, get a view model.
pub struct RateHistoryClient<S> {
    orchestrator: Arc<FetchOrchestrator<S>>,
    state: Arc<RwLock<ViewState>>,
    refresh_timeout: Option<Duration>,
}

impl<S> Clone for RateHistoryClient<S> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: self.orchestrator.clone(),
            state: self.state.clone(),
            refresh_timeout: self.refresh_timeout,
        }
    }
}

#[cfg(feature = "http")]
impl RateHistoryClient<RatesHttp> {
    pub fn builder() -> RateHistoryClientBuilder {
        RateHistoryClientBuilder::default()
    }
}

impl<S: RateSource> RateHistoryClient<S> {
    /// Client over any collaborator, with default settings.
    pub fn with_source(source: S) -> Self {
        Self::from_parts(source, &RatesConfig::default())
    }

    fn from_parts(source: S, config: &RatesConfig) -> Self {
        let transformer = SeriesTransformer::new(config.series_label.clone());
        Self {
            orchestrator: Arc::new(FetchOrchestrator::with_transformer(source, transformer)),
            state: Arc::new(RwLock::new(ViewState::new(config.initial_period))),
            refresh_timeout: config.refresh_timeout(),
        }
    }

    pub fn orchestrator(&self) -> &FetchOrchestrator<S> {
        &self.orchestrator
    }

    /// Current view model snapshot.
    pub async fn view(&self) -> ViewModel {
        self.state.read().await.model.clone()
    }

    pub async fn period(&self) -> Period {
        self.state.read().await.model.period
    }

    /// Apply one event to the shared state.
    pub async fn dispatch(&self, event: ViewEvent) {
        let mut state = self.state.write().await;
        if let Some(ticket) = event.ticket() {
            if !matches!(event, ViewEvent::FetchStarted(_)) && !state.accepts(&ticket) {
                tracing::debug!(
                    generation = ticket.generation,
                    latest = state.generation,
                    period = %ticket.period,
                    "discarding stale refresh result"
                );
            }
        }
        *state = reduce(&state, event);
    }

    /// Select `period`: clear the view, refresh, and publish the outcome.
    ///
    /// Returns the view model as it stands once this refresh has finished,
    /// which reflects a newer selection if one was made in the meantime.
    pub async fn select_period(&self, period: Period) -> ViewModel {
        let ticket = self.begin(period).await;

        let result = self.run(ticket).await;
        match result {
            Ok(series) => {
                tracing::info!(
                    %period,
                    generation = ticket.generation,
                    points = series.len(),
                    "rate series ready"
                );
                self.dispatch(ViewEvent::FetchSucceeded { ticket, series }).await;
            }
            Err(error) => {
                tracing::warn!(%period, generation = ticket.generation, %error, "refresh failed");
                self.dispatch(ViewEvent::FetchFailed { ticket, error }).await;
            }
        }

        self.view().await
    }

    /// Refresh the currently selected period again.
    pub async fn reload(&self) -> ViewModel {
        let period = self.period().await;
        self.select_period(period).await
    }

    /// Issue a ticket and publish it as started under one write lock, so
    /// tickets reach the state in generation order.
    async fn begin(&self, period: Period) -> RefreshTicket {
        let mut state = self.state.write().await;
        let ticket = self.orchestrator.issue(period);
        *state = reduce(&state, ViewEvent::FetchStarted(ticket));
        ticket
    }

    async fn run(&self, ticket: RefreshTicket) -> Result<ChartSeries, FetchError> {
        match self.refresh_timeout {
            Some(limit) => {
                self.orchestrator
                    .refresh_with_timeout(ticket.period, limit)
                    .await
            }
            None => self.orchestrator.refresh(ticket.period).await,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct RateHistoryClientBuilder {
    config: RatesConfig,
}

impl RateHistoryClientBuilder {
    pub fn config(mut self, config: RatesConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.config.base_url = url.to_string();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout_secs = Some(timeout.as_secs().max(1));
        self
    }

    pub fn refresh_timeout(mut self, timeout: Duration) -> Self {
        self.config.refresh_timeout_secs = Some(timeout.as_secs().max(1));
        self
    }

    pub fn series_label(mut self, label: &str) -> Self {
        self.config.series_label = label.to_string();
        self
    }

    pub fn initial_period(mut self, period: Period) -> Self {
        self.config.initial_period = period;
        self
    }

    /// Build over any collaborator, using this builder's settings.
    pub fn build_with_source<S: RateSource>(
        self,
        source: S,
    ) -> Result<RateHistoryClient<S>, RateHistoryError> {
        let config = self.config.validated()?;
        Ok(RateHistoryClient::from_parts(source, &config))
    }

    #[cfg(feature = "http")]
    pub fn build(self) -> Result<RateHistoryClient<RatesHttp>, RateHistoryError> {
        let config = self.config.validated()?;
        let http = RatesHttp::new(&config.base_url, config.request_timeout())?;
        Ok(RateHistoryClient::from_parts(http, &config))
    }
}
