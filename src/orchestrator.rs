//! Refresh-then-retrieve sequencing.
//!
//! `refresh` awaits the collaborator's refresh trigger and only then lists the
//! stored rates; a failed trigger means the listing is never requested. Each
//! refresh is identified by a `RefreshTicket` from `issue`, which the view
//! reducer uses to drop responses that arrive after a newer refresh started.
//!
//! Nothing here times out on its own. `refresh_abortable` and
//! `refresh_with_timeout` are the hooks for callers that need a bound.

use crate::domain::rates::wire::RateEntry;
use crate::domain::rates::{sort_chronologically, ChartSeries, RateRecord, SeriesTransformer};
use crate::domain::view::RefreshTicket;
use crate::error::FetchError;
use crate::shared::Period;
use crate::source::RateSource;

use futures_util::future::{self, AbortHandle, Either};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Sequences the two collaborator calls for a period.
pub struct FetchOrchestrator<S> {
    source: S,
    transformer: SeriesTransformer,
    generation: AtomicU64,
}

impl<S: RateSource> FetchOrchestrator<S> {
    pub fn new(source: S) -> Self {
        Self::with_transformer(source, SeriesTransformer::default())
    }

    pub fn with_transformer(source: S, transformer: SeriesTransformer) -> Self {
        Self {
            source,
            transformer,
            generation: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Tag a new refresh of `period`. Generations start at 1 and only grow.
    pub fn issue(&self, period: Period) -> RefreshTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RefreshTicket { generation, period }
    }

    /// Generation of the most recently issued ticket, 0 if none.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        ticket.generation == self.latest_generation()
    }

    /// Trigger a refresh for `period`, then retrieve and transform the stored
    /// history.
    ///
    /// Records are validated and sorted by date before transformation.
    pub async fn refresh(&self, period: Period) -> Result<ChartSeries, FetchError> {
        tracing::debug!(%period, "triggering refresh");
        let ack = self
            .source
            .trigger_refresh(period)
            .await
            .map_err(|source| FetchError::Trigger { period, source })?;
        tracing::debug!(%period, message = ?ack.message, "refresh acknowledged");

        let entries = self
            .source
            .list_rates()
            .await
            .map_err(|source| FetchError::Retrieval { source })?;
        tracing::debug!(%period, count = entries.len(), "rates retrieved");

        let records = validate(entries)?;
        Ok(self.transformer.transform(records))
    }

    /// `refresh` plus a handle that cancels it. A cancelled refresh resolves
    /// to `FetchError::Cancelled`; a call already in flight is abandoned.
    pub fn refresh_abortable(
        &self,
        period: Period,
    ) -> (
        AbortHandle,
        impl Future<Output = Result<ChartSeries, FetchError>> + '_,
    ) {
        let (fut, handle) = future::abortable(self.refresh(period));
        let fut = async move { fut.await.unwrap_or(Err(FetchError::Cancelled)) };
        (handle, fut)
    }

    /// `refresh` bounded by `limit`.
    pub async fn refresh_with_timeout(
        &self,
        period: Period,
        limit: Duration,
    ) -> Result<ChartSeries, FetchError> {
        let refresh = Box::pin(self.refresh(period));
        let timer = futures_timer::Delay::new(limit);

        match future::select(refresh, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                tracing::warn!(%period, ?limit, "refresh timed out");
                Err(FetchError::TimedOut(limit))
            }
        }
    }
}

/// Convert wire entries to records, rejecting the batch on the first bad one.
fn validate(entries: Vec<RateEntry>) -> Result<Vec<RateRecord>, FetchError> {
    if entries.is_empty() {
        return Err(FetchError::EmptySeries);
    }

    let mut records = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            RateRecord::try_from(entry).map_err(|reason| FetchError::InvalidRecord { index, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;

    sort_chronologically(&mut records);
    Ok(records)
}
