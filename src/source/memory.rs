//! In-memory collaborator with deterministic, scripted behavior.
//!
//! Mirrors the storage service: triggering a refresh for a period replaces
//! the stored history with that period's fixture, and listing returns
//! whatever is currently stored. Used by tests and offline demos.

use super::RateSource;
use crate::domain::rates::wire::{RateEntry, RefreshAck};
use crate::error::HttpError;
use crate::shared::Period;
use async_lock::Barrier;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A remote call observed by a `MemorySource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCall {
    TriggerRefresh(Period),
    ListRates,
}

/// Holds back `trigger_refresh` for one period until released.
///
/// Each `release` lets exactly one pending trigger through.
#[derive(Debug, Clone)]
pub struct Gate(Arc<Barrier>);

impl Gate {
    pub async fn release(&self) {
        self.0.wait().await;
    }
}

#[derive(Debug, Default)]
pub struct MemorySource {
    histories: HashMap<Period, Vec<RateEntry>>,
    gates: HashMap<Period, Gate>,
    fail_trigger: Option<u16>,
    fail_list: Option<u16>,
    stored: Mutex<Vec<RateEntry>>,
    calls: Mutex<Vec<SourceCall>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixture materialized when `period` is refreshed.
    pub fn with_history(mut self, period: Period, entries: Vec<RateEntry>) -> Self {
        self.histories.insert(period, entries);
        self
    }

    /// Use the same fixture for every period.
    pub fn with_history_for_all(mut self, entries: Vec<RateEntry>) -> Self {
        for period in Period::ALL {
            self.histories.insert(period, entries.clone());
        }
        self
    }

    /// Pre-populate storage as if an earlier refresh had run.
    pub fn with_stored(self, entries: Vec<RateEntry>) -> Self {
        *lock(&self.stored) = entries;
        self
    }

    /// Make `trigger_refresh` answer with an HTTP error status.
    pub fn failing_trigger(mut self, status: u16) -> Self {
        self.fail_trigger = Some(status);
        self
    }

    /// Make `list_rates` answer with an HTTP error status.
    pub fn failing_list(mut self, status: u16) -> Self {
        self.fail_list = Some(status);
        self
    }

    /// Gate refreshes of `period`; they stay pending until the gate is released.
    pub fn gate(&mut self, period: Period) -> Gate {
        self.gates
            .entry(period)
            .or_insert_with(|| Gate(Arc::new(Barrier::new(2))))
            .clone()
    }

    /// Calls observed so far, in order.
    pub fn calls(&self) -> Vec<SourceCall> {
        lock(&self.calls).clone()
    }

    pub fn stored(&self) -> Vec<RateEntry> {
        lock(&self.stored).clone()
    }

    fn record(&self, call: SourceCall) {
        lock(&self.calls).push(call);
    }

    fn forced_failure(status: u16, operation: &str) -> HttpError {
        HttpError::ServerError {
            status,
            body: format!("forced failure: {}", operation),
        }
    }
}

#[async_trait]
impl RateSource for MemorySource {
    async fn trigger_refresh(&self, period: Period) -> Result<RefreshAck, HttpError> {
        self.record(SourceCall::TriggerRefresh(period));

        if let Some(gate) = self.gates.get(&period) {
            gate.release().await;
        }
        if let Some(status) = self.fail_trigger {
            return Err(Self::forced_failure(status, "trigger_refresh"));
        }

        let history = self.histories.get(&period).cloned().unwrap_or_default();
        *lock(&self.stored) = history;

        Ok(RefreshAck {
            message: Some("Data fetched and stored".to_string()),
        })
    }

    async fn list_rates(&self) -> Result<Vec<RateEntry>, HttpError> {
        self.record(SourceCall::ListRates);

        if let Some(status) = self.fail_list {
            return Err(Self::forced_failure(status, "list_rates"));
        }
        Ok(self.stored())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(rates: &[f64]) -> Vec<RateEntry> {
        rates
            .iter()
            .enumerate()
            .map(|(i, r)| RateEntry::new(format!("2024-01-{:02}T00:00:00", i + 1), *r))
            .collect()
    }

    #[tokio::test]
    async fn test_trigger_replaces_stored_history() {
        let source = MemorySource::new()
            .with_stored(entries(&[9.9]))
            .with_history(Period::OneMonth, entries(&[1.1, 1.2]));

        source.trigger_refresh(Period::OneMonth).await.unwrap();
        assert_eq!(source.list_rates().await.unwrap(), entries(&[1.1, 1.2]));
    }

    #[tokio::test]
    async fn test_unknown_period_materializes_nothing() {
        let source = MemorySource::new().with_stored(entries(&[1.0]));
        source.trigger_refresh(Period::SixMonths).await.unwrap();
        assert!(source.list_rates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_forced_failures() {
        let source = MemorySource::new().failing_trigger(503).failing_list(500);

        let err = source.trigger_refresh(Period::OneMonth).await.unwrap_err();
        assert!(matches!(err, HttpError::ServerError { status: 503, .. }));

        let err = source.list_rates().await.unwrap_err();
        assert!(matches!(err, HttpError::ServerError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let source = MemorySource::new();
        source.trigger_refresh(Period::ThreeMonths).await.unwrap();
        source.list_rates().await.unwrap();
        assert_eq!(
            source.calls(),
            [SourceCall::TriggerRefresh(Period::ThreeMonths), SourceCall::ListRates]
        );
    }

    #[tokio::test]
    async fn test_gate_holds_trigger_until_released() {
        let mut source = MemorySource::new().with_history(Period::OneMonth, entries(&[1.1]));
        let gate = source.gate(Period::OneMonth);

        let trigger = source.trigger_refresh(Period::OneMonth);
        let release = async {
            tokio::task::yield_now().await;
            assert!(source.stored().is_empty());
            gate.release().await;
        };
        let (ack, ()) = tokio::join!(trigger, release);

        assert!(ack.is_ok());
        assert_eq!(source.stored(), entries(&[1.1]));
    }
}
