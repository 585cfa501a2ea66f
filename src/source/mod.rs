//! The collaborator seam — the two remote operations the pipeline consumes.

pub mod memory;

use crate::domain::rates::wire::{RateEntry, RefreshAck};
use crate::error::HttpError;
use crate::shared::Period;
use async_trait::async_trait;
use std::sync::Arc;

pub use memory::{Gate, MemorySource, SourceCall};

/// External rate ingestion and storage service.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// (Re)materialize rate history for `period`. Side-effecting.
    async fn trigger_refresh(&self, period: Period) -> Result<RefreshAck, HttpError>;

    /// The full stored history, not scoped by period.
    async fn list_rates(&self) -> Result<Vec<RateEntry>, HttpError>;
}

#[async_trait]
impl<T: RateSource + ?Sized> RateSource for Arc<T> {
    async fn trigger_refresh(&self, period: Period) -> Result<RefreshAck, HttpError> {
        (**self).trigger_refresh(period).await
    }

    async fn list_rates(&self) -> Result<Vec<RateEntry>, HttpError> {
        (**self).list_rates().await
    }
}
