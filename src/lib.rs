//! # rate-history
//!
//! EUR-USD rate history client: refreshes the collaborator's stored history
//! for a period, retrieves it, and derives everything a table and a line
//! chart need to render it.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — `Period`, rate records, chart series, tick policy, view model and reducer
//! 2. **Collaborator** — the `RateSource` trait, an HTTP implementation and an in-memory one
//! 3. **Orchestration** — `FetchOrchestrator`: trigger, then retrieve, then transform
//! 4. **High-Level Client** — `RateHistoryClient` owning the shared view state
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rate_history::prelude::*;
//!
//! let client = RateHistoryClient::builder()
//!     .base_url("http://localhost:8000")
//!     .build()?;
//!
//! let view = client.select_period(Period::ThreeMonths).await;
//! println!("{}", TableView::new(&view).render());
//! println!("{}", ChartView::new(&view).render());
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared types: `Period`, rate formatting.
pub mod shared;

/// Domain modules (vertical slices): wire types, conversions, state.
pub mod domain;

/// Error types.
pub mod error;

/// Collaborator endpoint constants.
pub mod network;

/// Client configuration.
pub mod config;

// ── Layer 2: Collaborator ────────────────────────────────────────────────────

/// `RateSource` trait and the in-memory source.
pub mod source;

/// HTTP collaborator client.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: Orchestration ───────────────────────────────────────────────────

pub mod orchestrator;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `RateHistoryClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::shared::{format_rate, Period};

    // Domain types — rates
    pub use crate::domain::rates::wire::{RateEntry, RefreshAck};
    pub use crate::domain::rates::{
        domain_of, ChartPoint, ChartSeries, Domain, RateRecord, SeriesTransformer,
    };

    // Domain types — ticks
    pub use crate::domain::ticks::{interval_for, TickDescriptor};

    // Domain types — view
    pub use crate::domain::view::{
        present, reduce, ChartConfig, ChartSnapshot, ChartView, RefreshTicket, TableRow,
        TableView, ViewEvent, ViewModel, ViewState, ViewStatus,
    };

    // Errors
    pub use crate::error::{
        ConfigError, FetchError, HttpError, RateHistoryError, RecordError, SeriesError,
    };

    // Config + network
    pub use crate::config::RatesConfig;
    pub use crate::network::DEFAULT_BASE_URL;

    // Collaborator
    pub use crate::source::{MemorySource, RateSource};
    #[cfg(feature = "http")]
    pub use crate::http::RatesHttp;

    // Orchestration + client
    pub use crate::client::{RateHistoryClient, RateHistoryClientBuilder};
    pub use crate::orchestrator::FetchOrchestrator;
}
