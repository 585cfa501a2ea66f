//! Presentation domain — the view model shared by the table and chart views.
//!
//! - `mod.rs` — `ViewModel`, its status, and the pure `present` mapping
//! - `state.rs` — event-driven reducer with stale-response suppression
//! - `render.rs` — table and chart views reading one snapshot

pub mod render;
pub mod state;

use crate::domain::rates::{domain_of, ChartPoint, ChartSeries, Domain};
use crate::domain::ticks::{interval_for, TickDescriptor};
use crate::error::FetchError;
use crate::shared::{format_rate, Period};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

pub use render::{ChartView, TableView};
pub use state::{reduce, RefreshTicket, ViewEvent, ViewState};

/// Point format of the date scale (day precision).
pub const X_FORMAT: &str = "%Y-%m-%d";
/// Label format of the bottom axis.
pub const AXIS_FORMAT: &str = "%b %d";
pub const X_LEGEND: &str = "Date";
pub const Y_LEGEND: &str = "Rate";

/// A fully derived, renderable chart state. `series` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshot {
    pub series: ChartSeries,
    pub domain: Domain,
    pub ticks: TickDescriptor,
}

/// What the views should show.
#[derive(Debug, Clone)]
pub enum ViewStatus {
    /// A refresh is outstanding.
    Loading,
    Ready(ChartSnapshot),
    Failed(Arc<FetchError>),
}

/// Everything the table and chart views need, for one period.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub period: Period,
    pub status: ViewStatus,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::loading(Period::default())
    }
}

impl ViewModel {
    pub fn loading(period: Period) -> Self {
        Self {
            period,
            status: ViewStatus::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, ViewStatus::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.status, ViewStatus::Ready(_))
    }

    pub fn snapshot(&self) -> Option<&ChartSnapshot> {
        match &self.status {
            ViewStatus::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.status {
            ViewStatus::Failed(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// Table rows in series order; empty unless ready.
    pub fn table_rows(&self) -> Vec<TableRow> {
        self.snapshot()
            .map(|s| s.series.points.iter().map(TableRow::from).collect())
            .unwrap_or_default()
    }

    /// Chart configuration; `None` unless ready.
    pub fn chart_config(&self) -> Option<ChartConfig> {
        self.snapshot().map(ChartConfig::from_snapshot)
    }
}

/// Map a finished refresh onto a view model for `period`.
///
/// An empty series is reported as `EmptySeries` rather than charted.
pub fn present(period: Period, result: Result<ChartSeries, FetchError>) -> ViewModel {
    let status = match result {
        Ok(series) => match domain_of(&series) {
            Ok(domain) => ViewStatus::Ready(ChartSnapshot {
                series,
                domain,
                ticks: interval_for(period),
            }),
            Err(_) => ViewStatus::Failed(Arc::new(FetchError::EmptySeries)),
        },
        Err(e) => ViewStatus::Failed(Arc::new(e)),
    };
    ViewModel { period, status }
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// One formatted `(date, rate)` table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub date: String,
    pub rate: String,
}

impl TableRow {
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.date, &self.rate)
    }
}

impl From<&ChartPoint> for TableRow {
    fn from(p: &ChartPoint) -> Self {
        Self {
            date: p.x.format(X_FORMAT).to_string(),
            rate: format_rate(p.y),
        }
    }
}

// ─── Chart ───────────────────────────────────────────────────────────────────

/// Axis configuration for a line chart of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub series_id: String,
    pub domain: Domain,
    pub ticks: TickDescriptor,
    pub x_format: &'static str,
    pub axis_format: &'static str,
    pub x_legend: &'static str,
    pub y_legend: &'static str,
    /// Dates that carry a bottom-axis label.
    pub tick_dates: Vec<NaiveDate>,
}

impl ChartConfig {
    pub fn from_snapshot(snapshot: &ChartSnapshot) -> Self {
        let tick_dates = match (snapshot.series.first(), snapshot.series.last()) {
            (Some(first), Some(last)) => snapshot.ticks.ticks_between(first.x, last.x),
            _ => Vec::new(),
        };
        Self {
            series_id: snapshot.series.id.clone(),
            domain: snapshot.domain,
            ticks: snapshot.ticks,
            x_format: X_FORMAT,
            axis_format: AXIS_FORMAT,
            x_legend: X_LEGEND,
            y_legend: Y_LEGEND,
            tick_dates,
        }
    }

    /// Bottom-axis labels, e.g. `"Jan 01"`.
    pub fn tick_labels(&self) -> Vec<String> {
        self.tick_dates
            .iter()
            .map(|d| d.format(self.axis_format).to_string())
            .collect()
    }
}
