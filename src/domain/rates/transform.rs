//! Record → series projection and vertical domain computation.

use super::{ChartPoint, ChartSeries, Domain, RateRecord};
use crate::error::SeriesError;

/// Padding applied below the lowest and above the highest rate.
pub const DOMAIN_PADDING: f64 = 0.01;

/// Default series label.
pub const SERIES_ID: &str = "EUR-USD";

/// Projects rate records onto a chart series.
#[derive(Debug, Clone)]
pub struct SeriesTransformer {
    label: String,
}

impl Default for SeriesTransformer {
    fn default() -> Self {
        Self::new(SERIES_ID)
    }
}

impl SeriesTransformer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// One point per record, in input order. The date is truncated to the
    /// calendar day and the rate passes through unchanged.
    pub fn transform<I>(&self, records: I) -> ChartSeries
    where
        I: IntoIterator<Item = RateRecord>,
    {
        let points = records
            .into_iter()
            .map(|r| ChartPoint {
                x: r.timestamp.date(),
                y: r.rate,
            })
            .collect();
        ChartSeries::new(self.label.clone(), points)
    }
}

/// Stable ascending sort by timestamp; records sharing a timestamp keep
/// their relative order.
pub fn sort_chronologically(records: &mut [RateRecord]) {
    records.sort_by_key(|r| r.timestamp);
}

/// Padded `[min(y) - 0.01, max(y) + 0.01]` for a non-empty series.
///
/// The padding never drops below one ULP of the bound, so `min < max` holds
/// even for magnitudes where `0.01` is lost to rounding.
pub fn domain_of(series: &ChartSeries) -> Result<Domain, SeriesError> {
    let mut ys = series.points.iter().map(|p| p.y);
    let first = ys.next().ok_or(SeriesError::Empty)?;
    let (lo, hi) = ys.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));

    Ok(Domain {
        min: lo - padding_for(lo),
        max: hi + padding_for(hi),
    })
}

fn padding_for(bound: f64) -> f64 {
    DOMAIN_PADDING.max(bound.abs() * f64::EPSILON)
}
