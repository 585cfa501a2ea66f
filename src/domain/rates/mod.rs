//! Rate history domain — raw records, chart points and series.

mod convert;
pub mod transform;
pub mod wire;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub use convert::parse_timestamp;
pub use transform::{domain_of, sort_chronologically, SeriesTransformer, DOMAIN_PADDING, SERIES_ID};

/// A validated rate observation from the collaborator.
///
/// `timestamp` is the date-time as written by the collaborator; any zone
/// designator is dropped without conversion so the calendar day never shifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub timestamp: NaiveDateTime,
    /// Finite and strictly positive.
    pub rate: f64,
}

/// One point of the chart series, at day precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: NaiveDate,
    pub y: f64,
}

/// A labelled, date-ordered sequence of chart points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub id: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(id: impl Into<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            id: id.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&ChartPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ChartPoint> {
        self.points.last()
    }

    /// True when every point's date is not earlier than its predecessor's.
    pub fn is_chronological(&self) -> bool {
        self.points.windows(2).all(|w| w[0].x <= w[1].x)
    }
}

/// Padded vertical axis range. `min < max` whenever it was computed from a
/// non-empty series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub fn contains(&self, y: f64) -> bool {
        self.min <= y && y <= self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}
