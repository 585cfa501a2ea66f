//! Conversions from wire types to domain types for rates.

use super::wire::RateEntry;
use super::RateRecord;
use crate::error::RecordError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a collaborator date string, keeping the wall-clock date as written.
///
/// Accepts RFC 3339 with `Z` or an offset, naive ISO date-times (with `T` or a
/// space separator, optional fractional seconds) and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

impl TryFrom<RateEntry> for RateRecord {
    type Error = RecordError;

    fn try_from(entry: RateEntry) -> Result<Self, Self::Error> {
        let timestamp =
            parse_timestamp(&entry.date).ok_or_else(|| RecordError::InvalidDate(entry.date))?;
        let rate = entry.rate.ok_or(RecordError::MissingRate)?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(RecordError::InvalidRate(rate));
        }
        Ok(Self { timestamp, rate })
    }
}
