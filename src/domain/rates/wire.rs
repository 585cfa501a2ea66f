//! Wire types for the collaborator's JSON payloads.

use serde::{Deserialize, Serialize};

/// One stored rate as returned by `GET /exchange_rates`.
///
/// `rate` is optional on the wire so a `null` surfaces as a record-level
/// validation error instead of failing the whole response decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub date: String,
    #[serde(default)]
    pub rate: Option<f64>,
}

impl RateEntry {
    pub fn new(date: impl Into<String>, rate: f64) -> Self {
        Self {
            date: date.into(),
            rate: Some(rate),
        }
    }
}

/// Acknowledgement returned by `GET /fetch_data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshAck {
    #[serde(default)]
    pub message: Option<String>,
}

impl RefreshAck {
    /// Read a 2xx `fetch_data` body. Any success status counts as an
    /// acknowledgement: an empty body gives the default ack and a body that is
    /// not an ack object is kept verbatim as the message.
    pub fn from_body(body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            return Self::default();
        }
        serde_json::from_str(body).unwrap_or_else(|_| Self {
            message: Some(body.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_entry_deserializes_naive_timestamp() {
        let json = r#"[{"date":"2024-01-05T00:00:00","rate":1.0945}]"#;
        let entries: Vec<RateEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries, vec![RateEntry::new("2024-01-05T00:00:00", 1.0945)]);
    }

    #[test]
    fn test_rate_entry_null_rate_is_none() {
        let entry: RateEntry = serde_json::from_str(r#"{"date":"2024-01-05","rate":null}"#).unwrap();
        assert_eq!(entry.rate, None);
    }

    #[test]
    fn test_refresh_ack_tolerates_missing_message() {
        let ack: RefreshAck = serde_json::from_str("{}").unwrap();
        assert_eq!(ack, RefreshAck::default());

        let ack: RefreshAck =
            serde_json::from_str(r#"{"message":"Data fetched and stored"}"#).unwrap();
        assert_eq!(ack.message.as_deref(), Some("Data fetched and stored"));
    }

    #[test]
    fn test_refresh_ack_from_lenient_bodies() {
        assert_eq!(RefreshAck::from_body(""), RefreshAck::default());
        assert_eq!(RefreshAck::from_body("  \n"), RefreshAck::default());
        assert_eq!(RefreshAck::from_body("null").message, Some("null".to_string()));
        assert_eq!(RefreshAck::from_body("OK").message.as_deref(), Some("OK"));
        assert_eq!(
            RefreshAck::from_body(r#"{"message":"stored"}"#).message.as_deref(),
            Some("stored")
        );
    }
}
