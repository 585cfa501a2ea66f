//! Shared types and utilities used across all domain modules.
//!
//! `Period` serializes transparently to the short wire form the collaborator
//! expects (`"1m"`, `"3m"`, ...), so it can be used directly in wire types and
//! query strings without conversion.

pub mod fmt;

pub use fmt::format_rate;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// ─── Period ──────────────────────────────────────────────────────────────────

/// The user-selected lookback window.
///
/// Controls both the refresh scope sent to the collaborator and the tick
/// spacing of the chart's date axis.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Period {
    #[default]
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "12m")]
    TwelveMonths,
}

impl Period {
    /// Every period, shortest first.
    pub const ALL: [Period; 4] = [
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::TwelveMonths,
    ];

    /// Wire form sent to the collaborator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneMonth => "1m",
            Period::ThreeMonths => "3m",
            Period::SixMonths => "6m",
            Period::TwelveMonths => "12m",
        }
    }

    /// Number of calendar days the collaborator materializes for this period.
    pub fn lookback_days(&self) -> u32 {
        match self {
            Period::OneMonth => 30,
            Period::ThreeMonths => 90,
            Period::SixMonths => 180,
            Period::TwelveMonths => 365,
        }
    }

    /// Selector label.
    pub fn label(&self) -> &'static str {
        match self {
            Period::OneMonth => "Last month",
            Period::ThreeMonths => "Last 3 months",
            Period::SixMonths => "Last 6 months",
            Period::TwelveMonths => "Last 12 months",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string is not one of the known period selectors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown period '{0}', expected one of 1m, 3m, 6m, 12m")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1m" => Ok(Period::OneMonth),
            "3m" => Ok(Period::ThreeMonths),
            "6m" => Ok(Period::SixMonths),
            "12m" => Ok(Period::TwelveMonths),
            _ => Err(ParsePeriodError(s.to_string())),
        }
    }
}
