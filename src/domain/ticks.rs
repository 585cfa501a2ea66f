//! Date-axis tick spacing per period.

use crate::shared::Period;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Spacing between labelled ticks on the date axis.
///
/// Displays as the charting label form, e.g. `"every 7 days"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TickDescriptor {
    every_days: u32,
}

impl TickDescriptor {
    pub const fn every_days(days: u32) -> Self {
        Self { every_days: days }
    }

    pub fn days(&self) -> u32 {
        self.every_days
    }

    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Tick dates from `start` through `end` inclusive, `days()` apart.
    pub fn ticks_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let step = Duration::days(i64::from(self.every_days.max(1)));
        std::iter::successors(Some(start), |d| d.checked_add_signed(step))
            .take_while(|d| *d <= end)
            .collect()
    }
}

impl std::fmt::Display for TickDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.every_days {
            1 => write!(f, "every day"),
            n => write!(f, "every {} days", n),
        }
    }
}

/// Tick spacing for a period. Longer periods never get finer spacing.
pub fn interval_for(period: Period) -> TickDescriptor {
    match period {
        Period::OneMonth => TickDescriptor::every_days(2),
        Period::ThreeMonths => TickDescriptor::every_days(7),
        Period::SixMonths => TickDescriptor::every_days(14),
        Period::TwelveMonths => TickDescriptor::every_days(30),
    }
}

/// Upper bound on labelled ticks a full period can produce.
pub fn max_ticks(period: Period) -> u32 {
    period.lookback_days() / interval_for(period).days() + 1
}
