//! Rate formatting for table cells.
//!
//! Rates are shown with at least two decimal places and at most six, with
//! trailing zeros past the second decimal trimmed: `1.1` → `"1.10"`,
//! `1.08453` → `"1.08453"`.

use rust_decimal::Decimal;
use std::str::FromStr;

const MIN_DECIMALS: u32 = 2;
const MAX_DECIMALS: u32 = 6;

/// Format a rate for display.
///
/// Non-finite values fall back to their `f64` rendering; they never reach a
/// table because records are validated on conversion.
pub fn format_rate(rate: f64) -> String {
    // `f64`'s Display is the shortest round-trip form, so `1.1` parses as 1.1
    // rather than 1.100000000000000088817841970012523.
    let Ok(value) = Decimal::from_str(&rate.to_string()) else {
        return rate.to_string();
    };

    let mut rounded = value.round_dp(MAX_DECIMALS).normalize();
    if rounded.scale() < MIN_DECIMALS {
        rounded.rescale(MIN_DECIMALS);
    }
    rounded.to_string()
}
