//! Domain modules organized as vertical slices.
//!
//! - `rates` — wire payloads, validated records, chart series and domain
//! - `ticks` — date-axis tick spacing per period
//! - `view` — view model, reducer, and the table/chart views

pub mod rates;
pub mod ticks;
pub mod view;
