//! Plain-text table and chart views.
//!
//! Both views borrow one `ViewModel`, so a table and a chart rendered from
//! the same model always show the same snapshot.

use super::{ViewModel, ViewStatus, X_LEGEND, Y_LEGEND};
use std::fmt::Write as _;

/// Date/rate table.
pub struct TableView<'a> {
    model: &'a ViewModel,
}

impl<'a> TableView<'a> {
    pub fn new(model: &'a ViewModel) -> Self {
        Self { model }
    }

    pub fn render(&self) -> String {
        match &self.model.status {
            ViewStatus::Loading => loading_line(self.model),
            ViewStatus::Failed(e) => format!("Failed to load rates: {}", e),
            ViewStatus::Ready(_) => {
                let rows = self.model.table_rows();
                let rate_width = rows
                    .iter()
                    .map(|r| r.rate.len())
                    .chain(std::iter::once(Y_LEGEND.len()))
                    .max()
                    .unwrap_or_default();

                let mut out = String::new();
                let _ = writeln!(out, "{:<10}  {:>w$}", X_LEGEND, Y_LEGEND, w = rate_width);
                for row in &rows {
                    let _ = writeln!(out, "{:<10}  {:>w$}", row.date, row.rate, w = rate_width);
                }
                out
            }
        }
    }
}

/// Chart summary: series range, vertical domain and axis ticks.
pub struct ChartView<'a> {
    model: &'a ViewModel,
}

impl<'a> ChartView<'a> {
    pub fn new(model: &'a ViewModel) -> Self {
        Self { model }
    }

    pub fn render(&self) -> String {
        let (Some(snapshot), Some(config)) = (self.model.snapshot(), self.model.chart_config())
        else {
            return match self.model.error() {
                Some(e) => format!("Chart unavailable: {}", e),
                None => loading_line(self.model),
            };
        };

        let mut out = String::new();
        if let (Some(first), Some(last)) = (snapshot.series.first(), snapshot.series.last()) {
            let _ = writeln!(
                out,
                "{} ({}): {} → {}, {} points",
                config.series_id,
                self.model.period.label(),
                first.x.format(config.x_format),
                last.x.format(config.x_format),
                snapshot.series.len()
            );
        }
        let _ = writeln!(
            out,
            "{} axis: [{:.4}, {:.4}]",
            config.y_legend, config.domain.min, config.domain.max
        );
        let _ = writeln!(
            out,
            "{} axis: {} ({})",
            config.x_legend,
            config.ticks,
            config.tick_labels().join(", ")
        );
        out
    }
}

fn loading_line(model: &ViewModel) -> String {
    format!("Loading rates for {}…", model.period.label().to_lowercase())
}
