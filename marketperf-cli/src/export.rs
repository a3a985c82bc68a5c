//! Export comparison rows as CSV or JSON, and the per-series summary.

use anyhow::{Context, Result};
use marketperf_core::compare::Comparison;
use marketperf_core::series::PeriodView;

/// Serialize the whole comparison to pretty JSON.
pub fn export_json(comparison: &Comparison) -> Result<String> {
    serde_json::to_string_pretty(comparison).context("failed to serialize comparison to JSON")
}

/// Every row of every view, long format.
///
/// Columns: series, period, instrument, day, date, raw, adjusted, pct_change
pub fn export_views_csv(comparison: &Comparison) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "series",
        "period",
        "instrument",
        "day",
        "date",
        "raw",
        "adjusted",
        "pct_change",
    ])?;

    for view in &comparison.views {
        let name = view.name();
        for row in &view.rows {
            wtr.write_record([
                name.as_str(),
                view.period.as_str(),
                view.instrument.label(),
                row.day.to_string().as_str(),
                row.date.to_string().as_str(),
                format!("{:.6}", row.raw).as_str(),
                format!("{:.6}", row.adjusted).as_str(),
                format!("{:.4}", row.pct_change).as_str(),
            ])?;
        }
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// One summary line per view.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub name: String,
    pub rows: usize,
    pub final_pct: f64,
    pub min_pct: f64,
    pub max_pct: f64,
}

impl SeriesSummary {
    pub fn from_view(view: &PeriodView) -> Option<Self> {
        let (min_pct, max_pct) = view.pct_range()?;
        Some(Self {
            name: view.name(),
            rows: view.len(),
            final_pct: view.last_pct_change()?,
            min_pct,
            max_pct,
        })
    }
}

pub fn summarize(comparison: &Comparison) -> Vec<SeriesSummary> {
    comparison
        .views
        .iter()
        .filter_map(SeriesSummary::from_view)
        .collect()
}
