//! Series builder: window a raw series to a period and normalize it.
//!
//! Steps per (period, instrument):
//! 1. keep rows with `start <= date <= start + duration_days`
//! 2. cap the window at `duration_days` rows
//! 3. deflate against the shared base date (identity for CPI itself)
//! 4. number rows 0.. by trading day
//! 5. percent change of the active column from the first row

use super::view::{PeriodView, ViewOutcome, ViewRow};
use super::BuildError;
use crate::catalog::{Instrument, Period};
use crate::data::SeriesPoint;
use crate::inflation::{IndexTable, InflationAdjuster};
use chrono::NaiveDate;

/// Rows of `series` inside the period window, at most `duration_days` of them.
///
/// `series` must be sorted ascending by date.
pub fn window<'s>(series: &'s [SeriesPoint], period: &Period) -> &'s [SeriesPoint] {
    let start = period.start;
    let end = period.end();
    let lo = series.partition_point(|p| p.date < start);
    let hi = series.partition_point(|p| p.date <= end);
    if lo >= hi {
        return &[];
    }
    let max_rows = usize::try_from(period.duration_days).unwrap_or(0);
    let hi = hi.min(lo.saturating_add(max_rows));
    &series[lo..hi]
}

/// `values[i] / values[0] * 100 - 100`; the first element is exactly `0.0`.
pub fn pct_change_from_first(values: &[f64]) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    values.iter().map(|v| v / first * 100.0 - 100.0).collect()
}

pub struct SeriesBuilder<'a> {
    adjuster: InflationAdjuster<'a>,
}

impl<'a> SeriesBuilder<'a> {
    pub fn new(table: &'a IndexTable) -> Self {
        Self {
            adjuster: InflationAdjuster::new(table),
        }
    }

    /// Build the view of `raw` over `period`.
    ///
    /// `base_date` is the earliest start among every selected period, so all
    /// adjusted lines in one comparison share a reference point. Returns
    /// [`ViewOutcome::Empty`] when the window holds no rows.
    pub fn build_view(
        &self,
        instrument: &Instrument,
        raw: &[SeriesPoint],
        period: &Period,
        inflation_adjusted: bool,
        base_date: NaiveDate,
    ) -> Result<ViewOutcome, BuildError> {
        let window = window(raw, period);
        if window.is_empty() {
            return Ok(ViewOutcome::Empty);
        }

        let adjusted: Vec<f64> = if instrument.is_inflation() {
            window.iter().map(|p| p.value).collect()
        } else {
            self.adjuster
                .adjust_series(window, base_date)?
                .into_iter()
                .map(|p| p.value)
                .collect()
        };

        let active: Vec<f64> = if inflation_adjusted {
            adjusted.clone()
        } else {
            window.iter().map(|p| p.value).collect()
        };
        let pct = pct_change_from_first(&active);

        let rows = window
            .iter()
            .zip(adjusted)
            .zip(pct)
            .enumerate()
            .map(|(day, ((point, adjusted), pct_change))| ViewRow {
                date: point.date,
                day,
                raw: point.value,
                adjusted,
                pct_change,
            })
            .collect();

        Ok(ViewOutcome::View(PeriodView {
            period: period.label.clone(),
            instrument: instrument.clone(),
            inflation_adjusted,
            rows,
        }))
    }
}
