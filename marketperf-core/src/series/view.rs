//! Per (period, instrument) views: the rows a chart line is drawn from.

use crate::catalog::Instrument;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day inside a period window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    pub date: NaiveDate,
    /// Trading-day offset from the window start (0-based, contiguous).
    pub day: usize,
    pub raw: f64,
    /// `raw` in purchasing power of the comparison's base date.
    pub adjusted: f64,
    /// Percent change of the active column relative to the first row.
    pub pct_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodView {
    pub period: String,
    pub instrument: Instrument,
    pub inflation_adjusted: bool,
    pub rows: Vec<ViewRow>,
}

impl PeriodView {
    /// `{period}-{instrument}`, the legend name of the line.
    pub fn name(&self) -> String {
        format!("{}-{}", self.period, self.instrument.label())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last_pct_change(&self) -> Option<f64> {
        self.rows.last().map(|r| r.pct_change)
    }

    pub fn pct_range(&self) -> Option<(f64, f64)> {
        if self.rows.is_empty() {
            return None;
        }
        let min = self
            .rows
            .iter()
            .map(|r| r.pct_change)
            .fold(f64::INFINITY, f64::min);
        let max = self
            .rows
            .iter()
            .map(|r| r.pct_change)
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

/// Result of building one view: either rows or an explicit "no data" signal.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome {
    View(PeriodView),
    Empty,
}

impl ViewOutcome {
    pub fn into_view(self) -> Option<PeriodView> {
        match self {
            ViewOutcome::View(v) => Some(v),
            ViewOutcome::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ViewOutcome::Empty)
    }
}
