//! Chart model: one line per (period, instrument) view.
//!
//! Front-end agnostic; the terminal UI draws it with ratatui and the CLI
//! summarizes it.

use crate::compare::Comparison;
use crate::series::{PeriodView, ViewRow};
use serde::Serialize;

pub const X_TITLE: &str = "Trading Days After Event";
pub const Y_TITLE: &str = "% Change";
pub const LEGEND_TITLE: &str = "Period";

const Y_PADDING: f64 = 0.05;

pub fn chart_title(inflation_adjusted: bool) -> String {
    let mode = if inflation_adjusted {
        "Inflation Adjusted"
    } else {
        "Nominal"
    };
    format!("Performance During Historical Periods ({mode})")
}

/// `Day: 3, Date: 2024-01-05, Change: 1.25%, Early-^GSPC`
pub fn hover_text(row: &ViewRow, trace_name: &str) -> String {
    format!(
        "Day: {}, Date: {}, Change: {:.2}%, {}",
        row.day,
        row.date.format("%Y-%m-%d"),
        row.pct_change,
        trace_name
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    /// `(day, pct_change)` pairs in day order.
    pub points: Vec<(f64, f64)>,
    pub hover: Vec<String>,
}

impl Trace {
    pub fn from_view(view: &PeriodView) -> Self {
        let name = view.name();
        let points = view
            .rows
            .iter()
            .map(|r| (r.day as f64, r.pct_change))
            .collect();
        let hover = view.rows.iter().map(|r| hover_text(r, &name)).collect();
        Self {
            name,
            points,
            hover,
        }
    }

    pub fn hover_at(&self, day: usize) -> Option<&str> {
        self.hover.get(day).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartModel {
    pub title: String,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub legend_title: &'static str,
    pub traces: Vec<Trace>,
}

impl ChartModel {
    pub fn from_comparison(comparison: &Comparison) -> Self {
        Self {
            title: chart_title(comparison.inflation_adjusted),
            x_title: X_TITLE,
            y_title: Y_TITLE,
            legend_title: LEGEND_TITLE,
            traces: comparison.views.iter().map(Trace::from_view).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Last day index any trace reaches.
    pub fn max_day(&self) -> usize {
        self.traces
            .iter()
            .map(|t| t.points.len().saturating_sub(1))
            .max()
            .unwrap_or(0)
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.max_day().max(1) as f64]
    }

    /// Y range over every trace, padded by 5% of the span.
    pub fn y_bounds(&self) -> [f64; 2] {
        let (min, max) = self
            .traces
            .iter()
            .flat_map(|t| t.points.iter().map(|&(_, y)| y))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        if !min.is_finite() || !max.is_finite() {
            return [-1.0, 1.0];
        }
        let span = (max - min).max(1.0);
        let pad = span * Y_PADDING;
        [min - pad, max + pad]
    }

    /// Hover lines of every trace that has a row at `day`.
    pub fn hover_at(&self, day: usize) -> Vec<&str> {
        self.traces.iter().filter_map(|t| t.hover_at(day)).collect()
    }
}
