//! Application state: single-owner, main-thread only.
//!
//! Every change to a selection or to the inflation toggle re-runs the
//! comparison pass synchronously and replaces the chart.

use marketperf_core::catalog::{Catalog, Instrument};
use marketperf_core::chart::ChartModel;
use marketperf_core::compare::{ComparisonPass, ComparisonRequest};
use marketperf_core::data::PriceProvider;
use marketperf_core::inflation::IndexTable;
use tracing::{error, info};

/// Cursor jump for `H` / `L` on the chart.
pub const CURSOR_JUMP: usize = 20;

/// Which pane receives list/cursor keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Periods,
    Instruments,
    Chart,
}

impl Focus {
    pub fn label(self) -> &'static str {
        match self {
            Focus::Periods => "Periods",
            Focus::Instruments => "Instruments",
            Focus::Chart => "Chart",
        }
    }

    pub fn next(self) -> Focus {
        match self {
            Focus::Periods => Focus::Instruments,
            Focus::Instruments => Focus::Chart,
            Focus::Chart => Focus::Periods,
        }
    }

    pub fn prev(self) -> Focus {
        match self {
            Focus::Periods => Focus::Chart,
            Focus::Instruments => Focus::Periods,
            Focus::Chart => Focus::Instruments,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// One selectable row: a label plus a muted detail column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub label: String,
    pub detail: String,
}

/// Multi-select list that remembers the order items were picked in.
#[derive(Debug, Clone, Default)]
pub struct SelectList {
    pub items: Vec<SelectItem>,
    pub cursor: usize,
    picked: Vec<usize>,
}

impl SelectList {
    pub fn new(items: Vec<SelectItem>) -> Self {
        Self {
            items,
            cursor: 0,
            picked: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Pick or unpick the row under the cursor.
    pub fn toggle(&mut self) {
        if self.items.is_empty() {
            return;
        }
        if let Some(pos) = self.picked.iter().position(|&i| i == self.cursor) {
            self.picked.remove(pos);
        } else {
            self.picked.push(self.cursor);
        }
    }

    pub fn clear(&mut self) {
        self.picked.clear();
    }

    pub fn is_picked(&self, index: usize) -> bool {
        self.picked.contains(&index)
    }

    pub fn picked_count(&self) -> usize {
        self.picked.len()
    }

    /// Labels in the order they were picked.
    pub fn picked_labels(&self) -> Vec<String> {
        self.picked
            .iter()
            .filter_map(|&i| self.items.get(i))
            .map(|item| item.label.clone())
            .collect()
    }
}

pub struct AppState {
    pub running: bool,
    pub focus: Focus,
    pub periods: SelectList,
    pub instruments: SelectList,
    pub inflation_adjusted: bool,
    pub chart: Option<ChartModel>,
    /// Day index under the chart cursor.
    pub cursor_day: usize,
    pub status_message: Option<(String, StatusLevel)>,
    catalog: Catalog,
    table: IndexTable,
    prices: Box<dyn PriceProvider>,
    reference_ticker: String,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        table: IndexTable,
        prices: Box<dyn PriceProvider>,
        reference_ticker: impl Into<String>,
    ) -> Self {
        let periods = SelectList::new(
            catalog
                .periods()
                .iter()
                .map(|p| SelectItem {
                    label: p.label.clone(),
                    detail: format!("{} · {}d", p.start, p.duration_days),
                })
                .collect(),
        );
        let instruments = SelectList::new(
            catalog
                .instruments()
                .iter()
                .map(|e| SelectItem {
                    label: e.instrument.label().to_string(),
                    detail: e.description.to_string(),
                })
                .collect(),
        );
        Self {
            running: true,
            focus: Focus::Periods,
            periods,
            instruments,
            inflation_adjusted: false,
            chart: None,
            cursor_day: 0,
            status_message: Some((
                "Select periods and instruments to compare".into(),
                StatusLevel::Info,
            )),
            catalog,
            table,
            prices,
            reference_ticker: reference_ticker.into(),
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>, level: StatusLevel) {
        self.status_message = Some((msg.into(), level));
    }

    pub fn request(&self) -> ComparisonRequest {
        ComparisonRequest::new(
            self.periods.picked_labels(),
            self.instruments
                .picked_labels()
                .iter()
                .map(|label| Instrument::from_label(label))
                .collect(),
            self.inflation_adjusted,
        )
    }

    /// Run one comparison pass for the current selection.
    pub fn recompute(&mut self) {
        let request = self.request();
        if request.is_empty() {
            self.chart = None;
            self.cursor_day = 0;
            self.set_status(
                "Select at least one period and one instrument",
                StatusLevel::Info,
            );
            return;
        }

        let pass = ComparisonPass::new(
            &self.catalog,
            &self.table,
            self.prices.as_ref(),
            &self.reference_ticker,
        );
        match pass.run(&request) {
            Ok(comparison) => {
                let warnings = comparison.warnings();
                let chart = ChartModel::from_comparison(&comparison);
                info!(
                    traces = chart.traces.len(),
                    skipped = warnings.len(),
                    adjusted = request.inflation_adjusted,
                    "comparison pass complete"
                );
                self.cursor_day = self.cursor_day.min(chart.max_day());
                if warnings.is_empty() {
                    let mode = if request.inflation_adjusted {
                        "inflation adjusted"
                    } else {
                        "nominal"
                    };
                    self.set_status(
                        format!("{} series, {mode}", chart.traces.len()),
                        StatusLevel::Info,
                    );
                } else {
                    self.set_status(warnings.join(" "), StatusLevel::Warning);
                }
                self.chart = Some(chart);
            }
            Err(e) => {
                error!(error = %e, "comparison pass failed");
                self.chart = None;
                self.cursor_day = 0;
                self.set_status(e.to_string(), StatusLevel::Error);
            }
        }
    }

    pub fn toggle_inflation(&mut self) {
        self.inflation_adjusted = !self.inflation_adjusted;
        self.recompute();
    }

    /// The list the focus is on, if any.
    pub fn focused_list(&mut self) -> Option<&mut SelectList> {
        match self.focus {
            Focus::Periods => Some(&mut self.periods),
            Focus::Instruments => Some(&mut self.instruments),
            Focus::Chart => None,
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let max = self.chart.as_ref().map_or(0, ChartModel::max_day);
        let next = self.cursor_day.saturating_add_signed(delta);
        self.cursor_day = next.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::fixture_app;

    #[test]
    fn focus_cycles_both_ways() {
        assert_eq!(Focus::Periods.next(), Focus::Instruments);
        assert_eq!(Focus::Chart.next(), Focus::Periods);
        assert_eq!(Focus::Periods.prev(), Focus::Chart);
    }

    #[test]
    fn select_list_keeps_pick_order() {
        let mut list = SelectList::new(
            ["a", "b", "c"]
                .iter()
                .map(|l| SelectItem {
                    label: l.to_string(),
                    detail: String::new(),
                })
                .collect(),
        );
        list.cursor = 2;
        list.toggle();
        list.cursor = 0;
        list.toggle();
        assert_eq!(list.picked_labels(), vec!["c", "a"]);

        list.toggle();
        assert_eq!(list.picked_labels(), vec!["c"]);
        list.clear();
        assert_eq!(list.picked_count(), 0);
    }

    #[test]
    fn cursor_stays_in_list() {
        let mut app = fixture_app();
        app.periods.move_up();
        assert_eq!(app.periods.cursor, 0);
        for _ in 0..100 {
            app.periods.move_down();
        }
        assert_eq!(app.periods.cursor, app.periods.len() - 1);
    }

    #[test]
    fn empty_selection_clears_chart() {
        let mut app = fixture_app();
        app.recompute();
        assert!(app.chart.is_none());
        assert_eq!(app.status_message.as_ref().map(|s| s.1), Some(StatusLevel::Info));
    }

    #[test]
    fn selection_builds_chart() {
        let mut app = fixture_app();
        app.periods.toggle();
        app.instruments.toggle();
        app.recompute();

        let chart = app.chart.as_ref().unwrap();
        assert_eq!(chart.traces.len(), 1);
        assert_eq!(chart.traces[0].name, "Pandemic (2/19/2020)-^GSPC");
        assert_eq!(chart.title, "Performance During Historical Periods (Nominal)");

        app.toggle_inflation();
        let chart = app.chart.as_ref().unwrap();
        assert_eq!(
            chart.title,
            "Performance During Historical Periods (Inflation Adjusted)"
        );
    }

    #[test]
    fn skipped_pair_is_a_warning() {
        let mut app = fixture_app();
        app.periods.cursor = 1; // Lehman, before the fixture data
        app.periods.toggle();
        app.periods.cursor = 0;
        app.periods.toggle();
        app.instruments.toggle();
        app.recompute();

        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Warning);
        assert!(msg.contains("No data for ^GSPC during Lehman Brothers Collapses (9/15/2008). Skipping."));
        assert_eq!(app.chart.as_ref().unwrap().traces.len(), 1);
    }

    #[test]
    fn provider_error_clears_chart_and_reports() {
        let mut app = fixture_app();
        app.periods.toggle();
        app.instruments.toggle();
        app.recompute();
        assert!(app.chart.is_some());

        app.instruments.cursor = 1; // ^DJI has no fixture series
        app.instruments.toggle();
        app.recompute();
        assert!(app.chart.is_none());
        assert_eq!(app.status_message.as_ref().map(|s| s.1), Some(StatusLevel::Error));
    }

    #[test]
    fn chart_cursor_is_clamped() {
        let mut app = fixture_app();
        app.periods.toggle();
        app.instruments.toggle();
        app.recompute();
        let max = app.chart.as_ref().unwrap().max_day();

        app.move_cursor(-5);
        assert_eq!(app.cursor_day, 0);
        app.move_cursor(10_000);
        assert_eq!(app.cursor_day, max);
    }
}
