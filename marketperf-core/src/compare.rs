//! One comparison pass: the whole pipeline for the current selection.
//!
//! The pass owns an [`InstrumentStore`] so each ticker is downloaded at most
//! once, derives the shared inflation base date from the selected periods,
//! and builds every (instrument, period) view. Pairs whose window holds no
//! data are skipped with a warning; any provider or index failure aborts the
//! pass.

use crate::catalog::{Catalog, Instrument};
use crate::data::PriceProvider;
use crate::inflation::IndexTable;
use crate::series::{BuildError, InstrumentStore, PeriodView, SeriesBuilder, ViewOutcome};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// What the user selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub periods: Vec<String>,
    pub instruments: Vec<Instrument>,
    pub inflation_adjusted: bool,
}

impl ComparisonRequest {
    pub fn new(periods: Vec<String>, instruments: Vec<Instrument>, inflation_adjusted: bool) -> Self {
        Self {
            periods,
            instruments,
            inflation_adjusted,
        }
    }

    /// True when either list is empty: there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty() || self.instruments.is_empty()
    }
}

/// A (period, instrument) pair left out because its window had no rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPair {
    pub period: String,
    pub instrument: Instrument,
}

impl fmt::Display for SkippedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No data for {} during {}. Skipping.",
            self.instrument, self.period
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comparison {
    pub inflation_adjusted: bool,
    /// Earliest start among the selected periods; `None` when none are selected.
    pub base_date: Option<NaiveDate>,
    pub views: Vec<PeriodView>,
    pub skipped: Vec<SkippedPair>,
}

impl Comparison {
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.skipped.iter().map(ToString::to_string).collect()
    }

    /// Longest view in trading days.
    pub fn max_len(&self) -> usize {
        self.views.iter().map(PeriodView::len).max().unwrap_or(0)
    }
}

/// Borrowed inputs shared by every pass of a session.
pub struct ComparisonPass<'a> {
    catalog: &'a Catalog,
    table: &'a IndexTable,
    prices: &'a dyn PriceProvider,
    reference_ticker: &'a str,
}

impl<'a> ComparisonPass<'a> {
    pub fn new(
        catalog: &'a Catalog,
        table: &'a IndexTable,
        prices: &'a dyn PriceProvider,
        reference_ticker: &'a str,
    ) -> Self {
        Self {
            catalog,
            table,
            prices,
            reference_ticker,
        }
    }

    pub fn run(&self, request: &ComparisonRequest) -> Result<Comparison, BuildError> {
        let base_date = self.catalog.earliest_start(&request.periods)?;
        let mut comparison = Comparison {
            inflation_adjusted: request.inflation_adjusted,
            base_date,
            ..Comparison::default()
        };
        let Some(base_date) = base_date else {
            return Ok(comparison);
        };

        let periods = request
            .periods
            .iter()
            .map(|label| self.catalog.period(label))
            .collect::<Result<Vec<_>, _>>()?;

        let mut store = InstrumentStore::new(self.prices, self.table, self.reference_ticker);
        let builder = SeriesBuilder::new(self.table);

        for instrument in &request.instruments {
            let raw = store.resolve(instrument)?;
            for period in &periods {
                match builder.build_view(
                    instrument,
                    raw,
                    period,
                    request.inflation_adjusted,
                    base_date,
                )? {
                    ViewOutcome::View(view) => {
                        debug!(series = %view.name(), rows = view.len(), "built view");
                        comparison.views.push(view);
                    }
                    ViewOutcome::Empty => {
                        let skipped = SkippedPair {
                            period: period.label.clone(),
                            instrument: instrument.clone(),
                        };
                        warn!("{skipped}");
                        comparison.skipped.push(skipped);
                    }
                }
            }
        }

        Ok(comparison)
    }
}
