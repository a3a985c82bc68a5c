//! Per-pass instrument store.
//!
//! One comparison pass fetches each ticker at most once, however many
//! periods it is charted over. The CPI instrument is the monthly index
//! reindexed onto the reference ticker's trading calendar. A store is owned
//! by a single pass and dropped with it; nothing is shared across passes.

use super::align::reindex_time_interpolated;
use crate::catalog::Instrument;
use crate::data::{DataError, PriceProvider, SeriesPoint};
use crate::inflation::IndexTable;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

pub struct InstrumentStore<'a> {
    prices: &'a dyn PriceProvider,
    table: &'a IndexTable,
    reference_ticker: String,
    closes: HashMap<String, Vec<SeriesPoint>>,
    inflation: Option<Vec<SeriesPoint>>,
}

impl<'a> InstrumentStore<'a> {
    pub fn new(
        prices: &'a dyn PriceProvider,
        table: &'a IndexTable,
        reference_ticker: impl Into<String>,
    ) -> Self {
        Self {
            prices,
            table,
            reference_ticker: reference_ticker.into(),
            closes: HashMap::new(),
            inflation: None,
        }
    }

    /// Daily series for `instrument`, fetched on first use.
    pub fn resolve(&mut self, instrument: &Instrument) -> Result<&[SeriesPoint], DataError> {
        match instrument {
            Instrument::Ticker(symbol) => self.closes(symbol),
            Instrument::Inflation => {
                if self.inflation.is_none() {
                    let reference = self.reference_ticker.clone();
                    let calendar: Vec<NaiveDate> =
                        self.closes(&reference)?.iter().map(|p| p.date).collect();
                    let daily = reindex_time_interpolated(&self.table.to_points(), &calendar);
                    debug!(
                        reference = %reference,
                        rows = daily.len(),
                        "reindexed inflation onto trading calendar"
                    );
                    self.inflation = Some(daily);
                }
                Ok(self.inflation.as_deref().unwrap_or_default())
            }
        }
    }

    fn closes(&mut self, symbol: &str) -> Result<&[SeriesPoint], DataError> {
        if self.closes.contains_key(symbol) {
            debug!(symbol, "instrument store hit");
        } else {
            let points = self.prices.daily_closes(symbol)?;
            debug!(symbol, rows = points.len(), provider = self.prices.name(), "fetched closes");
            self.closes.insert(symbol.to_string(), points);
        }
        Ok(self.closes.get(symbol).map(Vec::as_slice).unwrap_or_default())
    }
}
