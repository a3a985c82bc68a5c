//! CPI deflation: restate nominal values in the purchasing power of a base date.
//!
//! `real(d) = nominal(d) * index(base) / index(d)`, evaluated pointwise, so
//! adjusting the same raw input twice gives the same output.

use super::table::IndexTable;
use super::InflationError;
use crate::data::SeriesPoint;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A close restated in base-date dollars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealBar {
    pub date: NaiveDate,
    pub close: f64,
    pub real_close: f64,
    /// Fractional change of `real_close` from the previous row; `None` on the first.
    pub real_return: Option<f64>,
}

/// Deflates series against a borrowed index table.
#[derive(Debug, Clone, Copy)]
pub struct InflationAdjuster<'a> {
    table: &'a IndexTable,
}

impl<'a> InflationAdjuster<'a> {
    pub fn new(table: &'a IndexTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a IndexTable {
        self.table
    }

    /// Index value in force on `date`.
    pub fn lookup_index_on_or_before(&self, date: NaiveDate) -> Result<f64, InflationError> {
        self.table.lookup_on_or_before(date)
    }

    /// Deflate a single-column series into `base_date` purchasing power.
    pub fn adjust_series(
        &self,
        series: &[SeriesPoint],
        base_date: NaiveDate,
    ) -> Result<Vec<SeriesPoint>, InflationError> {
        let base = self.lookup_index_on_or_before(base_date)?;
        series
            .iter()
            .map(|p| {
                let index = self.lookup_index_on_or_before(p.date)?;
                Ok(SeriesPoint::new(p.date, p.value * (base / index)))
            })
            .collect()
    }

    /// Deflate a close column and derive the period-over-period real return.
    pub fn adjust_closes(
        &self,
        closes: &[SeriesPoint],
        base_date: NaiveDate,
    ) -> Result<Vec<RealBar>, InflationError> {
        let real = self.adjust_series(closes, base_date)?;
        let mut bars = Vec::with_capacity(real.len());
        let mut prev: Option<f64> = None;
        for (nominal, adjusted) in closes.iter().zip(real.iter()) {
            bars.push(RealBar {
                date: nominal.date,
                close: nominal.value,
                real_close: adjusted.value,
                real_return: prev.map(|p| adjusted.value / p - 1.0),
            });
            prev = Some(adjusted.value);
        }
        Ok(bars)
    }
}
