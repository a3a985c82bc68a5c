//! Data provider traits and structured error types.
//!
//! Two kinds of remote source feed the pipeline: a price provider (daily
//! closes per ticker) and a macro provider (monthly values for a named
//! economic series). Both are traits so tests can swap in
//! [`InMemoryProvider`](super::memory::InMemoryProvider).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One dated observation: a daily close, a monthly index value, or an
/// interpolated daily CPI value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Structured error types for data operations.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} while fetching {symbol}")]
    Http { status: u16, symbol: String },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Source of daily closing prices.
///
/// Implementations return the full available history, oldest first, with
/// split/dividend adjustment already applied.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the daily close series for `symbol` from the earliest available date.
    fn daily_closes(&self, symbol: &str) -> Result<Vec<SeriesPoint>, DataError>;
}

/// Source of monthly macroeconomic series (CPI and friends).
pub trait MacroProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch monthly observations of `series_id` starting at `start`, oldest first.
    fn monthly_series(
        &self,
        series_id: &str,
        start: NaiveDate,
    ) -> Result<Vec<SeriesPoint>, DataError>;
}
