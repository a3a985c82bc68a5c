//! Inflation index: cached table, freshness rule, and CPI deflation.

pub mod adjust;
pub mod cache;
pub mod seed;
pub mod table;

pub use adjust::{InflationAdjuster, RealBar};
pub use cache::{expected_latest_month, is_fresh, CacheStatus, InflationCache};
pub use table::IndexTable;

use crate::data::DataError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InflationError {
    #[error("no inflation index on or before {date} (table starts {})", describe_start(.earliest))]
    NotFound {
        date: NaiveDate,
        earliest: Option<NaiveDate>,
    },

    #[error("invalid index value {value} at {date}: must be finite and positive")]
    InvalidValue { date: NaiveDate, value: f64 },

    #[error("inflation cache I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("inflation cache CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("macro data: {0}")]
    Data(#[from] DataError),
}

fn describe_start(earliest: &Option<NaiveDate>) -> String {
    match earliest {
        Some(d) => d.to_string(),
        None => "nowhere, it is empty".to_string(),
    }
}
