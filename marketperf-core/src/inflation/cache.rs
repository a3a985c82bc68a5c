//! CSV cache for the inflation index with a month-based freshness rule.
//!
//! Layout: a single file with header `DATE,CPIAUCSL`.
//!
//! - Fresh when the month CPI should be published for by `today` is present
//! - Stale or missing: rebuild from the seed table plus a macro pull
//! - Atomic writes (write to .tmp, rename into place)
//! - A file that fails to parse is treated as missing and rebuilt

use super::seed::early_cpi;
use super::table::IndexTable;
use super::InflationError;
use crate::data::{MacroProvider, SeriesPoint};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SERIES_ID: &str = "CPIAUCSL";
pub const DEFAULT_FRESHNESS_DAY: u32 = 15;

/// First date of the monthly macro pull; the seed table covers everything before.
pub fn default_macro_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1947, 1, 1).unwrap_or_default()
}

/// One row of the cache file.
#[derive(Debug, Serialize, Deserialize)]
struct CacheRow {
    #[serde(rename = "DATE")]
    date: NaiveDate,
    #[serde(rename = "CPIAUCSL")]
    value: f64,
}

/// The month whose index value should be available as of `today`.
///
/// After `freshness_day` it is the current month; on or before it, the
/// previous one.
pub fn expected_latest_month(today: NaiveDate, freshness_day: u32) -> NaiveDate {
    let (year, month) = if today.day() > freshness_day {
        (today.year(), today.month())
    } else if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today)
}

/// Whether `table` already holds the expected month for `today`.
pub fn is_fresh(table: &IndexTable, today: NaiveDate, freshness_day: u32) -> bool {
    table.contains(expected_latest_month(today, freshness_day))
}

/// Snapshot of the cache file for status reporting. Never touches the network.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub path: PathBuf,
    pub present: bool,
    pub rows: usize,
    pub first_month: Option<NaiveDate>,
    pub last_month: Option<NaiveDate>,
    pub expected_month: NaiveDate,
    pub fresh: bool,
}

/// The inflation cache file and its refresh policy.
#[derive(Debug, Clone)]
pub struct InflationCache {
    path: PathBuf,
    freshness_day: u32,
    series_id: String,
    macro_start: NaiveDate,
}

impl InflationCache {
    pub fn new(path: impl Into<PathBuf>, freshness_day: u32) -> Self {
        Self {
            path: path.into(),
            freshness_day,
            series_id: DEFAULT_SERIES_ID.to_string(),
            macro_start: default_macro_start(),
        }
    }

    /// Override which macro series is pulled and from when.
    pub fn with_series(mut self, series_id: impl Into<String>, start: NaiveDate) -> Self {
        self.series_id = series_id.into();
        self.macro_start = start;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn freshness_day(&self) -> u32 {
        self.freshness_day
    }

    /// Return the cached table if fresh; otherwise rebuild, persist and return it.
    pub fn load_or_refresh(
        &self,
        provider: &dyn MacroProvider,
        today: NaiveDate,
    ) -> Result<IndexTable, InflationError> {
        if let Some(table) = self.load_existing()? {
            if is_fresh(&table, today, self.freshness_day) {
                tracing::debug!(path = %self.path.display(), rows = table.len(), "inflation cache is fresh");
                return Ok(table);
            }
            tracing::info!(
                expected = %expected_latest_month(today, self.freshness_day),
                last = ?table.last_date(),
                "inflation data is outdated, refreshing"
            );
        } else {
            tracing::info!(path = %self.path.display(), "inflation cache missing, downloading");
        }

        self.refresh(provider)
    }

    /// Rebuild the table unconditionally: seed + macro pull, written to disk.
    pub fn refresh(&self, provider: &dyn MacroProvider) -> Result<IndexTable, InflationError> {
        let pulled = provider.monthly_series(&self.series_id, self.macro_start)?;
        tracing::debug!(
            provider = provider.name(),
            series = %self.series_id,
            rows = pulled.len(),
            "pulled macro series"
        );

        let table = IndexTable::merge_seed_first(early_cpi(), pulled)?;
        self.write(&table)?;
        tracing::info!(
            path = %self.path.display(),
            rows = table.len(),
            "saved combined inflation data"
        );
        Ok(table)
    }

    /// Read the cache file without any freshness decision.
    ///
    /// `Ok(None)` when the file is absent, empty, or fails to parse. Errors
    /// reading the file itself are returned.
    pub fn load_existing(&self) -> Result<Option<IndexTable>, InflationError> {
        if !self.path.exists() {
            return Ok(None);
        }
        match read_table(&self.path) {
            Ok(table) if table.is_empty() => Ok(None),
            Ok(table) => Ok(Some(table)),
            Err(InflationError::Io(e)) => Err(InflationError::Io(e)),
            Err(InflationError::Csv(e)) if e.is_io_error() => Err(InflationError::Csv(e)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring unreadable inflation cache"
                );
                Ok(None)
            }
        }
    }

    pub fn status(&self, today: NaiveDate) -> Result<CacheStatus, InflationError> {
        let table = self.load_existing()?;
        let expected_month = expected_latest_month(today, self.freshness_day);
        Ok(CacheStatus {
            path: self.path.clone(),
            present: table.is_some(),
            rows: table.as_ref().map(|t| t.len()).unwrap_or(0),
            first_month: table.as_ref().and_then(|t| t.first_date()),
            last_month: table.as_ref().and_then(|t| t.last_date()),
            expected_month,
            fresh: table.as_ref().is_some_and(|t| t.contains(expected_month)),
        })
    }

    /// Write the table atomically: write to `.tmp`, then rename into place.
    fn write(&self, table: &IndexTable) -> Result<(), InflationError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = tmp_path_for(&self.path);
        let result = write_rows(&tmp_path, table)
            .and_then(|()| fs::rename(&tmp_path, &self.path).map_err(InflationError::Io));
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }
}

fn write_rows(path: &Path, table: &IndexTable) -> Result<(), InflationError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for p in table.iter() {
        wtr.serialize(CacheRow {
            date: p.date,
            value: p.value,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn read_table(path: &Path) -> Result<IndexTable, InflationError> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut points = Vec::new();
    for row in rdr.deserialize() {
        let row: CacheRow = row?;
        points.push(SeriesPoint::new(row.date, row.value));
    }
    IndexTable::from_points(points)
}
