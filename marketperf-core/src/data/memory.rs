//! In-memory provider for tests and offline runs.
//!
//! Serves fixed series from a map and counts every request, so callers can
//! assert that a cache hit made no fetch or that a pass fetched each ticker
//! once.

use super::provider::{DataError, MacroProvider, PriceProvider, SeriesPoint};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct InMemoryProvider {
    series: HashMap<String, Vec<SeriesPoint>>,
    requests: Mutex<Vec<String>>,
    request_count: AtomicUsize,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series under `symbol` (a ticker or a macro series id).
    pub fn with_series(mut self, symbol: &str, points: Vec<SeriesPoint>) -> Self {
        self.series.insert(symbol.to_string(), points);
        self
    }

    /// Total number of requests served or refused.
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Number of requests made for one symbol.
    pub fn requests_for(&self, symbol: &str) -> usize {
        self.requests
            .lock()
            .map(|r| r.iter().filter(|s| s.as_str() == symbol).count())
            .unwrap_or(0)
    }

    fn lookup(&self, symbol: &str) -> Result<Vec<SeriesPoint>, DataError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut log) = self.requests.lock() {
            log.push(symbol.to_string());
        }
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }
}

impl PriceProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn daily_closes(&self, symbol: &str) -> Result<Vec<SeriesPoint>, DataError> {
        self.lookup(symbol)
    }
}

impl MacroProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn monthly_series(
        &self,
        series_id: &str,
        start: NaiveDate,
    ) -> Result<Vec<SeriesPoint>, DataError> {
        Ok(self
            .lookup(series_id)?
            .into_iter()
            .filter(|p| p.date >= start)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn counts_requests_per_symbol() {
        let provider = InMemoryProvider::new()
            .with_series("^GSPC", vec![SeriesPoint::new(d("2024-01-02"), 4742.83)]);

        provider.daily_closes("^GSPC").unwrap();
        provider.daily_closes("^GSPC").unwrap();
        assert!(provider.daily_closes("^DJI").is_err());

        assert_eq!(provider.request_count(), 3);
        assert_eq!(provider.requests_for("^GSPC"), 2);
        assert_eq!(provider.requests_for("^DJI"), 1);
    }

    #[test]
    fn monthly_series_honors_start() {
        let provider = InMemoryProvider::new().with_series(
            "CPIAUCSL",
            vec![
                SeriesPoint::new(d("1946-12-01"), 19.0),
                SeriesPoint::new(d("1947-01-01"), 21.48),
            ],
        );
        let points = provider
            .monthly_series("CPIAUCSL", d("1947-01-01"))
            .unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 21.48);
    }
}
