//! End-to-end tests: CPI cache → comparison pass → chart model, offline.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use marketperf_core::catalog::{Catalog, Instrument};
use marketperf_core::chart::ChartModel;
use marketperf_core::compare::{ComparisonPass, ComparisonRequest};
use marketperf_core::data::{InMemoryProvider, SeriesPoint};
use marketperf_core::inflation::InflationCache;
use marketperf_core::series::BuildError;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn today() -> NaiveDate {
    d(2026, 10, 18)
}

/// Monthly CPI from 1947-01 through 2026-10, rising 0.25 per month.
fn monthly_cpi() -> Vec<SeriesPoint> {
    let mut points = Vec::new();
    let mut date = d(1947, 1, 1);
    let mut value = 21.48;
    while date <= d(2026, 10, 1) {
        points.push(SeriesPoint::new(date, value));
        value += 0.25;
        date = if date.month() == 12 {
            d(date.year() + 1, 1, 1)
        } else {
            d(date.year(), date.month() + 1, 1)
        };
    }
    points
}

/// Weekday closes from 2019-01-02 through 2021-12-31, rising 1 per day.
fn weekday_closes() -> Vec<SeriesPoint> {
    let mut points = Vec::new();
    let mut date = d(2019, 1, 2);
    let mut value = 2500.0;
    while date <= d(2021, 12, 31) {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            points.push(SeriesPoint::new(date, value));
            value += 1.0;
        }
        date += Duration::days(1);
    }
    points
}

fn provider() -> InMemoryProvider {
    InMemoryProvider::new()
        .with_series("CPIAUCSL", monthly_cpi())
        .with_series("^GSPC", weekday_closes())
}

#[test]
fn missing_cache_is_built_once_then_served_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let cache = InflationCache::new(dir.path().join("cpi_cache.csv"), 15);
    let provider = provider();

    let built = cache.load_or_refresh(&provider, today()).unwrap();
    assert_eq!(provider.requests_for("CPIAUCSL"), 1);
    assert!(cache.path().exists());
    assert_eq!(built.first_date(), Some(d(1913, 1, 1)));
    assert_eq!(built.last_date(), Some(d(2026, 10, 1)));

    let reloaded = cache.load_or_refresh(&provider, today()).unwrap();
    assert_eq!(provider.requests_for("CPIAUCSL"), 1);
    assert_eq!(reloaded, built);
}

#[test]
fn stale_cache_is_refreshed_next_month() {
    let dir = tempfile::tempdir().unwrap();
    let cache = InflationCache::new(dir.path().join("cpi_cache.csv"), 15);
    let provider = provider();

    cache.load_or_refresh(&provider, today()).unwrap();
    // On 2026-12-20 the expected month is 2026-12, which the file lacks
    cache.load_or_refresh(&provider, d(2026, 12, 20)).unwrap();
    assert_eq!(provider.requests_for("CPIAUCSL"), 2);
}

#[test]
fn full_pass_over_the_standard_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let cache = InflationCache::new(dir.path().join("cpi_cache.csv"), 15);
    let provider = provider();
    let table = cache.load_or_refresh(&provider, today()).unwrap();
    let catalog = Catalog::standard(today());

    let pass = ComparisonPass::new(&catalog, &table, &provider, "^GSPC");
    let request = ComparisonRequest::new(
        vec![
            "Pandemic (2/19/2020)".into(),
            "Joe Biden (2021)".into(),
            "Herbert Hoover (1929)".into(),
        ],
        vec![Instrument::ticker("^GSPC"), Instrument::Inflation],
        true,
    );
    let comparison = pass.run(&request).unwrap();

    assert_eq!(comparison.base_date, Some(d(1929, 3, 4)));
    assert_eq!(comparison.views.len(), 4);
    assert_eq!(
        comparison.warnings(),
        vec![
            "No data for ^GSPC during Herbert Hoover (1929). Skipping.".to_string(),
            "No data for CPI (Inflation) during Herbert Hoover (1929). Skipping.".to_string(),
        ]
    );
    // ^GSPC is the CPI calendar too, yet it is fetched only once
    assert_eq!(provider.requests_for("^GSPC"), 1);

    let pandemic = &comparison.views[0];
    assert_eq!(pandemic.name(), "Pandemic (2/19/2020)-^GSPC");
    assert!(pandemic.len() <= 100);
    assert_eq!(pandemic.rows[0].date, d(2020, 3, 10));
    assert_eq!(pandemic.rows[0].pct_change, 0.0);
    assert!(pandemic
        .rows
        .iter()
        .all(|r| r.date <= d(2020, 3, 10) + Duration::days(100)));

    // Real returns lag nominal ones while CPI rises
    let last = pandemic.rows.last().unwrap();
    let nominal_pct = last.raw / pandemic.rows[0].raw * 100.0 - 100.0;
    assert!(last.pct_change < nominal_pct);

    let chart = ChartModel::from_comparison(&comparison);
    assert_eq!(
        chart.title,
        "Performance During Historical Periods (Inflation Adjusted)"
    );
    assert_eq!(chart.traces.len(), 4);
    assert_eq!(chart.hover_at(0).len(), 4);
}

#[test]
fn nominal_pass_ignores_the_adjusted_column_for_pct() {
    let dir = tempfile::tempdir().unwrap();
    let cache = InflationCache::new(dir.path().join("cpi_cache.csv"), 15);
    let provider = provider();
    let table = cache.load_or_refresh(&provider, today()).unwrap();
    let catalog = Catalog::standard(today());
    let pass = ComparisonPass::new(&catalog, &table, &provider, "^GSPC");

    let comparison = pass
        .run(&ComparisonRequest::new(
            vec!["Pandemic (2/19/2020)".into()],
            vec![Instrument::ticker("^GSPC")],
            false,
        ))
        .unwrap();
    let view = &comparison.views[0];
    for row in &view.rows {
        let expected = row.raw / view.rows[0].raw * 100.0 - 100.0;
        assert!((row.pct_change - expected).abs() < 1e-9);
    }
}

#[test]
fn missing_ticker_aborts_the_pass() {
    let dir = tempfile::tempdir().unwrap();
    let cache = InflationCache::new(dir.path().join("cpi_cache.csv"), 15);
    let provider = provider();
    let table = cache.load_or_refresh(&provider, today()).unwrap();
    let catalog = Catalog::standard(today());
    let pass = ComparisonPass::new(&catalog, &table, &provider, "^GSPC");

    let err = pass
        .run(&ComparisonRequest::new(
            vec!["Pandemic (2/19/2020)".into()],
            vec![Instrument::ticker("^GSPC"), Instrument::ticker("^N225")],
            false,
        ))
        .unwrap_err();
    assert!(matches!(err, BuildError::Data(_)));
}
