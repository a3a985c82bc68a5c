//! Test helpers: an offline app over fixture data, and buffer inspection.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use marketperf_core::catalog::{Catalog, Instrument, InstrumentEntry, Period, PeriodKind};
use marketperf_core::data::{InMemoryProvider, SeriesPoint};
use marketperf_core::inflation::IndexTable;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use crate::app::AppState;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Two periods (one with data, one before it) and three instruments, of
/// which only `^GSPC` and the CPI have series.
pub fn fixture_app() -> AppState {
    let event = |label: &str, start: NaiveDate| Period {
        label: label.to_string(),
        start,
        duration_days: 100,
        kind: PeriodKind::Event,
    };
    let catalog = Catalog::from_periods(
        vec![
            event("Pandemic (2/19/2020)", d(2020, 3, 10)),
            event("Lehman Brothers Collapses (9/15/2008)", d(2008, 9, 15)),
        ],
        vec![
            InstrumentEntry {
                instrument: Instrument::ticker("^GSPC"),
                description: "S&P 500",
            },
            InstrumentEntry {
                instrument: Instrument::ticker("^DJI"),
                description: "Dow Jones Industrial Average",
            },
            InstrumentEntry {
                instrument: Instrument::Inflation,
                description: "US CPI, all urban consumers",
            },
        ],
    );

    let table = IndexTable::from_points((0..(22 * 12)).map(|i| {
        let date = d(2000 + i / 12, (i % 12) as u32 + 1, 1);
        SeriesPoint::new(date, 170.0 + f64::from(i) * 0.3)
    }))
    .unwrap();

    let mut closes = Vec::new();
    let mut date = d(2019, 1, 2);
    let mut value = 2500.0;
    while date <= d(2021, 12, 31) {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            closes.push(SeriesPoint::new(date, value));
            value *= 1.001;
        }
        date += Duration::days(1);
    }
    let provider = InMemoryProvider::new().with_series("^GSPC", closes);

    AppState::new(catalog, table, Box::new(provider), "^GSPC")
}

/// The rendered buffer as one string per row.
pub fn buffer_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    buffer_lines(terminal).join("\n")
}
