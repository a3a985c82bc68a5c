//! Period and instrument catalog.
//!
//! Periods are presidential terms and market events, each with a start date
//! and a window length in days. Open-ended periods (the current term, recent
//! events) run up to the date the catalog is built for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Label of the synthetic CPI instrument.
pub const INFLATION_LABEL: &str = "CPI (Inflation)";

/// Default broad-market ticker whose trading calendar CPI is reindexed onto.
pub const REFERENCE_TICKER: &str = "^GSPC";

/// Window length of crash and event periods.
pub const EVENT_WINDOW_DAYS: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown period '{0}'")]
    UnknownPeriod(String),

    #[error("unknown instrument '{0}'")]
    UnknownInstrument(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodKind {
    Presidency,
    Event,
}

/// A named historical window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub label: String,
    pub start: NaiveDate,
    pub duration_days: i64,
    pub kind: PeriodKind,
}

impl Period {
    /// Last calendar date of the window (inclusive). Saturates at the
    /// calendar's end for windows too long to represent.
    pub fn end(&self) -> NaiveDate {
        chrono::Duration::try_days(self.duration_days)
            .and_then(|span| self.start.checked_add_signed(span))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// A ticker symbol or the synthetic inflation series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Instrument {
    Ticker(String),
    Inflation,
}

impl Instrument {
    pub fn ticker(symbol: &str) -> Self {
        Instrument::Ticker(symbol.to_string())
    }

    /// Parse a display label; [`INFLATION_LABEL`] maps to the CPI instrument.
    pub fn from_label(label: &str) -> Self {
        if label == INFLATION_LABEL {
            Instrument::Inflation
        } else {
            Instrument::Ticker(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Instrument::Ticker(symbol) => symbol,
            Instrument::Inflation => INFLATION_LABEL,
        }
    }

    pub fn is_inflation(&self) -> bool {
        matches!(self, Instrument::Inflation)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An instrument offered for selection, with a human description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentEntry {
    pub instrument: Instrument,
    pub description: &'static str,
}

const INSTRUMENTS: [(&str, &str); 16] = [
    ("^GSPC", "S&P 500"),
    ("^DJI", "Dow Jones Industrial Average"),
    ("^IXIC", "NASDAQ Composite"),
    ("^RUT", "Russell 2000"),
    ("^NYA", "NYSE Composite"),
    ("^VIX", "Volatility Index"),
    (INFLATION_LABEL, "US CPI, all urban consumers"),
    ("^STOXX50E", "Euro Stoxx 50 (Europe)"),
    ("^FTSE", "FTSE 100 (UK)"),
    ("^N225", "Nikkei 225 (Japan)"),
    ("^HSI", "Hang Seng Index (Hong Kong)"),
    ("^BVSP", "Bovespa (Brazil)"),
    ("^AXJO", "ASX 200 (Australia)"),
    ("^SSEC", "Shanghai Composite (China)"),
    ("^GDAXI", "DAX (Germany)"),
    ("^FCHI", "CAC 40 (France)"),
];

/// Presidential terms: label, start, and the start of the following term.
/// `None` means the term is still running.
const PRESIDENCIES: [(&str, (i32, u32, u32), Option<(i32, u32, u32)>); 20] = [
    ("Donald Trump (2025)", (2025, 1, 20), None),
    ("Joe Biden (2021)", (2021, 1, 20), Some((2025, 1, 20))),
    ("Donald Trump (2017)", (2017, 1, 20), Some((2021, 1, 20))),
    ("Barack Obama (2009)", (2009, 1, 20), Some((2017, 1, 20))),
    ("George W. Bush (2001)", (2001, 1, 20), Some((2009, 1, 20))),
    ("Bill Clinton (1993)", (1993, 1, 20), Some((2001, 1, 20))),
    ("George H. W. Bush (1989)", (1989, 1, 20), Some((1993, 1, 20))),
    ("Ronald Reagan (1981)", (1981, 1, 20), Some((1989, 1, 20))),
    ("Jimmy Carter (1977)", (1977, 1, 20), Some((1981, 1, 20))),
    ("Gerald Ford (1974)", (1974, 8, 9), Some((1977, 1, 20))),
    ("Richard Nixon (1969)", (1969, 1, 20), Some((1974, 8, 9))),
    ("Lyndon B. Johnson (1963)", (1963, 11, 22), Some((1969, 1, 20))),
    ("John F. Kennedy (1961)", (1961, 1, 20), Some((1963, 11, 22))),
    ("Dwight D. Eisenhower (1953)", (1953, 1, 20), Some((1961, 1, 20))),
    ("Harry S. Truman (1945)", (1945, 4, 12), Some((1953, 1, 20))),
    ("FDR 1 (1933–1937)", (1933, 3, 4), Some((1937, 1, 20))),
    ("FDR 2 (1937–1941)", (1937, 1, 20), Some((1941, 1, 20))),
    ("FDR 3 (1941–1945)", (1941, 1, 20), Some((1945, 1, 20))),
    ("FDR 4 (1945)", (1945, 1, 20), Some((1945, 4, 12))),
    ("Herbert Hoover (1929)", (1929, 3, 4), Some((1933, 3, 4))),
];

/// Market events: label, window start, and whether the window runs to today
/// instead of the fixed event length.
const EVENTS: [(&str, (i32, u32, u32), bool); 8] = [
    ("Black Thursday (10/24/1929)", (1929, 10, 23), false),
    ("Black Monday (10/19/1987)", (1987, 10, 16), false),
    ("Peak of Dot Com Bubble (3/10/2000)", (2000, 3, 10), false),
    ("Subprime Cracks Emerge (2/1/2007)", (2007, 2, 1), false),
    ("Liquidity Freeze (8/9/2007)", (2007, 8, 9), false),
    ("Lehman Brothers Collapses (9/15/2008)", (2008, 9, 15), false),
    ("Pandemic (2/19/2020)", (2020, 3, 10), false),
    ("Liberation Day (4/2/2025)", (2025, 4, 2), true),
];

/// The immutable catalog, built once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    periods: Vec<Period>,
    instruments: Vec<InstrumentEntry>,
}

impl Catalog {
    /// The standard catalog, with open-ended windows measured up to `today`.
    pub fn standard(today: NaiveDate) -> Self {
        let mut periods = Vec::with_capacity(PRESIDENCIES.len() + EVENTS.len());

        for (label, start, next) in PRESIDENCIES {
            let start = ymd(start);
            let end = next.map(ymd).unwrap_or(today);
            periods.push(Period {
                label: label.to_string(),
                start,
                duration_days: (end - start).num_days().max(0),
                kind: PeriodKind::Presidency,
            });
        }

        for (label, start, open_ended) in EVENTS {
            let start = ymd(start);
            let duration_days = if open_ended {
                (today - start).num_days().max(0)
            } else {
                EVENT_WINDOW_DAYS
            };
            periods.push(Period {
                label: label.to_string(),
                start,
                duration_days,
                kind: PeriodKind::Event,
            });
        }

        let instruments = INSTRUMENTS
            .iter()
            .map(|&(label, description)| InstrumentEntry {
                instrument: Instrument::from_label(label),
                description,
            })
            .collect();

        Self {
            periods,
            instruments,
        }
    }

    /// Build a catalog from explicit periods (fixtures, custom sets).
    pub fn from_periods(periods: Vec<Period>, instruments: Vec<InstrumentEntry>) -> Self {
        Self {
            periods,
            instruments,
        }
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn instruments(&self) -> &[InstrumentEntry] {
        &self.instruments
    }

    pub fn period(&self, label: &str) -> Result<&Period, CatalogError> {
        self.periods
            .iter()
            .find(|p| p.label == label)
            .ok_or_else(|| CatalogError::UnknownPeriod(label.to_string()))
    }

    pub fn instrument(&self, label: &str) -> Result<&InstrumentEntry, CatalogError> {
        self.instruments
            .iter()
            .find(|e| e.instrument.label() == label)
            .ok_or_else(|| CatalogError::UnknownInstrument(label.to_string()))
    }

    /// Earliest start among the selected periods.
    ///
    /// `Ok(None)` means nothing is selected; it never falls back to a date.
    pub fn earliest_start<S: AsRef<str>>(
        &self,
        labels: &[S],
    ) -> Result<Option<NaiveDate>, CatalogError> {
        let mut earliest: Option<NaiveDate> = None;
        for label in labels {
            let start = self.period(label.as_ref())?.start;
            earliest = Some(earliest.map_or(start, |e| e.min(start)));
        }
        Ok(earliest)
    }
}

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn every_period_has_a_positive_window() {
        let catalog = Catalog::standard(today());
        assert_eq!(catalog.periods().len(), 28);
        assert!(catalog.periods().iter().all(|p| p.duration_days > 0));
    }

    #[test]
    fn closed_terms_run_to_the_next_inauguration() {
        let catalog = Catalog::standard(today());
        let biden = catalog.period("Joe Biden (2021)").unwrap();
        assert_eq!(biden.duration_days, 1461);
        assert_eq!(biden.end(), NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
    }

    #[test]
    fn open_periods_run_to_today() {
        let catalog = Catalog::standard(today());
        let current = catalog.period("Donald Trump (2025)").unwrap();
        assert_eq!(current.end(), today());
        let tariffs = catalog.period("Liberation Day (4/2/2025)").unwrap();
        assert_eq!(tariffs.end(), today());
    }

    #[test]
    fn oversized_window_end_saturates() {
        let period = Period {
            label: "Forever".into(),
            start: today(),
            duration_days: i64::MAX,
            kind: PeriodKind::Event,
        };
        assert_eq!(period.end(), NaiveDate::MAX);
    }

    #[test]
    fn events_use_fixed_window() {
        let catalog = Catalog::standard(today());
        let lehman = catalog
            .period("Lehman Brothers Collapses (9/15/2008)")
            .unwrap();
        assert_eq!(lehman.duration_days, EVENT_WINDOW_DAYS);
        assert_eq!(lehman.kind, PeriodKind::Event);
    }

    #[test]
    fn earliest_start_picks_minimum() {
        let catalog = Catalog::standard(today());
        let earliest = catalog
            .earliest_start(&["Barack Obama (2009)", "Black Monday (10/19/1987)"])
            .unwrap();
        assert_eq!(earliest, NaiveDate::from_ymd_opt(1987, 10, 16));
    }

    #[test]
    fn earliest_start_of_nothing_is_none() {
        let catalog = Catalog::standard(today());
        let none: [&str; 0] = [];
        assert_eq!(catalog.earliest_start(&none).unwrap(), None);
    }

    #[test]
    fn earliest_start_rejects_unknown_label() {
        let catalog = Catalog::standard(today());
        assert_eq!(
            catalog.earliest_start(&["Not A President"]),
            Err(CatalogError::UnknownPeriod("Not A President".into()))
        );
    }

    #[test]
    fn inflation_label_round_trips() {
        let catalog = Catalog::standard(today());
        let entry = catalog.instrument(INFLATION_LABEL).unwrap();
        assert!(entry.instrument.is_inflation());
        assert_eq!(Instrument::from_label("^GSPC"), Instrument::ticker("^GSPC"));
        assert_eq!(catalog.instruments().len(), 16);
    }
}
