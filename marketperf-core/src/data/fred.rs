//! FRED macro provider.
//!
//! Pulls monthly series from the St. Louis Fed's public graph CSV endpoint,
//! which needs no API key. The file has a date column followed by a value
//! column; missing observations are written as `.`.

use super::provider::{DataError, MacroProvider, SeriesPoint};
use chrono::NaiveDate;
use std::time::Duration;

pub struct FredProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl FredProvider {
    pub fn new(timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: "https://fred.stlouisfed.org".to_string(),
        })
    }

    fn csv_url(&self, series_id: &str, start: NaiveDate) -> String {
        format!(
            "{}/graph/fredgraph.csv?id={series_id}&cosd={}",
            self.base_url,
            start.format("%Y-%m-%d")
        )
    }
}

/// Parse a FRED graph CSV body.
///
/// The header names vary between `DATE` and `observation_date`, so columns
/// are read by position.
pub fn parse_fred_csv(series_id: &str, body: &str) -> Result<Vec<SeriesPoint>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DataError::ResponseFormatChanged(format!("FRED header: {e}")))?;
    if headers.len() < 2 {
        return Err(DataError::ResponseFormatChanged(format!(
            "expected date and value columns for {series_id}, got {} column(s)",
            headers.len()
        )));
    }

    let mut points = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| DataError::ResponseFormatChanged(format!("FRED row {row}: {e}")))?;

        let (Some(date_str), Some(value_str)) = (record.get(0), record.get(1)) else {
            continue;
        };
        if value_str == "." || value_str.is_empty() {
            continue;
        }

        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            DataError::ResponseFormatChanged(format!("bad date '{date_str}' at row {row}: {e}"))
        })?;
        let value: f64 = value_str.parse().map_err(|e| {
            DataError::ResponseFormatChanged(format!("bad value '{value_str}' at row {row}: {e}"))
        })?;

        points.push(SeriesPoint::new(date, value));
    }

    if points.is_empty() {
        return Err(DataError::SymbolNotFound {
            symbol: series_id.to_string(),
        });
    }

    points.sort_by_key(|p| p.date);
    Ok(points)
}

impl MacroProvider for FredProvider {
    fn name(&self) -> &str {
        "fred"
    }

    fn monthly_series(
        &self,
        series_id: &str,
        start: NaiveDate,
    ) -> Result<Vec<SeriesPoint>, DataError> {
        let url = self.csv_url(series_id, start);
        tracing::debug!(series_id, %url, "fetching macro series");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                symbol: series_id.to_string(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| DataError::ResponseFormatChanged(format!("FRED body: {e}")))?;

        let points = parse_fred_csv(series_id, &body)?;
        Ok(points.into_iter().filter(|p| p.date >= start).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_observation_date_header() {
        let body = "observation_date,CPIAUCSL\n1947-01-01,21.48\n1947-02-01,21.62\n";
        let points = parse_fred_csv("CPIAUCSL", body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(1947, 1, 1).unwrap());
        assert_eq!(points[1].value, 21.62);
    }

    #[test]
    fn parses_legacy_date_header_and_skips_missing() {
        let body = "DATE,CPIAUCSL\n2024-01-01,308.417\n2024-02-01,.\n2024-03-01,312.230\n";
        let points = parse_fred_csv("CPIAUCSL", body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn single_column_is_format_change() {
        let body = "DATE\n2024-01-01\n";
        assert!(matches!(
            parse_fred_csv("CPIAUCSL", body),
            Err(DataError::ResponseFormatChanged(_))
        ));
    }

    #[test]
    fn header_only_is_not_found() {
        let body = "DATE,CPIAUCSL\n";
        assert!(matches!(
            parse_fred_csv("CPIAUCSL", body),
            Err(DataError::SymbolNotFound { .. })
        ));
    }

    #[test]
    fn csv_url_carries_series_and_start() {
        let provider = FredProvider::new(Duration::from_secs(5)).unwrap();
        let url = provider.csv_url("CPIAUCSL", NaiveDate::from_ymd_opt(1947, 1, 1).unwrap());
        assert!(url.ends_with("fredgraph.csv?id=CPIAUCSL&cosd=1947-01-01"));
    }
}
