//! Yahoo Finance price provider.
//!
//! Fetches the full daily history of a symbol from Yahoo's v8 chart API and
//! keeps one adjusted close per trading day. Yahoo has no official API and
//! is subject to unannounced format changes; any failure surfaces as a
//! [`DataError`] and is not retried.

use super::provider::{DataError, PriceProvider, SeriesPoint};
use serde::Deserialize;
use std::time::Duration;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance price provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new(timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: "https://query2.finance.yahoo.com".to_string(),
        })
    }

    /// Build the chart API URL for the full daily history of a symbol.
    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{symbol}?range=max&interval=1d&includeAdjustedClose=true",
            self.base_url
        )
    }

    /// Parse the chart API response into one point per trading day.
    ///
    /// The adjusted close is preferred; the raw close is used where Yahoo
    /// omits it (indices usually carry both with equal values).
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<SeriesPoint>, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let offset = data.meta.as_ref().map(|m| m.gmtoffset).unwrap_or(0);

        let timestamps = data
            .timestamp
            .ok_or_else(|| DataError::ResponseFormatChanged("no timestamps".into()))?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);

        let mut points: Vec<SeriesPoint> = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts + offset, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let adj_close = adj_closes
                .as_ref()
                .and_then(|v| v.get(i).copied().flatten());
            let close = quote.close.get(i).copied().flatten();

            // Holidays and halted sessions come back as nulls
            let Some(value) = adj_close.or(close).filter(|v| v.is_finite()) else {
                continue;
            };

            // Yahoo occasionally repeats the last session with a live timestamp
            if let Some(last) = points.last_mut() {
                if last.date == date {
                    last.value = value;
                    continue;
                }
            }
            points.push(SeriesPoint::new(date, value));
        }

        if points.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        Ok(points)
    }
}

impl PriceProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn daily_closes(&self, symbol: &str) -> Result<Vec<SeriesPoint>, DataError> {
        let url = self.chart_url(symbol);
        tracing::debug!(symbol, %url, "fetching daily closes");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                symbol: symbol.to_string(),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(json: &str) -> Result<Vec<SeriesPoint>, DataError> {
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        YahooProvider::parse_response("^GSPC", resp)
    }

    #[test]
    fn prefers_adjusted_close_and_skips_nulls() {
        // 2024-01-02, 2024-01-03 (null), 2024-01-04 at 14:30 UTC
        let json = r#"{"chart":{"result":[{
            "meta":{"gmtoffset":-18000},
            "timestamp":[1704205800,1704292200,1704378600],
            "indicators":{
                "quote":[{"close":[4742.83,null,4688.68]}],
                "adjclose":[{"adjclose":[4700.0,null,null]}]
            }}],"error":null}}"#;

        let points = parse(json).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(points[0].value, 4700.0);
        // adjclose missing on this row, falls back to close
        assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        assert_eq!(points[1].value, 4688.68);
    }

    #[test]
    fn gmt_offset_moves_asian_sessions_to_local_date() {
        // 2024-01-03 23:00 UTC is already the morning of 2024-01-04 in Tokyo
        let json = r#"{"chart":{"result":[{
            "meta":{"gmtoffset":32400},
            "timestamp":[1704322800],
            "indicators":{"quote":[{"close":[33288.29]}]}}],"error":null}}"#;

        let points = parse(json).unwrap();
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
    }

    #[test]
    fn not_found_error_maps_to_symbol_not_found() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        match parse(json) {
            Err(DataError::SymbolNotFound { symbol }) => assert_eq!(symbol, "^GSPC"),
            other => panic!("expected SymbolNotFound, got {other:?}"),
        }
    }

    #[test]
    fn all_null_rows_is_symbol_not_found() {
        let json = r#"{"chart":{"result":[{
            "timestamp":[1704205800],
            "indicators":{"quote":[{"close":[null]}]}}],"error":null}}"#;
        assert!(matches!(parse(json), Err(DataError::SymbolNotFound { .. })));
    }

    #[test]
    fn missing_timestamps_is_format_change() {
        let json = r#"{"chart":{"result":[{
            "indicators":{"quote":[{"close":[]}]}}],"error":null}}"#;
        assert!(matches!(
            parse(json),
            Err(DataError::ResponseFormatChanged(_))
        ));
    }
}
