//! Annual CPI values (BLS, January of each year) for the years before the
//! monthly FRED series begins in 1947.

use crate::data::SeriesPoint;
use chrono::NaiveDate;

const EARLY_CPI: [(i32, f64); 34] = [
    (1913, 9.9),
    (1914, 10.0),
    (1915, 10.1),
    (1916, 10.9),
    (1917, 12.8),
    (1918, 15.0),
    (1919, 17.3),
    (1920, 20.0),
    (1921, 17.9),
    (1922, 16.8),
    (1923, 17.1),
    (1924, 17.1),
    (1925, 17.5),
    (1926, 17.7),
    (1927, 17.4),
    (1928, 17.2),
    (1929, 17.2),
    (1930, 16.7),
    (1931, 15.2),
    (1932, 13.6),
    (1933, 12.9),
    (1934, 13.4),
    (1935, 13.7),
    (1936, 13.9),
    (1937, 14.4),
    (1938, 14.1),
    (1939, 13.9),
    (1940, 14.0),
    (1941, 14.7),
    (1942, 16.3),
    (1943, 17.3),
    (1944, 17.6),
    (1945, 18.0),
    (1946, 19.5),
];

/// Seed points dated January 1st of each year, oldest first.
pub fn early_cpi() -> Vec<SeriesPoint> {
    EARLY_CPI
        .iter()
        .filter_map(|&(year, value)| {
            NaiveDate::from_ymd_opt(year, 1, 1).map(|date| SeriesPoint::new(date, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_covers_1913_through_1946() {
        let seed = early_cpi();
        assert_eq!(seed.len(), 34);
        assert_eq!(seed[0].date, NaiveDate::from_ymd_opt(1913, 1, 1).unwrap());
        assert_eq!(seed[33].date, NaiveDate::from_ymd_opt(1946, 1, 1).unwrap());
        assert!(seed.windows(2).all(|w| w[0].date < w[1].date));
    }
}
