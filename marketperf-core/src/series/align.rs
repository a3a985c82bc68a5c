//! Calendar alignment for monthly series.
//!
//! Given monthly observations and a trading-day calendar, produce one value
//! per trading day by linear interpolation in calendar time between the
//! surrounding monthly points. Trading days before the first observation are
//! dropped; trading days after the last hold the last value.

use crate::data::SeriesPoint;
use chrono::NaiveDate;

/// Reindex `monthly` onto `calendar`, interpolating by elapsed days.
///
/// Both inputs must be sorted ascending by date.
pub fn reindex_time_interpolated(
    monthly: &[SeriesPoint],
    calendar: &[NaiveDate],
) -> Vec<SeriesPoint> {
    let Some(first) = monthly.first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(calendar.len());
    // Index of the last monthly point on or before the current date
    let mut left = 0usize;

    for &date in calendar {
        if date < first.date {
            continue;
        }
        while left + 1 < monthly.len() && monthly[left + 1].date <= date {
            left += 1;
        }

        let lo = monthly[left];
        let value = match monthly.get(left + 1) {
            Some(hi) if lo.date != date => {
                let span = (hi.date - lo.date).num_days() as f64;
                let elapsed = (date - lo.date).num_days() as f64;
                lo.value + (hi.value - lo.value) * (elapsed / span)
            }
            _ => lo.value,
        };
        out.push(SeriesPoint::new(date, value));
    }

    out
}
