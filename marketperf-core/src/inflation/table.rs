//! The monthly inflation index table.

use super::InflationError;
use crate::data::SeriesPoint;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Month-start date → index value, ordered by date.
///
/// Dates are unique and every value is finite and positive, so a ratio of
/// two lookups is always defined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndexTable {
    values: BTreeMap<NaiveDate, f64>,
}

impl IndexTable {
    /// Build a table from points, rejecting non-positive or non-finite values.
    ///
    /// Later points overwrite earlier ones with the same date.
    pub fn from_points(
        points: impl IntoIterator<Item = SeriesPoint>,
    ) -> Result<Self, InflationError> {
        let mut values = BTreeMap::new();
        for p in points {
            check_value(p.date, p.value)?;
            values.insert(p.date, p.value);
        }
        Ok(Self { values })
    }

    /// Merge a seed table with a pulled series. Seed entries win on collision.
    pub fn merge_seed_first(
        seed: impl IntoIterator<Item = SeriesPoint>,
        pulled: impl IntoIterator<Item = SeriesPoint>,
    ) -> Result<Self, InflationError> {
        let mut values = BTreeMap::new();
        for p in pulled {
            check_value(p.date, p.value)?;
            values.insert(p.date, p.value);
        }
        for p in seed {
            check_value(p.date, p.value)?;
            values.insert(p.date, p.value);
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.values.contains_key(&date)
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.values.get(&date).copied()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.values.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.values.keys().next_back().copied()
    }

    /// Value at the latest table date on or before `date`.
    ///
    /// Fails with [`InflationError::NotFound`] when `date` precedes the
    /// table; there is no fallback value.
    pub fn lookup_on_or_before(&self, date: NaiveDate) -> Result<f64, InflationError> {
        self.values
            .range(..=date)
            .next_back()
            .map(|(_, v)| *v)
            .ok_or(InflationError::NotFound {
                date,
                earliest: self.first_date(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = SeriesPoint> + '_ {
        self.values.iter().map(|(d, v)| SeriesPoint::new(*d, *v))
    }

    pub fn to_points(&self) -> Vec<SeriesPoint> {
        self.iter().collect()
    }
}

fn check_value(date: NaiveDate, value: f64) -> Result<(), InflationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InflationError::InvalidValue { date, value })
    }
}
