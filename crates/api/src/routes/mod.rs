//! Route Handlers

pub mod home;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

use std::collections::BTreeMap;
use storage::MeasurementRecord;

/// Date to value mapping returned by the series endpoints
pub type DateSeries = BTreeMap<String, Option<f64>>;

/// Collapse rows into one value per date.
///
/// Lossy: when several rows share a date (several stations reporting the
/// same day) only the last row in iteration order is kept.
pub fn collapse_last_wins<I>(records: I) -> DateSeries
where
    I: IntoIterator<Item = MeasurementRecord>,
{
    let mut series = DateSeries::new();
    for record in records {
        series.insert(record.date, record.value);
    }
    series
}
