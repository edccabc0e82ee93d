//! Trailing date window arithmetic

use crate::StorageError;
use chrono::{Duration, NaiveDate};

/// Date format used by the measurement table
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window in days
pub const DEFAULT_WINDOW_DAYS: i64 = 366;

/// Compute the exclusive lower bound of a window ending at `latest`.
///
/// `window_start("2017-08-23", 366)` is `"2016-08-22"`; callers filter with
/// `date > start`, so the bound itself is outside the window.
pub fn window_start(latest: &str, days: i64) -> Result<String, StorageError> {
    let latest_date =
        NaiveDate::parse_from_str(latest, DATE_FORMAT).map_err(|source| {
            StorageError::InvalidDate {
                value: latest.to_string(),
                source,
            }
        })?;

    let start = Duration::try_days(days)
        .and_then(|window| latest_date.checked_sub_signed(window))
        .ok_or_else(|| StorageError::WindowOutOfRange {
            latest: latest.to_string(),
            days,
        })?;
    Ok(start.format(DATE_FORMAT).to_string())
}
