//! Temperature Summary Routes

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use percent_encoding::percent_decode_str;
use std::sync::Arc;
use storage::TemperatureSummary;
use tracing::warn;

use crate::error::ErrorBody;
use crate::{ApiError, AppState};

/// Min/avg/max temperature payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    #[serde(rename = "Min")]
    pub min: f64,
    #[serde(rename = "Average")]
    pub average: f64,
    #[serde(rename = "Max")]
    pub max: f64,
}

/// Prefix shared by the summary routes
const API_PREFIX: &str = "/api/v1.0/";

/// Date segments after the API prefix.
///
/// Decoded from the raw URI rather than through `Path`, so bytes that are
/// not valid UTF-8 become U+FFFD and the request still reaches the query.
fn date_segments(uri: &Uri) -> Vec<String> {
    let path = uri.path();
    path.strip_prefix(API_PREFIX)
        .unwrap_or(path)
        .split('/')
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect()
}

/// Summary from `start` up to the configured default end date
pub async fn get_from_start(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let segments = date_segments(&uri);
    let start = segments.first().map(String::as_str).unwrap_or_default();
    summarize(&state, start, &state.settings.default_end_date).await
}

/// Summary for the closed range `start..=end`
pub async fn get_range(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let segments = date_segments(&uri);
    let start = segments.first().map(String::as_str).unwrap_or_default();
    let end = segments.get(1).map(String::as_str).unwrap_or_default();
    summarize(&state, start, end).await
}

async fn summarize(state: &AppState, start: &str, end: &str) -> Result<Response, ApiError> {
    let legacy = state.settings.legacy_not_found;
    let summary = state.store.temperature_summary(start, end).await?;

    if let Some(stats) = stats_for(&summary, legacy) {
        return Ok(Json(stats).into_response());
    }

    warn!("No temperature summary for {}..={}: {:?}", start, end, summary);
    let status = if legacy {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    let body = ErrorBody {
        error: format!("Date {} not found or not formatted as YYYY-MM-DD.", start),
    };
    Ok((status, Json(body)).into_response())
}

/// Stats to report, if any.
///
/// In legacy mode a minimum of exactly zero counts as missing, matching the
/// truthiness check older clients were built against.
pub fn stats_for(summary: &TemperatureSummary, legacy: bool) -> Option<TemperatureStats> {
    match *summary {
        TemperatureSummary::Found {
            min, average, max, ..
        } if !(legacy && min == 0.0) => Some(TemperatureStats { min, average, max }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(min: f64) -> TemperatureSummary {
        TemperatureSummary::Found {
            min,
            average: 10.0,
            max: 20.0,
            observations: 3,
        }
    }

    #[test]
    fn test_found_reports_stats() {
        let stats = stats_for(&found(5.0), true).unwrap();
        assert_eq!(stats, TemperatureStats { min: 5.0, average: 10.0, max: 20.0 });
    }

    #[test]
    fn test_zero_minimum_depends_on_mode() {
        assert!(stats_for(&found(0.0), true).is_none());
        assert_eq!(stats_for(&found(0.0), false).map(|s| s.min), Some(0.0));
    }

    #[test]
    fn test_missing_rows_never_report() {
        for legacy in [true, false] {
            assert!(stats_for(&TemperatureSummary::NullMinimum, legacy).is_none());
            assert!(stats_for(&TemperatureSummary::NoRow, legacy).is_none());
        }
    }

    #[test]
    fn test_date_segments_decode_lossily() {
        let uri: Uri = "/api/v1.0/2017-01-01/2017%2D01%2D10".parse().unwrap();
        assert_eq!(date_segments(&uri), vec!["2017-01-01", "2017-01-10"]);

        let uri: Uri = "/api/v1.0/%FF".parse().unwrap();
        assert_eq!(date_segments(&uri), vec!["\u{FFFD}"]);
    }

    #[test]
    fn test_stats_field_names() {
        let json = serde_json::to_value(TemperatureStats { min: 1.0, average: 2.0, max: 3.0 }).unwrap();
        assert_eq!(json, serde_json::json!({"Min": 1.0, "Average": 2.0, "Max": 3.0}));
    }
}
