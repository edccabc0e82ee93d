//! Precipitation Routes

use axum::{extract::State, Json};
use std::sync::Arc;
use storage::ValueColumn;

use super::{collapse_last_wins, DateSeries};
use crate::{ApiError, AppState};

/// Precipitation over the trailing window, all stations, one value per date
pub async fn get_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DateSeries>, ApiError> {
    let start = state
        .store
        .trailing_window_start(state.settings.window_days)
        .await?;

    let rows = state
        .store
        .measurements_after(&start, None, ValueColumn::Precipitation)
        .await?;

    Ok(Json(collapse_last_wins(rows)))
}
