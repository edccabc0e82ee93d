//! Temperature Observation Routes

use axum::{extract::State, Json};
use std::sync::Arc;
use storage::ValueColumn;

use super::{collapse_last_wins, DateSeries};
use crate::{ApiError, AppState};

/// Temperature observations of the featured station over the trailing window
pub async fn get_tobs(State(state): State<Arc<AppState>>) -> Result<Json<DateSeries>, ApiError> {
    let start = state
        .store
        .trailing_window_start(state.settings.window_days)
        .await?;

    let rows = state
        .store
        .measurements_after(
            &start,
            Some(state.settings.featured_station.as_str()),
            ValueColumn::Temperature,
        )
        .await?;

    Ok(Json(collapse_last_wins(rows)))
}
