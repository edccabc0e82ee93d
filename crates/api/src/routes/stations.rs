//! Station Routes

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{ApiError, AppState};

/// All station identifiers, ascending
pub async fn get_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.store.station_ids().await?))
}
