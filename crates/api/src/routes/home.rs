//! Route listing

use axum::response::Html;

pub const ROUTE_LISTING: &str = concat!(
    "Available Routes:<br/>",
    "Precipitation: /api/v1.0/precipitation<br/>",
    "List of stations: /api/v1.0/stations<br/>",
    "Temperature for one year:/api/v1.0/tobs<br/>",
    "Temperature from start date (YYYY-MM-DD):/api/v1.0/<start><br/>",
    "Temperature from start date to end date (YYYY-MM-DD/YYYY-MM-DD)/api/v1.0/<start>/<end><br/>",
);

/// List the available routes
pub async fn welcome() -> Html<&'static str> {
    Html(ROUTE_LISTING)
}
