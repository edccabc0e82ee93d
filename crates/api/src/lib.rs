//! Climate Observation API Server
//!
//! Read-only HTTP API over station metadata and daily precipitation and
//! temperature readings.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod settings;
mod error;
pub mod routes;

pub use settings::{ApiSettings, ServerSettings, Settings};
pub use error::{ApiError, ErrorBody};

use storage::Store;

/// Application state shared across handlers
pub struct AppState {
    /// Read-only climate store
    pub store: Store,
    /// Query defaults
    pub settings: ApiSettings,
}

impl AppState {
    pub fn new(store: Store, settings: ApiSettings) -> Self {
        Self { store, settings }
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::home::welcome))
        .route(
            "/api/v1.0/precipitation",
            get(routes::precipitation::get_precipitation),
        )
        .route("/api/v1.0/stations", get(routes::stations::get_stations))
        .route("/api/v1.0/tobs", get(routes::tobs::get_tobs))
        .route("/api/v1.0/:start", get(routes::temperature::get_from_start))
        .route("/api/v1.0/:start/:end", get(routes::temperature::get_range))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Initialize logging
pub fn init_logging(debug: bool) -> Result<(), ApiError> {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ApiError::Logging(e.to_string()))
}

/// Open the store and serve until the listener fails
pub async fn run_server(settings: Settings) -> Result<(), ApiError> {
    let store = Store::open(&settings.database).await?;
    let state = Arc::new(AppState::new(store, settings.api));
    let app = create_router(state);

    let addr = settings.server.addr();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
