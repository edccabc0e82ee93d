//! Climate Observation API - Main Entry Point

use api::{init_logging, run_server, settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load()?;
    init_logging(settings.server.debug)?;

    info!("=== Climate API v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Serving {}", settings.database.url);

    run_server(settings).await?;

    Ok(())
}
