//! Webstore - product catalog and customer REST server

use axum_helpers::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = AppState::new(config)?;
    state.attachments.ensure_dirs().await?;

    info!(
        products = state.products.catalog_size().await?,
        seeded = state.config.seed_catalog,
        upload_dir = %state.config.upload_dir.display(),
        "Catalog ready"
    );

    let app = api::app(&state)?;

    info!("Starting Webstore on port {}", state.config.server.port);

    create_production_app(app, &state.config.server, Duration::from_secs(30), async {
        info!("Shutting down: nothing to flush for in-memory stores");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Webstore shutdown complete");
    Ok(())
}
