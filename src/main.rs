use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};
use rentwise::{
    config::{self, Config},
    logger::setup_logger,
    shell, HttpApartmentApi, SyncController,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config: Config = config::read_config()?;

    // Initialize logger
    setup_logger(&config.log_level)?;

    match &config.source {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("CONFIG_PATH not set, using default config"),
    }

    let in_docker = config::detect_docker();
    let base_url = config::resolve_base_url(&config, in_docker)?;
    info!("Using apartments backend at {base_url} (docker: {in_docker})");

    let api = HttpApartmentApi::new(
        &base_url,
        Duration::from_secs(config.request_timeout_seconds),
    )?;
    let controller = Arc::new(SyncController::new(api));

    if controller.mount().await.is_err() {
        warn!("Starting with an empty list, the backend could not be reached");
    }

    shell::run(controller).await
}
